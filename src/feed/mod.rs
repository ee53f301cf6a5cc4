//! Feed module: posts, comments and likes.

mod comment_repository;
mod like;
mod post;
mod post_repository;

pub use comment_repository::CommentRepository;
pub use like::{ensure_once, LikeKey, LikeRepository, LikeTarget};
pub use post::{Comment, CommentView, NewComment, NewPost, Post, PostView, MAX_BODY_LENGTH};
pub use post_repository::PostRepository;
