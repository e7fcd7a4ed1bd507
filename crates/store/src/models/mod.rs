//! Document models exchanged through the store traits.

pub mod chat;
pub mod comment;
pub mod post;
pub mod report;
pub mod user;

pub use chat::ChatMessage;
pub use comment::Comment;
pub use post::{Post, PostStatus};
pub use report::{Report, ReportTarget};
pub use user::{NotificationSettings, User};
