pub mod article;
pub mod headlines;
pub mod session;

pub use article::Article;
pub use headlines::{HeadlineBoard, Headlines};
pub use session::Session;
