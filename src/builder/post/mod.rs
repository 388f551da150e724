pub mod model;
pub mod slug;
pub mod date;
pub mod loader;
pub mod collector;

pub use model::Post;
pub use collector::collect_posts;
