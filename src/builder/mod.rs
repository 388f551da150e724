pub mod post;
pub mod site;
pub mod watcher;

pub use site::SiteGenerator;
pub use watcher::{run_generation, start_watcher};
