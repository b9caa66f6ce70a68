pub mod crawler;
pub mod walker;
pub mod web;

pub use crawler::PageSource;
pub use walker::Walker;
pub use web::HttpSource;
