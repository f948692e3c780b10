pub mod config;
pub mod page;
pub mod probe;
pub mod scroll_region;
