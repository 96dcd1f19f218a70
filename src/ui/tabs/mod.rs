pub mod log;
pub mod news;
pub mod services;
