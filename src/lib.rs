pub mod app;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod ui;
pub mod utils;
