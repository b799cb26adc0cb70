pub mod api;
pub mod config;
pub mod models;
pub mod session;
pub mod sort;
