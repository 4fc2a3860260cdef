pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod places;
