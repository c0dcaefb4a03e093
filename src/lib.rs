pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod services;
pub mod view;
