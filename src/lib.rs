pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod core;
pub mod logging;
pub mod modules;
pub mod ui;
