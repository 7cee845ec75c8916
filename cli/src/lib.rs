pub mod app;
pub mod args;
pub mod config;
pub mod desktop;
pub mod error;
pub mod logger;
pub mod output;
pub mod palette;
pub mod sink;
pub mod validation;
