pub mod clock;
pub mod config;
pub mod engine;
pub mod hooks;
pub mod persist;
pub mod types;
