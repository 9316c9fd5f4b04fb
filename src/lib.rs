pub mod chain;
pub mod config;
pub mod constant;
pub mod db;
pub mod holdings;
pub mod secrets;
pub mod server;
pub mod types;
pub mod utils;
