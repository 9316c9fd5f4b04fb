pub mod admin;
pub mod holdings;
pub mod profile;
pub mod project;
pub mod wallet;
