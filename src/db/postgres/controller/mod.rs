pub mod holdings;
pub mod profile;
pub mod wallet;
