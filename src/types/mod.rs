pub mod holdings;
pub mod model;
pub mod project;
