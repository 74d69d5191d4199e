#[path = "fixtures.rs"]
pub mod fixtures;
