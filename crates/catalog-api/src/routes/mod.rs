pub mod health;
pub mod prometheus;
