pub mod authorize;
pub mod config;
pub mod health;
pub mod invoke;
pub mod serve;
