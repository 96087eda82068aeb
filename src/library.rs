pub mod cooldown;
pub mod logger;
