pub mod core;
pub mod decision;
pub mod dispatch;
pub mod main;
pub mod projection;
mod render;
mod run_effect;
