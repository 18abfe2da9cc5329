pub mod arena;
pub mod bot_strategy;
pub mod config;
pub mod session;
