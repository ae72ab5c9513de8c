pub mod binance;
pub mod config;
pub mod market;

pub mod error;
pub mod logger;
pub mod time;
