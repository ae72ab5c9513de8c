pub mod catalog;
pub mod client;
pub mod errors;
pub mod types;

pub use client::BinanceClient;
