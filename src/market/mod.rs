pub mod cache;
pub mod kline;
pub mod monitor;
pub mod notifier;
pub mod stability;
pub mod trend;
pub mod types;
pub mod volatility;
