use std::collections::HashMap;

use tracing::info;

use crate::binance::client::BinanceClient;
use crate::binance::errors::MarketApiError;
use crate::binance::types::SymbolInfo;

/// Symbol display-name lookup, populated once at startup.
///
/// Maps an opaque upstream symbol (`"BTCUSDT"`) to a readable pair
/// (`"BTC/USDT"`). Unresolved symbols fall back to the raw id, so a
/// missing or partial catalog degrades names but never monitoring.
#[derive(Debug, Default)]
pub struct SymbolCatalog {
    names: HashMap<String, String>,
}

impl SymbolCatalog {
    /// Catalog with no entries; every lookup falls back to the raw symbol.
    pub fn empty() -> Self {
        Self::default()
    }

    pub async fn load(client: &BinanceClient) -> Result<Self, MarketApiError> {
        let info = client.exchange_info().await?;
        let catalog = Self::from_symbols(info.symbols);

        info!(resolvable = catalog.names.len(), "symbol catalog loaded");

        Ok(catalog)
    }

    pub fn from_symbols(symbols: Vec<SymbolInfo>) -> Self {
        let names = symbols
            .into_iter()
            .filter(|s| s.status == "TRADING")
            .map(|s| (s.symbol, format!("{}/{}", s.base_asset, s.quote_asset)))
            .collect();

        Self { names }
    }

    pub fn resolves(&self, symbol: &str) -> bool {
        self.names.contains_key(symbol)
    }

    pub fn display_name(&self, symbol: &str) -> String {
        self.names
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| symbol.to_string())
    }
}
