use serde::Deserialize;

/// `GET /api/v3/ticker/price` response.
///
/// Upstream encodes decimals as strings; parsing happens at the client edge.
#[derive(Debug, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: String,
}

/// One aggregate trade from `GET /api/v3/aggTrades`.
#[derive(Debug, Deserialize)]
pub struct AggTrade {
    /// Aggregate trade id, unique within a symbol's history.
    #[serde(rename = "a")]
    pub id: u64,

    #[serde(rename = "p")]
    pub price: String,

    #[serde(rename = "q")]
    pub qty: String,

    /// Execution time, ms since epoch.
    #[serde(rename = "T")]
    pub ts_ms: u64,
}

/// `GET /api/v3/exchangeInfo` envelope, reduced to the catalog fields.
#[derive(Debug, Deserialize)]
pub struct ExchangeInfo {
    pub symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    pub base_asset: String,
    pub quote_asset: String,
    pub status: String,
}
