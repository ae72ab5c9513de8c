use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::binance::errors::MarketApiError;
use crate::binance::types::{AggTrade, ExchangeInfo, TickerPrice};
use crate::market::monitor::MarketDataApi;
use crate::market::types::Trade;

#[derive(Clone)]
pub struct BinanceClient {
    http: Client,
    url: String,
}

impl BinanceClient {
    pub fn new(url: String) -> Result<Self, MarketApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(5))
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, url })
    }

    /// Full symbol catalog; fetched once at startup to build display names.
    pub async fn exchange_info(&self) -> Result<ExchangeInfo, MarketApiError> {
        let url = format!("{}/api/v3/exchangeInfo", self.url);

        let resp = self.http.get(&url).send().await?.error_for_status()?;
        let info: ExchangeInfo = resp.json().await?;

        debug!(symbols = info.symbols.len(), "exchange info fetched");

        Ok(info)
    }
}

#[async_trait]
impl MarketDataApi for BinanceClient {
    #[instrument(skip(self), fields(symbol = %symbol), level = "debug")]
    async fn ticker_price(&self, symbol: &str) -> Result<f64, MarketApiError> {
        let url = format!("{}/api/v3/ticker/price?symbol={}", self.url, symbol);

        let resp = self.http.get(&url).send().await?.error_for_status()?;
        let ticker: TickerPrice = resp.json().await?;
        let price: f64 = ticker.price.parse()?;

        debug!(price, "ticker price fetched");

        Ok(price)
    }

    #[instrument(skip(self), fields(symbol = %symbol), level = "debug")]
    async fn recent_trades(
        &self,
        symbol: &str,
        since_ms: u64,
        limit: u32,
    ) -> Result<Vec<Trade>, MarketApiError> {
        let url = format!(
            "{}/api/v3/aggTrades?symbol={}&startTime={}&limit={}",
            self.url, symbol, since_ms, limit
        );

        let resp = self.http.get(&url).send().await?.error_for_status()?;
        let raw: Vec<AggTrade> = resp.json().await?;

        debug!(count = raw.len(), "aggregate trades fetched");

        // Feed order is preserved; string decimals are parsed here so the
        // core only ever sees well-typed records.
        raw.into_iter()
            .map(|t| {
                Ok(Trade {
                    id: t.id,
                    ts_ms: t.ts_ms,
                    price: t.price.parse()?,
                    qty: t.qty.parse()?,
                })
            })
            .collect()
    }
}
