use crate::core::errors::ExchangeError;
use crate::core::kernel::{QueryString, RestClient};
use crate::core::types::{Currency, Granularity, Instrument, Ohlcv, OrderBook, RecentTrade, Ticker};
use tracing::instrument;

/// Public market data endpoints. No credentials needed.
#[derive(Debug, Clone)]
pub struct MarketData<R: RestClient> {
    rest: R,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &R) -> Self {
        Self { rest: rest.clone() }
    }
}

impl<R: RestClient> MarketData<R> {
    /// Currencies with deposit/withdrawal details; an empty filter returns all of them
    #[instrument(skip(self))]
    pub async fn currencies(&self, filter: &[&str]) -> Result<Vec<Currency>, ExchangeError> {
        let query = QueryString::new().push_list("filter", filter);
        self.rest.get_json("public/currencies", &query, false).await
    }

    #[instrument(skip(self))]
    pub async fn instruments(&self, filter: &[&str]) -> Result<Vec<Instrument>, ExchangeError> {
        let query = QueryString::new().push_list("filter", filter);
        self.rest.get_json("public/instruments", &query, false).await
    }

    #[instrument(skip(self))]
    pub async fn tickers(&self, instruments: &[&str]) -> Result<Vec<Ticker>, ExchangeError> {
        let query = QueryString::new().push_list("instrument", instruments);
        self.rest.get_json("public/tickers", &query, false).await
    }

    /// Recent trades, newest first
    #[instrument(skip(self))]
    pub async fn recent_trades(
        &self,
        instrument: &str,
        limit: Option<u32>,
    ) -> Result<Vec<RecentTrade>, ExchangeError> {
        let query = QueryString::new()
            .push("instrument", instrument)
            .push_opt("limit", limit);
        self.rest.get_json("public/recentTrades", &query, false).await
    }

    /// Bids and asks aggregated by price level
    #[instrument(skip(self))]
    pub async fn order_book(
        &self,
        instrument: &str,
        limit: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        let query = QueryString::new()
            .push("instrument", instrument)
            .push_opt("limit", limit);
        self.rest.get_json("public/orderBook", &query, false).await
    }

    #[instrument(skip(self))]
    pub async fn ohlcv(
        &self,
        instrument: &str,
        granularity: Granularity,
        limit: Option<u32>,
    ) -> Result<Vec<Ohlcv>, ExchangeError> {
        let query = QueryString::new()
            .push("instrument", instrument)
            .push("granularity", granularity)
            .push_opt("limit", limit);
        self.rest.get_json("public/ohlcv", &query, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::testing::RecordingRest;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_tickers_joins_instruments() {
        let rest = RecordingRest::new(json!([]));
        let market = MarketData::new(&rest);

        market.tickers(&["BTC-USD", "ETH-BTC"]).await.unwrap();

        let call = rest.last_call();
        assert_eq!(call.method, Method::GET);
        assert_eq!(call.endpoint, "public/tickers");
        assert_eq!(call.query, "?instrument=BTC-USD,ETH-BTC");
        assert!(!call.authenticated);
    }

    #[tokio::test]
    async fn test_empty_filter_sends_no_query() {
        let rest = RecordingRest::new(json!([]));
        let market = MarketData::new(&rest);

        market.currencies(&[]).await.unwrap();

        assert_eq!(rest.last_call().query, "");
    }

    #[tokio::test]
    async fn test_ohlcv_parameter_order() {
        let rest = RecordingRest::new(json!([
            {
                "timestamp": "2018-06-08T17:00:00Z",
                "open": 0.0000154,
                "high": 0.0000157,
                "low": 0.0000152,
                "close": 0.0000155,
                "volume": 18_000.0
            }
        ]));
        let market = MarketData::new(&rest);

        let candles = market
            .ohlcv("BTS-BTC", Granularity::FifteenMinutes, Some(1))
            .await
            .unwrap();

        assert_eq!(candles.len(), 1);
        assert_eq!(
            rest.last_call().query,
            "?instrument=BTS-BTC&granularity=15m&limit=1"
        );
    }

    #[tokio::test]
    async fn test_order_book_without_limit() {
        let rest = RecordingRest::new(json!({
            "buyLevels": [{"price": 0.0000154, "volume": 1000.0}],
            "sellLevels": []
        }));
        let market = MarketData::new(&rest);

        let book = market.order_book("BTS-BTC", None).await.unwrap();

        assert_eq!(book.buy_levels.len(), 1);
        assert!(book.sell_levels.is_empty());
        assert_eq!(rest.last_call().query, "?instrument=BTS-BTC");
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_decode_error() {
        let rest = RecordingRest::new(json!({"unexpected": true}));
        let market = MarketData::new(&rest);

        let result = market.recent_trades("BTS-BTC", Some(5)).await;
        assert!(matches!(result, Err(ExchangeError::DecodeError { .. })));
    }
}
