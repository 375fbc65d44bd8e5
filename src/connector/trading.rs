use crate::core::errors::ExchangeError;
use crate::core::kernel::{JsonBody, QueryString, RestClient};
use crate::core::types::{
    HistoryFilter, ModifyOrderRequest, Order, PlaceOrderRequest, Trade, TradeFee,
};
use serde_json::json;
use tracing::instrument;

/// Private trading endpoints. Every call is signed.
#[derive(Debug, Clone)]
pub struct Trading<R: RestClient> {
    rest: R,
}

impl<R: RestClient + Clone> Trading<R> {
    pub fn new(rest: &R) -> Self {
        Self { rest: rest.clone() }
    }
}

fn history_query(filter: &HistoryFilter) -> QueryString {
    QueryString::new()
        .push_list("instrument", &filter.instruments)
        .push_time("from", filter.from.as_ref())
        .push_time("till", filter.till.as_ref())
        .push_opt("limit", filter.limit)
}

impl<R: RestClient> Trading<R> {
    /// Place a new order (requires R2 access)
    #[instrument(skip(self, order), fields(instrument = %order.instrument, side = ?order.side))]
    pub async fn place_order(&self, order: &PlaceOrderRequest) -> Result<Order, ExchangeError> {
        let body = JsonBody::encode(order)?;
        self.rest.post_json("trading/placeOrder", &body, true).await
    }

    #[instrument(skip(self))]
    pub async fn order_status(&self, ids: &[u64]) -> Result<Vec<Order>, ExchangeError> {
        let query = QueryString::new().push_list("id", ids);
        self.rest.get_json("trading/orderStatus", &query, true).await
    }

    /// Trades generated by one order
    #[instrument(skip(self))]
    pub async fn order_trades(&self, id: u64) -> Result<Vec<Trade>, ExchangeError> {
        let query = QueryString::new().push("id", id);
        self.rest.get_json("trading/orderTrades", &query, true).await
    }

    #[instrument(skip(self, request), fields(id = request.id))]
    pub async fn modify_order(&self, request: &ModifyOrderRequest) -> Result<Order, ExchangeError> {
        let body = JsonBody::encode(request)?;
        self.rest.post_json("trading/modifyOrder", &body, true).await
    }

    #[instrument(skip(self))]
    pub async fn active_orders(&self, instruments: &[&str]) -> Result<Vec<Order>, ExchangeError> {
        let query = QueryString::new().push_list("instrument", instruments);
        self.rest.get_json("trading/activeOrders", &query, true).await
    }

    /// Returns the ids of the orders that were cancelled
    #[instrument(skip(self))]
    pub async fn cancel_orders_by_id(&self, ids: &[u64]) -> Result<Vec<u64>, ExchangeError> {
        let body = JsonBody::encode(&json!({ "ids": ids }))?;
        self.rest.post_json("trading/cancelOrdersById", &body, true).await
    }

    #[instrument(skip(self))]
    pub async fn cancel_orders_by_instrument(
        &self,
        instruments: &[&str],
    ) -> Result<Vec<u64>, ExchangeError> {
        let body = JsonBody::encode(&json!({ "instruments": instruments }))?;
        self.rest
            .post_json("trading/cancelOrdersByInstrument", &body, true)
            .await
    }

    /// Cancel every active order and every order still being submitted
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(&self) -> Result<Vec<u64>, ExchangeError> {
        self.rest
            .post_json("trading/cancelAllOrders", &JsonBody::empty(), true)
            .await
    }

    #[instrument(skip(self))]
    pub async fn order_history(&self, filter: &HistoryFilter) -> Result<Vec<Order>, ExchangeError> {
        self.rest
            .get_json("trading/orderHistory", &history_query(filter), true)
            .await
    }

    #[instrument(skip(self))]
    pub async fn trade_history(&self, filter: &HistoryFilter) -> Result<Vec<Trade>, ExchangeError> {
        self.rest
            .get_json("trading/tradeHistory", &history_query(filter), true)
            .await
    }

    /// Current maker/taker fee rates for the account
    #[instrument(skip(self))]
    pub async fn trade_fee(&self) -> Result<TradeFee, ExchangeError> {
        self.rest
            .get_json("trading/tradeFee", &QueryString::new(), true)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::testing::RecordingRest;
    use crate::core::types::{OrderSide, TimeInForce};
    use chrono::{TimeZone, Utc};
    use reqwest::Method;

    fn order_json() -> serde_json::Value {
        json!({
            "id": 469_594_855,
            "timestamp": "2018-06-08T16:59:44Z",
            "instrument": "BTS-BTC",
            "side": "buy",
            "type": "limit",
            "status": "unfilledActive",
            "cancellationReason": null,
            "timeInForce": "GTC",
            "volume": 4.0,
            "price": 0.000025,
            "stopPrice": null,
            "remainingVolume": 4.0,
            "lastUpdate": null,
            "parentOrderId": null,
            "childOrderId": null
        })
    }

    #[tokio::test]
    async fn test_place_order_body_drops_absent_fields() {
        let rest = RecordingRest::new(order_json());
        let trading = Trading::new(&rest);

        let order = PlaceOrderRequest::limit("BTS-BTC", OrderSide::Buy, 0.25, 4.0)
            .time_in_force(TimeInForce::GTC)
            .strict_validation(false);
        let placed = trading.place_order(&order).await.unwrap();

        assert_eq!(placed.id, 469_594_855);
        let call = rest.last_call();
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.endpoint, "trading/placeOrder");
        assert!(call.authenticated);
        assert_eq!(
            call.body.as_deref(),
            Some(
                r#"{"instrument":"BTS-BTC","side":"buy","type":"limit","timeInForce":"GTC","volume":4.0,"price":0.25,"strictValidation":false}"#
            )
        );
    }

    #[tokio::test]
    async fn test_modify_order_body() {
        let rest = RecordingRest::new(order_json());
        let trading = Trading::new(&rest);

        trading
            .modify_order(&ModifyOrderRequest::new(42).volume(2.5))
            .await
            .unwrap();

        assert_eq!(
            rest.last_call().body.as_deref(),
            Some(r#"{"id":42,"newVolume":2.5}"#)
        );
    }

    #[tokio::test]
    async fn test_cancel_all_orders_sends_empty_object() {
        let rest = RecordingRest::new(json!([1, 2]));
        let trading = Trading::new(&rest);

        let cancelled = trading.cancel_all_orders().await.unwrap();

        assert_eq!(cancelled, vec![1, 2]);
        let call = rest.last_call();
        assert_eq!(call.endpoint, "trading/cancelAllOrders");
        assert_eq!(call.body.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_cancel_by_id_wraps_ids_in_array() {
        let rest = RecordingRest::new(json!([7]));
        let trading = Trading::new(&rest);

        trading.cancel_orders_by_id(&[7]).await.unwrap();

        assert_eq!(rest.last_call().body.as_deref(), Some(r#"{"ids":[7]}"#));
    }

    #[tokio::test]
    async fn test_cancel_by_instrument_body() {
        let rest = RecordingRest::new(json!([]));
        let trading = Trading::new(&rest);

        trading
            .cancel_orders_by_instrument(&["BTS-BTC", "ETH-BTC"])
            .await
            .unwrap();

        assert_eq!(
            rest.last_call().body.as_deref(),
            Some(r#"{"instruments":["BTS-BTC","ETH-BTC"]}"#)
        );
    }

    #[tokio::test]
    async fn test_active_market_order_without_time_in_force() {
        let mut market_order = order_json();
        market_order["type"] = json!("market");
        market_order["timeInForce"] = json!(null);
        market_order["price"] = json!(null);
        let rest = RecordingRest::new(json!([market_order]));
        let trading = Trading::new(&rest);

        let orders = trading.active_orders(&["BTS-BTC"]).await.unwrap();

        assert_eq!(orders.len(), 1);
        assert!(orders[0].time_in_force.is_none());
        assert_eq!(rest.last_call().query, "?instrument=BTS-BTC");
    }

    #[tokio::test]
    async fn test_order_status_joins_ids() {
        let rest = RecordingRest::new(json!([]));
        let trading = Trading::new(&rest);

        trading.order_status(&[1, 2, 3]).await.unwrap();

        let call = rest.last_call();
        assert_eq!(call.endpoint, "trading/orderStatus");
        assert_eq!(call.query, "?id=1,2,3");
        assert!(call.authenticated);
    }

    #[tokio::test]
    async fn test_history_filter_truncates_dates() {
        let rest = RecordingRest::new(json!([]));
        let trading = Trading::new(&rest);

        let from = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::milliseconds(123);
        let filter = HistoryFilter::new()
            .instrument("BTS-BTC")
            .from(from)
            .limit(10);
        trading.order_history(&filter).await.unwrap();

        let call = rest.last_call();
        assert_eq!(call.endpoint, "trading/orderHistory");
        assert_eq!(
            call.query,
            "?instrument=BTS-BTC&from=2023-01-01T00:00:00Z&limit=10"
        );
    }

    #[tokio::test]
    async fn test_trade_fee_has_no_query() {
        let rest = RecordingRest::new(json!({
            "makerFeeRate": 0.001,
            "takerFeeRate": 0.001,
            "tradeVolume": 0.0,
            "lastUpdate": "2018-06-08T17:00:00Z"
        }));
        let trading = Trading::new(&rest);

        let fee = trading.trade_fee().await.unwrap();

        assert!((fee.taker_fee_rate - 0.001).abs() < f64::EPSILON);
        let call = rest.last_call();
        assert_eq!(call.method, Method::GET);
        assert_eq!(call.query, "");
    }
}
