use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderType {
    Limit,
    Market,
    StopLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    GTC,
    IOC,
    FOK,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    Submitting,
    UnfilledActive,
    PartiallyFilledActive,
    Filled,
    UnfilledCancelled,
    PartiallyFilledCancelled,
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CancellationReason {
    CancelledByUser,
    FailedToFillRightAway,
    FailedToPassValidation,
    MarketClosed,
    OrderExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentState {
    Active,
    Suspended,
    Delisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferType {
    Deposit,
    Withdrawal,
}

impl TransferType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Success,
    Failed,
}

/// OHLCV candle width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "3m")]
    ThreeMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1mo")]
    OneMonth,
}

impl Granularity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::ThreeMinutes => "3m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "1h",
            Self::FourHours => "4h",
            Self::OneDay => "1d",
            Self::OneWeek => "1w",
            Self::OneMonth => "1mo",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Market data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub symbol: String,
    pub name: String,
    pub is_fiat: bool,
    pub deposits_allowed: bool,
    pub deposit_confirmation_count: Option<u32>,
    pub min_deposit: Option<f64>,
    pub withdrawals_allowed: bool,
    pub withdrawal_precision: Option<u32>,
    pub min_withdrawal: Option<f64>,
    pub max_withdrawal: Option<f64>,
    pub flat_withdrawal_fee: Option<f64>,
    pub is_delisted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub symbol: String,
    pub base_currency: String,
    pub quote_currency: String,
    pub fee_currency: String,
    pub tick_size: f64,
    pub min_price: f64,
    pub min_volume: f64,
    pub supported_order_types: Vec<OrderType>,
    pub state: InstrumentState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    pub instrument: String,
    pub last: Option<f64>,
    pub percent_change: Option<f64>,
    pub low: Option<f64>,
    pub high: Option<f64>,
    pub base_volume: f64,
    pub quote_volume: f64,
    pub volume_in_btc: f64,
    pub volume_in_usd: f64,
    pub ask: Option<f64>,
    pub bid: Option<f64>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTrade {
    pub price: f64,
    pub volume: f64,
    pub side: OrderSide,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    /// Highest price first
    pub buy_levels: Vec<PriceLevel>,
    /// Lowest price first
    pub sell_levels: Vec<PriceLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    pub timestamp: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

// ---------------------------------------------------------------------------
// Trading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub timestamp: String,
    pub instrument: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub cancellation_reason: Option<CancellationReason>,
    /// Limit orders only
    pub time_in_force: Option<TimeInForce>,
    pub volume: f64,
    pub price: Option<f64>,
    pub stop_price: Option<f64>,
    pub remaining_volume: f64,
    pub last_update: Option<String>,
    pub parent_order_id: Option<u64>,
    pub child_order_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: u64,
    pub order_id: u64,
    pub timestamp: String,
    pub instrument: String,
    pub side: OrderSide,
    pub price: f64,
    pub volume: f64,
    /// Negative means rebate
    pub fee: f64,
    pub fee_currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeFee {
    pub maker_fee_rate: f64,
    pub taker_fee_rate: f64,
    pub trade_volume: f64,
    pub last_update: String,
}

/// Parameters for `trading/placeOrder`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub instrument: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: Option<OrderType>,
    pub time_in_force: Option<TimeInForce>,
    pub volume: f64,
    pub price: Option<f64>,
    pub stop_price: Option<f64>,
    pub strict_validation: Option<bool>,
}

impl PlaceOrderRequest {
    /// Limit order; other fields left to the exchange defaults
    pub fn limit(instrument: impl Into<String>, side: OrderSide, price: f64, volume: f64) -> Self {
        Self {
            instrument: instrument.into(),
            side,
            order_type: Some(OrderType::Limit),
            time_in_force: None,
            volume,
            price: Some(price),
            stop_price: None,
            strict_validation: None,
        }
    }

    pub fn market(instrument: impl Into<String>, side: OrderSide, volume: f64) -> Self {
        Self {
            instrument: instrument.into(),
            side,
            order_type: Some(OrderType::Market),
            time_in_force: None,
            volume,
            price: None,
            stop_price: None,
            strict_validation: None,
        }
    }

    pub fn stop_limit(
        instrument: impl Into<String>,
        side: OrderSide,
        price: f64,
        stop_price: f64,
        volume: f64,
    ) -> Self {
        Self {
            instrument: instrument.into(),
            side,
            order_type: Some(OrderType::StopLimit),
            time_in_force: None,
            volume,
            price: Some(price),
            stop_price: Some(stop_price),
            strict_validation: None,
        }
    }

    pub fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    pub fn strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = Some(strict);
        self
    }
}

/// Parameters for `trading/modifyOrder`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyOrderRequest {
    pub id: u64,
    pub new_price: Option<f64>,
    pub new_volume: Option<f64>,
    pub strict_validation: Option<bool>,
}

impl ModifyOrderRequest {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            new_price: None,
            new_volume: None,
            strict_validation: None,
        }
    }

    pub fn price(mut self, price: f64) -> Self {
        self.new_price = Some(price);
        self
    }

    pub fn volume(mut self, volume: f64) -> Self {
        self.new_volume = Some(volume);
        self
    }

    pub fn strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = Some(strict);
        self
    }
}

/// Filter shared by `trading/orderHistory` and `trading/tradeHistory`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub instruments: Vec<String>,
    pub from: Option<DateTime<Utc>>,
    pub till: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
}

impl HistoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instruments.push(instrument.into());
        self
    }

    pub fn from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    pub fn till(mut self, till: DateTime<Utc>) -> Self {
        self.till = Some(till);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub currency: String,
    pub available: f64,
    pub reserved: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositAddress {
    pub currency: String,
    pub address: String,
    pub payment_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyTransfer {
    pub id: u64,
    #[serde(rename = "type")]
    pub transfer_type: TransferType,
    pub currency: String,
    pub address: Option<String>,
    pub payment_id: Option<String>,
    pub amount: f64,
    pub fee: Option<f64>,
    pub tx_id: Option<String>,
    pub created_at: String,
    pub processed_at: Option<String>,
    pub confirmations_required: Option<u32>,
    pub confirmation_count: Option<u32>,
    pub status: TransferStatus,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalPreview {
    /// Set when the requested withdrawal was adjusted to meet the limits
    pub warning: Option<String>,
    pub balance_deduction: f64,
    pub fee: f64,
    pub payout: f64,
}

/// Filter for `account/moneyTransfers`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoneyTransferFilter {
    pub transfer_type: Option<TransferType>,
    pub currencies: Vec<String>,
    pub from: Option<DateTime<Utc>>,
    pub till: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
}

impl MoneyTransferFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transfer_type(mut self, transfer_type: TransferType) -> Self {
        self.transfer_type = Some(transfer_type);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currencies.push(currency.into());
        self
    }

    pub fn from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    pub fn till(mut self, till: DateTime<Utc>) -> Self {
        self.till = Some(till);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
