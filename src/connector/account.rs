use crate::core::errors::ExchangeError;
use crate::core::kernel::{JsonBody, QueryString, RestClient};
use crate::core::types::{
    Balance, DepositAddress, MoneyTransfer, MoneyTransferFilter, WithdrawalPreview,
};
use serde_json::json;
use tracing::instrument;

/// Private account endpoints: balances, deposits and withdrawals.
#[derive(Debug, Clone)]
pub struct Account<R: RestClient> {
    rest: R,
}

impl<R: RestClient + Clone> Account<R> {
    pub fn new(rest: &R) -> Self {
        Self { rest: rest.clone() }
    }
}

impl<R: RestClient> Account<R> {
    /// Balances per currency; an empty `currencies` slice returns every currency
    #[instrument(skip(self))]
    pub async fn balances(
        &self,
        currencies: &[&str],
        non_zero_only: Option<bool>,
    ) -> Result<Vec<Balance>, ExchangeError> {
        let query = QueryString::new()
            .push_list("currency", currencies)
            .push_opt("nonZeroOnly", non_zero_only);
        self.rest.get_json("account/balance", &query, true).await
    }

    /// Deposit address, plus payment id where the currency needs one (R3)
    #[instrument(skip(self))]
    pub async fn deposit_address(&self, currency: &str) -> Result<DepositAddress, ExchangeError> {
        let query = QueryString::new().push("currency", currency);
        self.rest.get_json("account/depositAddress", &query, true).await
    }

    #[instrument(skip(self))]
    pub async fn money_transfers(
        &self,
        filter: &MoneyTransferFilter,
    ) -> Result<Vec<MoneyTransfer>, ExchangeError> {
        let query = QueryString::new()
            .push_opt("type", filter.transfer_type)
            .push_list("currency", &filter.currencies)
            .push_time("from", filter.from.as_ref())
            .push_time("till", filter.till.as_ref())
            .push_opt("limit", filter.limit);
        self.rest.get_json("account/moneyTransfers", &query, true).await
    }

    #[instrument(skip(self))]
    pub async fn money_transfer_status(
        &self,
        ids: &[u64],
    ) -> Result<Vec<MoneyTransfer>, ExchangeError> {
        let query = QueryString::new().push_list("id", ids);
        self.rest
            .get_json("account/moneyTransferStatus", &query, true)
            .await
    }

    /// Fee and payout a withdrawal would have, without sending anything
    #[instrument(skip(self))]
    pub async fn preview_withdrawal(
        &self,
        currency: &str,
        amount: f64,
        include_fee: Option<bool>,
    ) -> Result<WithdrawalPreview, ExchangeError> {
        let query = QueryString::new()
            .push("currency", currency)
            .push("amount", amount)
            .push_opt("includeFee", include_fee);
        self.rest
            .get_json("account/previewWithdrawal", &query, true)
            .await
    }

    /// Send `amount` of `currency` to an external address (requires R4 access)
    #[instrument(skip(self, address, payment_id))]
    pub async fn withdraw(
        &self,
        currency: &str,
        amount: f64,
        address: &str,
        payment_id: Option<&str>,
        include_fee: Option<bool>,
    ) -> Result<MoneyTransfer, ExchangeError> {
        let body = JsonBody::encode(&json!({
            "currency": currency,
            "amount": amount,
            "address": address,
            "paymentId": payment_id,
            "includeFee": include_fee,
        }))?;
        self.rest.post_json("account/withdraw", &body, true).await
    }
}
