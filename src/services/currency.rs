//! Currency converter panel backed by exchangerate-api.

use super::{get_json, GuardedState, ServiceError};
use crate::view::Notices;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

const EXCHANGE_RATE_BASE: &str = "https://api.exchangerate-api.com/v4/latest";

/// Latest rates against one base currency.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn rates(&self, base: &str) -> Result<HashMap<String, Decimal>, ServiceError>;
}

#[derive(Debug, Deserialize)]
struct LatestRates {
    rates: HashMap<String, f64>,
}

fn decimal_rates(latest: LatestRates) -> HashMap<String, Decimal> {
    latest
        .rates
        .into_iter()
        .filter_map(|(code, rate)| Decimal::try_from(rate).ok().map(|rate| (code, rate)))
        .collect()
}

#[derive(Debug, Clone)]
pub struct ExchangeRateClient {
    client: Client,
    base_url: String,
}

impl ExchangeRateClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: EXCHANGE_RATE_BASE.to_string(),
        }
    }
}

impl Default for ExchangeRateClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateSource for ExchangeRateClient {
    #[instrument(skip(self))]
    async fn rates(&self, base: &str) -> Result<HashMap<String, Decimal>, ServiceError> {
        let url = format!("{}/{}", self.base_url, base);
        let latest: LatestRates = get_json(&self.client, &url, &[]).await?;
        debug!(count = latest.rates.len(), "Rates fetched");
        Ok(decimal_rates(latest))
    }
}

/// `amount × rate`, rounded to 2 decimals. `None` when the product leaves
/// the `Decimal` range.
pub fn convert(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount.checked_mul(rate).map(|result| result.round_dp(2))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CurrencyState {
    #[default]
    Idle,
    Converted {
        from: String,
        to: String,
        amount: Decimal,
        result: Decimal,
    },
    /// The displayed value is cleared and an error shown.
    Failed(String),
}

/// Converter card of the dashboard.
pub struct CurrencyPanel {
    source: Arc<dyn RateSource>,
    state: GuardedState<CurrencyState>,
    notices: Notices,
}

impl CurrencyPanel {
    pub fn new(source: Arc<dyn RateSource>, notices: Notices) -> Self {
        Self {
            source,
            state: GuardedState::new(CurrencyState::Idle),
            notices,
        }
    }

    pub fn state(&self) -> CurrencyState {
        self.state.get()
    }

    /// Converts `amount` from one code to another. Returns whether this
    /// call's result was applied.
    pub async fn convert(&self, amount: Decimal, from: &str, to: &str) -> bool {
        let from = from.trim().to_uppercase();
        let to = to.trim().to_uppercase();
        let ticket = self.state.begin();

        let outcome = self.source.rates(&from).await.and_then(|rates| {
            let rate = rates
                .get(&to)
                .copied()
                .ok_or_else(|| ServiceError::Response(format!("no rate for {}", to)))?;
            convert(amount, rate)
                .ok_or_else(|| ServiceError::Response("conversion out of range".to_string()))
        });

        let next = match outcome {
            Ok(result) => CurrencyState::Converted {
                result,
                from,
                to,
                amount,
            },
            Err(e) => {
                warn!(error = %e, %from, %to, "Currency conversion failed");
                self.notices.failure(e.kind(), "Failed to convert currency");
                CurrencyState::Failed(e.to_string())
            }
        };
        self.state.finish(ticket, next)
    }
}
