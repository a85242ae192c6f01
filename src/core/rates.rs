//! Exchange rate tables and the provider abstraction.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::ConvertError;

/// A snapshot of conversion rates for one base currency. Provider
/// responses are cached wholesale; a later target change converts
/// locally instead of refetching.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    /// Currency all rates are expressed against.
    pub base: String,
    /// Units of target currency per one unit of base.
    pub rates: HashMap<String, f64>,
    /// When the provider last refreshed the table, if reported.
    pub updated_at: Option<DateTime<Utc>>,
}

impl RateTable {
    /// Looks up the rate from the table's base to `target`. Missing,
    /// zero, negative, and non-finite entries all count as unavailable.
    pub fn rate_to(&self, target: &str) -> Option<f64> {
        self.rates
            .get(target)
            .copied()
            .filter(|r| r.is_finite() && *r > 0.0)
    }
}

/// Source of live exchange rates.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the full rate table for `base`.
    async fn latest(&self, base: &str) -> Result<RateTable, ConvertError>;
}
