//! The conversion controller: owns the screen state, fetches rate tables
//! and persists the last-used inputs.

use std::mem;
use std::sync::Arc;

use tracing::debug;

use crate::core::error::ConvertError;
use crate::core::prefs::{PreferenceStore, Preferences};
use crate::core::rates::{RateProvider, RateTable};
use crate::core::state::{ConversionState, convert};

/// Drives a single conversion screen. Amount and target changes recompute
/// locally from the cached rate table; a base change or a swap invalidates
/// the table, and [`Converter::refresh`] is the one operation that talks
/// to the provider.
///
/// Fetching operations take `&mut self` and await inline, so calls are
/// serialized per converter and a slow response can never overwrite the
/// result of a later one.
pub struct Converter {
    state: ConversionState,
    /// Cached provider response. Always keyed to `state.from_currency`;
    /// anything that changes the base clears it.
    table: Option<RateTable>,
    provider: Arc<dyn RateProvider>,
    store: Arc<dyn PreferenceStore>,
}

impl Converter {
    /// Creates a converter with default state overlaid by whatever inputs
    /// the store remembers from the last run. Does not fetch rates.
    pub async fn restore(
        provider: Arc<dyn RateProvider>,
        store: Arc<dyn PreferenceStore>,
    ) -> Self {
        let mut state = ConversionState::default();
        Preferences::load(store.as_ref()).await.apply(&mut state);
        debug!(
            "Restored inputs: {} {} -> {}",
            state.amount, state.from_currency, state.to_currency
        );
        Self {
            state,
            table: None,
            provider,
            store,
        }
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    /// When the current table was fetched, per the provider.
    pub fn rates_updated_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.table.as_ref().and_then(|t| t.updated_at)
    }

    /// Updates the amount verbatim; partial or non-numeric text is kept
    /// as typed. Recomputes the converted value locally when a table for
    /// the current pair is cached.
    pub async fn set_amount(&mut self, value: &str) {
        self.state.amount = value.to_string();
        self.recompute_from_table().await;
    }

    /// Changes the base currency. The cached table belongs to the old
    /// base, so it is dropped; the displayed values stay until the next
    /// [`Converter::refresh`].
    pub fn set_from_currency(&mut self, code: &str) {
        if self.state.from_currency != code {
            self.state.from_currency = code.to_string();
            self.table = None;
        }
    }

    /// Changes the target currency. The cached table covers every
    /// supported target for the current base, so this recomputes locally
    /// without a fetch.
    pub async fn set_to_currency(&mut self, code: &str) {
        self.state.to_currency = code.to_string();
        self.recompute_from_table().await;
    }

    /// Exchanges the currency pair. The table was keyed to the old base,
    /// so this always refetches.
    pub async fn swap(&mut self) -> Result<(), ConvertError> {
        mem::swap(&mut self.state.from_currency, &mut self.state.to_currency);
        self.table = None;
        self.refresh().await
    }

    /// The explicit convert action: one provider call for the current
    /// base, then rate lookup, recompute and preference save. `loading`
    /// is visible to the presentation layer for the duration and is
    /// cleared on every exit path.
    pub async fn refresh(&mut self) -> Result<(), ConvertError> {
        self.state.loading = true;
        let result = self.fetch_and_convert().await;
        self.state.loading = false;
        result
    }

    async fn fetch_and_convert(&mut self) -> Result<(), ConvertError> {
        debug!("Fetching rates for base {}", self.state.from_currency);
        let table = self.provider.latest(&self.state.from_currency).await?;
        let rate = table.rate_to(&self.state.to_currency);
        // The fetch succeeded, so the table is current for this base even
        // if the target turns out to be missing from it.
        self.table = Some(table);

        let Some(rate) = rate else {
            return Err(ConvertError::RateUnavailable {
                from: self.state.from_currency.clone(),
                to: self.state.to_currency.clone(),
            });
        };

        self.state.rate = rate;
        self.state.converted_amount = convert(&self.state.amount, rate);
        Preferences::save(&self.state, self.store.as_ref()).await;
        Ok(())
    }

    async fn recompute_from_table(&mut self) {
        let Some(rate) = self
            .table
            .as_ref()
            .and_then(|t| t.rate_to(&self.state.to_currency))
        else {
            return;
        };
        self.state.rate = rate;
        self.state.converted_amount = convert(&self.state.amount, rate);
        Preferences::save(&self.state, self.store.as_ref()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockProvider {
        tables: HashMap<String, HashMap<String, f64>>,
        call_count: AtomicUsize,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                tables: HashMap::new(),
                call_count: AtomicUsize::new(0),
            }
        }

        fn with_table(mut self, base: &str, rates: &[(&str, f64)]) -> Self {
            self.tables.insert(
                base.to_string(),
                rates.iter().map(|(c, r)| (c.to_string(), *r)).collect(),
            );
            self
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateProvider for MockProvider {
        async fn latest(&self, base: &str) -> Result<RateTable, ConvertError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            match self.tables.get(base) {
                Some(rates) => Ok(RateTable {
                    base: base.to_string(),
                    rates: rates.clone(),
                    updated_at: None,
                }),
                None => Err(ConvertError::Provider("unknown-code".to_string())),
            }
        }
    }

    async fn converter_with(provider: Arc<MockProvider>) -> Converter {
        Converter::restore(provider, Arc::new(MemoryStore::new())).await
    }

    #[tokio::test]
    async fn test_refresh_converts_and_saves() {
        let provider = Arc::new(MockProvider::new().with_table("USD", &[("EUR", 0.85)]));
        let store = Arc::new(MemoryStore::new());
        let mut converter = Converter::restore(provider, store.clone()).await;
        converter.set_amount("10").await;
        converter.set_from_currency("USD");
        converter.set_to_currency("EUR").await;

        converter.refresh().await.unwrap();

        let state = converter.state();
        assert_eq!(state.converted_amount, "8.50");
        assert_eq!(state.rate, 0.85);
        assert!(!state.loading);
        assert_eq!(store.get("lastAmount").await.as_deref(), Some("10"));
        assert_eq!(store.get("lastFromCurrency").await.as_deref(), Some("USD"));
        assert_eq!(store.get("lastToCurrency").await.as_deref(), Some("EUR"));
    }

    #[tokio::test]
    async fn test_refresh_provider_error_keeps_state() {
        let provider = Arc::new(MockProvider::new());
        let store = Arc::new(MemoryStore::new());
        let mut converter = Converter::restore(provider, store.clone()).await;
        converter.set_amount("10").await;

        let err = converter.refresh().await.unwrap_err();

        assert!(matches!(err, ConvertError::Provider(_)));
        let state = converter.state();
        assert!(!state.loading);
        assert_eq!(state.converted_amount, "0");
        assert_eq!(state.rate, 1.0);
        // Nothing was saved for a failed conversion.
        assert!(store.get("lastAmount").await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_missing_target_rate() {
        let provider = Arc::new(MockProvider::new().with_table("INR", &[("EUR", 0.011)]));
        let mut converter = converter_with(provider.clone()).await;
        converter.set_amount("100").await;

        // Default target USD is absent from the table.
        let err = converter.refresh().await.unwrap_err();

        assert!(matches!(
            err,
            ConvertError::RateUnavailable { ref from, ref to } if from == "INR" && to == "USD"
        ));
        let state = converter.state();
        assert!(!state.loading);
        assert_eq!(state.converted_amount, "0");

        // The fetched table was still installed: picking a covered target
        // converts locally without another provider call.
        converter.set_to_currency("EUR").await;
        assert_eq!(converter.state().converted_amount, "1.10");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_swap_refetches_and_swap_twice_restores_pair() {
        let provider = Arc::new(
            MockProvider::new()
                .with_table("INR", &[("USD", 0.012)])
                .with_table("USD", &[("INR", 83.0)]),
        );
        let mut converter = converter_with(provider.clone()).await;
        converter.refresh().await.unwrap();
        assert_eq!(provider.calls(), 1);

        converter.swap().await.unwrap();
        assert_eq!(converter.state().from_currency, "USD");
        assert_eq!(converter.state().to_currency, "INR");
        assert_eq!(converter.state().rate, 83.0);
        assert_eq!(provider.calls(), 2);

        converter.swap().await.unwrap();
        assert_eq!(converter.state().from_currency, "INR");
        assert_eq!(converter.state().to_currency, "USD");
        assert_eq!(converter.state().rate, 0.012);
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_amount_change_recomputes_without_fetch() {
        let provider = Arc::new(MockProvider::new().with_table("INR", &[("USD", 0.012)]));
        let mut converter = converter_with(provider.clone()).await;
        converter.refresh().await.unwrap();
        assert_eq!(converter.state().converted_amount, "0.01");

        converter.set_amount("1000").await;

        assert_eq!(converter.state().converted_amount, "12.00");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_target_change_recomputes_without_fetch() {
        let provider = Arc::new(
            MockProvider::new().with_table("USD", &[("EUR", 0.85), ("GBP", 0.75)]),
        );
        let mut converter = converter_with(provider.clone()).await;
        converter.set_amount("10").await;
        converter.set_from_currency("USD");
        converter.set_to_currency("EUR").await;
        converter.refresh().await.unwrap();
        assert_eq!(converter.state().converted_amount, "8.50");

        converter.set_to_currency("GBP").await;

        assert_eq!(converter.state().converted_amount, "7.50");
        assert_eq!(converter.state().rate, 0.75);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_base_change_invalidates_table() {
        let provider = Arc::new(
            MockProvider::new()
                .with_table("USD", &[("EUR", 0.85)])
                .with_table("GBP", &[("EUR", 1.15)]),
        );
        let mut converter = converter_with(provider.clone()).await;
        converter.set_amount("10").await;
        converter.set_from_currency("USD");
        converter.set_to_currency("EUR").await;
        converter.refresh().await.unwrap();

        converter.set_from_currency("GBP");
        // No table for the new base, so amount edits do not recompute.
        converter.set_amount("20").await;
        assert_eq!(converter.state().converted_amount, "8.50");
        assert_eq!(provider.calls(), 1);

        converter.refresh().await.unwrap();
        assert_eq!(converter.state().converted_amount, "23.00");
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_restore_applies_saved_inputs() {
        let store = Arc::new(MemoryStore::new());
        store.set("lastAmount", "250").await;
        store.set("lastFromCurrency", "EUR").await;
        store.set("lastToCurrency", "JPY").await;

        let converter = Converter::restore(Arc::new(MockProvider::new()), store).await;

        let state = converter.state();
        assert_eq!(state.amount, "250");
        assert_eq!(state.from_currency, "EUR");
        assert_eq!(state.to_currency, "JPY");
        assert_eq!(state.converted_amount, "0");
    }

    #[tokio::test]
    async fn test_restore_empty_store_uses_defaults() {
        let converter = converter_with(Arc::new(MockProvider::new())).await;
        assert_eq!(converter.state(), &ConversionState::default());
    }

    #[tokio::test]
    async fn test_non_numeric_amount_converts_to_zero() {
        let provider = Arc::new(MockProvider::new().with_table("INR", &[("USD", 0.012)]));
        let mut converter = converter_with(provider).await;
        converter.set_amount("not a number").await;

        converter.refresh().await.unwrap();

        assert_eq!(converter.state().converted_amount, "0");
        assert_eq!(converter.state().rate, 0.012);
    }
}
