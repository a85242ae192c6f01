//! Last-used conversion inputs, persisted across runs.

use async_trait::async_trait;

use crate::core::ConversionState;
use crate::core::currency::is_supported;

pub const KEY_AMOUNT: &str = "lastAmount";
pub const KEY_FROM_CURRENCY: &str = "lastFromCurrency";
pub const KEY_TO_CURRENCY: &str = "lastToCurrency";

/// Key-value storage for user preferences. Persistence is best-effort:
/// implementations log failures and return `None` or drop the write, so
/// a broken store never breaks a conversion.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str);
}

/// The persisted slice of [`ConversionState`]. Each field is optional so
/// a first run (or a partially written store) falls back to defaults
/// field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    pub amount: Option<String>,
    pub from_currency: Option<String>,
    pub to_currency: Option<String>,
}

impl Preferences {
    /// Reads all preference keys from the store.
    pub async fn load(store: &dyn PreferenceStore) -> Self {
        Self {
            amount: store.get(KEY_AMOUNT).await,
            from_currency: store.get(KEY_FROM_CURRENCY).await,
            to_currency: store.get(KEY_TO_CURRENCY).await,
        }
    }

    /// Writes the state's inputs back to the store.
    pub async fn save(state: &ConversionState, store: &dyn PreferenceStore) {
        store.set(KEY_AMOUNT, &state.amount).await;
        store.set(KEY_FROM_CURRENCY, &state.from_currency).await;
        store.set(KEY_TO_CURRENCY, &state.to_currency).await;
    }

    /// Overlays the stored values onto `state`. Missing fields keep the
    /// defaults; stored currency codes that are no longer supported are
    /// ignored rather than restored.
    pub fn apply(&self, state: &mut ConversionState) {
        if let Some(amount) = &self.amount {
            state.amount = amount.clone();
        }
        if let Some(from) = &self.from_currency
            && is_supported(from)
        {
            state.from_currency = from.to_uppercase();
        }
        if let Some(to) = &self.to_currency
            && is_supported(to)
        {
            state.to_currency = to.to_uppercase();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn test_load_missing_keys() {
        let store = MemoryStore::new();
        let prefs = Preferences::load(&store).await;
        assert_eq!(prefs, Preferences::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        let state = ConversionState {
            amount: "42.5".to_string(),
            from_currency: "EUR".to_string(),
            to_currency: "GBP".to_string(),
            ..Default::default()
        };

        Preferences::save(&state, &store).await;

        let prefs = Preferences::load(&store).await;
        assert_eq!(prefs.amount.as_deref(), Some("42.5"));
        assert_eq!(prefs.from_currency.as_deref(), Some("EUR"));
        assert_eq!(prefs.to_currency.as_deref(), Some("GBP"));
    }

    #[test]
    fn test_apply_overlays_stored_values() {
        let prefs = Preferences {
            amount: Some("7".to_string()),
            from_currency: Some("CHF".to_string()),
            to_currency: None,
        };
        let mut state = ConversionState::default();

        prefs.apply(&mut state);

        assert_eq!(state.amount, "7");
        assert_eq!(state.from_currency, "CHF");
        // Missing key keeps the default.
        assert_eq!(state.to_currency, "USD");
    }

    #[test]
    fn test_apply_skips_unsupported_currency() {
        let prefs = Preferences {
            amount: None,
            from_currency: Some("XAU".to_string()),
            to_currency: Some("eur".to_string()),
        };
        let mut state = ConversionState::default();

        prefs.apply(&mut state);

        assert_eq!(state.from_currency, "INR");
        // Codes are matched case-insensitively and canonicalized.
        assert_eq!(state.to_currency, "EUR");
    }
}
