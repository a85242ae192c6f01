pub mod exchange_rate_api;

pub use exchange_rate_api::{DEFAULT_BASE_URL, ExchangeRateApiProvider};
