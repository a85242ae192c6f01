use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::core::error::ConvertError;
use crate::core::rates::{RateProvider, RateTable};

/// Public endpoint of ExchangeRate-API v6.
pub const DEFAULT_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";

/// Rate provider backed by ExchangeRate-API's `latest` endpoint:
/// `GET {base_url}/{api_key}/latest/{BASE}` returns the full conversion
/// table for one base currency.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// The key travels in the URL path, so transport errors can echo it
    /// back. Strip it from anything that reaches logs or the user.
    fn redact(&self, message: &str) -> String {
        message.replace(&self.api_key, "<api-key>")
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    #[serde(default)]
    conversion_rates: HashMap<String, f64>,
    time_last_update_unix: Option<i64>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    async fn latest(&self, base: &str) -> Result<RateTable, ConvertError> {
        let url = format!("{}/{}/latest/{}", self.base_url, self.api_key, base);
        debug!(
            "Requesting rates from {}/<api-key>/latest/{}",
            self.base_url, base
        );

        let client = reqwest::Client::builder()
            .user_agent("fxc/0.2")
            .build()
            .map_err(|e| ConvertError::Network(self.redact(&e.to_string())))?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| ConvertError::Network(self.redact(&e.to_string())))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ConvertError::Network(self.redact(&e.to_string())))?;

        // The API reports failures as JSON with an `error-type` field,
        // usually alongside a 4xx status. Decode before checking the
        // status so that message wins over a bare status code.
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|_| ConvertError::Provider(format!("unexpected response (HTTP {status})")))?;

        if data.result != "success" {
            let kind = data
                .error_type
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(ConvertError::Provider(format!(
                "provider reported '{kind}'"
            )));
        }

        debug!(
            "Received {} rates for base {}",
            data.conversion_rates.len(),
            base
        );

        Ok(RateTable {
            base: base.to_string(),
            rates: data.conversion_rates,
            updated_at: data
                .time_last_update_unix
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
        })
    }
}
