use crate::core::rates::RateTable;
use crate::core::source::{FetchError, RateSource};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Fetches the full rate table with a single GET to a fixed endpoint.
pub struct HttpRateSource {
    url: String,
    client: reqwest::Client,
}

impl HttpRateSource {
    pub fn new(url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("xrates/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    #[instrument(name = "RatesFetch", skip(self), fields(url = %self.url))]
    async fn fetch_rates(&self) -> Result<RateTable, FetchError> {
        debug!("Requesting currency rates");

        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let text = response.text().await?;
        let rates: RateTable = match serde_json::from_str(&text) {
            Ok(rates) => rates,
            Err(e) => {
                debug!(
                    error = ?e,
                    response = %text,
                    "Failed to parse currency rates response"
                );
                return Err(e.into());
            }
        };

        debug!(count = rates.len(), "Received currency rates");
        Ok(rates)
    }
}
