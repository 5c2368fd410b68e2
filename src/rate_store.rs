//! The rate store: latest fetched rate table, fetch status and the user's
//! selected base currency.

use crate::core::preferences::{Preferences, SELECTED_CURRENCY_KEY};
use crate::core::rates::StoreState;
use crate::core::source::RateSource;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch currency rates";

struct Inner {
    state: Mutex<StoreState>,
    source: Arc<dyn RateSource>,
    preferences: Arc<dyn Preferences>,
    latest_request: AtomicU64,
}

impl Inner {
    // Never held across an await
    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_latest(&self, request_id: u64) -> bool {
        request_id == self.latest_request.load(Ordering::SeqCst)
    }
}

/// Clears `loading` if a fetch is dropped before its response is applied,
/// unless a newer fetch has taken over.
struct InFlight<'a> {
    inner: &'a Inner,
    request_id: u64,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.inner.state();
        if self.inner.is_latest(self.request_id) {
            debug!(request_id = self.request_id, "Rates fetch cancelled");
            state.loading = false;
        }
    }
}

/// Shared handle to the store. Clones observe and mutate the same state.
#[derive(Clone)]
pub struct RateStore {
    inner: Arc<Inner>,
}

impl RateStore {
    pub fn new(source: Arc<dyn RateSource>, preferences: Arc<dyn Preferences>) -> Self {
        Self::with_state(StoreState::default(), source, preferences)
    }

    pub fn with_state(
        state: StoreState,
        source: Arc<dyn RateSource>,
        preferences: Arc<dyn Preferences>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                source,
                preferences,
                latest_request: AtomicU64::new(0),
            }),
        }
    }

    /// Replaces the rate table with a fresh copy from the source.
    ///
    /// Failures are recorded in `error` and logged; the previous rates stay
    /// in place. When fetches overlap, only the most recently started one is
    /// applied.
    pub async fn fetch_rates(&self) {
        let request_id = self.inner.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.inner.state();
            state.loading = true;
            state.error = None;
        }
        let mut in_flight = InFlight {
            inner: &self.inner,
            request_id,
            settled: false,
        };
        debug!(request_id, "Fetching currency rates");

        let result = self.inner.source.fetch_rates().await;

        let mut state = self.inner.state();
        in_flight.settled = true;
        if !self.inner.is_latest(request_id) {
            debug!(request_id, "Discarding superseded rates response");
            return;
        }
        match result {
            Ok(rates) => {
                info!(count = rates.len(), "Currency rates updated");
                state.rates = rates;
                state.last_updated = Some(Utc::now());
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch currency rates");
                state.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        state.loading = false;
    }

    /// Selects the base currency and persists the choice. The value is not
    /// validated against the known currencies.
    pub async fn set_currency(&self, currency: &str) {
        self.inner.state().selected_currency = currency.to_string();
        if let Err(e) = self
            .inner
            .preferences
            .set(SELECTED_CURRENCY_KEY, currency)
            .await
        {
            warn!(error = %e, currency, "Failed to persist selected currency");
        }
    }

    pub async fn snapshot(&self) -> StoreState {
        self.inner.state().clone()
    }

    pub async fn selected_currency(&self) -> String {
        self.inner.state().selected_currency.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.state().loading
    }

    pub async fn error(&self) -> Option<String> {
        self.inner.state().error.clone()
    }

    pub async fn current_rate(&self, target_currency: &str) -> Option<f64> {
        self.inner.state().current_rate(target_currency)
    }

    pub async fn rates_for_base_currency(&self) -> BTreeMap<String, f64> {
        self.inner.state().rates_for_base_currency()
    }

    pub async fn available_currencies(&self) -> Vec<String> {
        self.inner.state().available_currencies()
    }
}
