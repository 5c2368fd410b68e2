//! Rate table types and the views derived from it.
//!
//! Rates are keyed by a pair key of the form `"<base>-<target>"`, e.g.
//! `"usd-eur"`. The format is a contract with the rates API and is kept as a
//! flat string rather than a structured key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::config::DEFAULT_CURRENCY;

/// Flat mapping of pair keys to rates, as returned by the rates API.
pub type RateTable = HashMap<String, f64>;

pub const PAIR_SEPARATOR: char = '-';

/// Builds the pair key for a `base` to `target` rate.
pub fn pair_key(base: &str, target: &str) -> String {
    format!("{base}{PAIR_SEPARATOR}{target}")
}

/// Returns the base component of a pair key: everything before the first
/// separator, or the whole key if there is none.
pub fn base_of(key: &str) -> &str {
    key.split(PAIR_SEPARATOR).next().unwrap_or(key)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    pub rates: RateTable,
    pub selected_currency: String,
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self::with_currency(DEFAULT_CURRENCY)
    }
}

impl StoreState {
    pub fn with_currency(currency: &str) -> Self {
        Self {
            rates: RateTable::new(),
            selected_currency: currency.to_string(),
            loading: false,
            error: None,
            last_updated: None,
        }
    }

    /// Rate from the selected currency to `target_currency`, if the pair is
    /// present.
    pub fn current_rate(&self, target_currency: &str) -> Option<f64> {
        let key = pair_key(&self.selected_currency, target_currency);
        self.rates.get(&key).copied()
    }

    /// All rates quoted against the selected currency, keyed by target.
    pub fn rates_for_base_currency(&self) -> BTreeMap<String, f64> {
        let prefix = pair_key(&self.selected_currency, "");
        self.rates
            .iter()
            .filter_map(|(key, rate)| {
                key.strip_prefix(&prefix)
                    .map(|target| (target.to_string(), *rate))
            })
            .collect()
    }

    /// Sorted, de-duplicated list of base currencies present in the table.
    pub fn available_currencies(&self) -> Vec<String> {
        self.rates
            .keys()
            .map(|key| base_of(key))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> StoreState {
        let mut state = StoreState::default();
        state.rates = RateTable::from([
            ("usd-eur".to_string(), 0.9),
            ("usd-gbp".to_string(), 0.8),
            ("eur-usd".to_string(), 1.1),
        ]);
        state
    }

    #[test]
    fn test_default_state() {
        let state = StoreState::default();
        assert!(state.rates.is_empty());
        assert_eq!(state.selected_currency, "usd");
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(state.last_updated.is_none());
    }

    #[test]
    fn test_pair_key() {
        assert_eq!(pair_key("usd", "eur"), "usd-eur");
        assert_eq!(base_of("usd-eur"), "usd");
        assert_eq!(base_of("btc-usd-perp"), "btc");
        assert_eq!(base_of("nodash"), "nodash");
    }

    #[test]
    fn test_current_rate() {
        let state = sample_state();
        assert_eq!(state.current_rate("eur"), Some(0.9));
        assert_eq!(state.current_rate("gbp"), Some(0.8));
        assert_eq!(state.current_rate("jpy"), None);
        assert_eq!(state.current_rate("usd"), None);
    }

    #[test]
    fn test_current_rate_follows_selected_currency() {
        let mut state = sample_state();
        state.selected_currency = "eur".to_string();
        assert_eq!(state.current_rate("usd"), Some(1.1));
        assert_eq!(state.current_rate("eur"), None);
    }

    #[test]
    fn test_current_rate_keeps_zero() {
        let mut state = StoreState::default();
        state.rates.insert("usd-xyz".to_string(), 0.0);
        assert_eq!(state.current_rate("xyz"), Some(0.0));
    }

    #[test]
    fn test_rates_for_base_currency() {
        let state = sample_state();
        let rates = state.rates_for_base_currency();
        assert_eq!(
            rates,
            BTreeMap::from([("eur".to_string(), 0.9), ("gbp".to_string(), 0.8)])
        );
    }

    #[test]
    fn test_rates_for_base_currency_requires_full_prefix() {
        let mut state = StoreState::default();
        state.rates = RateTable::from([
            ("usd-eur".to_string(), 0.9),
            ("usdt-eur".to_string(), 0.91),
            ("usd".to_string(), 1.0),
        ]);
        let rates = state.rates_for_base_currency();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates.get("eur"), Some(&0.9));
    }

    #[test]
    fn test_available_currencies() {
        let state = sample_state();
        assert_eq!(state.available_currencies(), vec!["eur", "usd"]);
    }

    #[test]
    fn test_available_currencies_empty() {
        let state = StoreState::default();
        assert!(state.available_currencies().is_empty());
        assert!(state.rates_for_base_currency().is_empty());
    }
}
