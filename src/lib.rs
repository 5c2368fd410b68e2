pub mod cli;
pub mod core;
pub mod providers;
pub mod rate_store;
pub mod router;
pub mod store;

use crate::cli::conversion::ConversionInput;
use crate::core::config::AppConfig;
use crate::core::preferences::Preferences;
use crate::core::rates::StoreState;
use crate::rate_store::RateStore;
use crate::router::{History, Page, Router};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Home,
    Convert(ConversionInput),
    /// Opens whichever page the location routes to.
    Open(String),
    Currency(Option<String>),
}

/// One application session: the rate store, the preference store it writes
/// to and the navigation history.
pub struct App {
    store: RateStore,
    preferences: Arc<dyn Preferences>,
    history: History,
}

impl App {
    pub fn new(store: RateStore, preferences: Arc<dyn Preferences>, router: Router) -> Self {
        Self {
            store,
            preferences,
            history: History::new(router),
        }
    }

    /// Wires the HTTP rate source and disk preferences described by `config`.
    /// `currency` overrides the configured base currency.
    pub fn from_config(config: &AppConfig, currency: Option<&str>) -> Result<Self> {
        let source = providers::HttpRateSource::new(&config.provider.url)
            .context("Failed to create HTTP client")?;
        let preferences_path = config.default_data_path()?.join("preferences");
        let preferences: Arc<dyn Preferences> =
            Arc::new(store::DiskPreferences::open(&preferences_path)?);

        let selected = currency.unwrap_or(&config.currency).to_lowercase();
        let store = RateStore::with_state(
            StoreState::with_currency(&selected),
            Arc::new(source),
            Arc::clone(&preferences),
        );

        Ok(Self::new(
            store,
            preferences,
            Router::with_base(&config.base_path),
        ))
    }

    pub fn store(&self) -> &RateStore {
        &self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Navigates to `location` and mounts the page it routes to.
    pub async fn navigate(&mut self, location: &str, input: &ConversionInput) -> Result<Page> {
        let page = self.history.push(location)?.page;
        debug!(location, %page, "Navigated");
        match page {
            Page::Home => cli::home::run(&self.store).await?,
            Page::Conversion => cli::conversion::run(&self.store, input).await?,
        }
        Ok(page)
    }

    async fn navigate_to(&mut self, name: &str, input: &ConversionInput) -> Result<Page> {
        let router = self.history.router();
        let location = router
            .resolve_name(name)
            .map(|route| router.href(route))
            .with_context(|| format!("No route named {name}"))?;
        self.navigate(&location, input).await
    }

    pub async fn run(&mut self, command: AppCommand) -> Result<()> {
        match command {
            AppCommand::Home => {
                self.navigate_to("home", &ConversionInput::default())
                    .await?;
            }
            AppCommand::Convert(input) => {
                self.navigate_to("conversion", &input).await?;
            }
            AppCommand::Open(location) => {
                self.navigate(&location, &ConversionInput::default())
                    .await?;
            }
            AppCommand::Currency(code) => {
                cli::currency::run(&self.store, self.preferences.as_ref(), code.as_deref())
                    .await?;
            }
        }
        Ok(())
    }
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    currency: Option<&str>,
) -> Result<()> {
    info!("Currency rates starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let mut app = App::from_config(&config, currency)?;
    app.run(command).await
}
