use super::ui;
use crate::core::preferences::{Preferences, SELECTED_CURRENCY_KEY};
use crate::rate_store::RateStore;
use anyhow::Result;

/// Selects a new base currency, or shows the current selection when `code`
/// is `None`.
pub async fn run(
    store: &RateStore,
    preferences: &dyn Preferences,
    code: Option<&str>,
) -> Result<()> {
    if let Some(code) = code {
        store.set_currency(&code.to_lowercase()).await;
        println!("Base currency set to {}", selected_label(store).await);
        return Ok(());
    }

    let saved = preferences.get(SELECTED_CURRENCY_KEY).await?;
    println!("Base currency: {}", selected_label(store).await);
    if let Some(saved) = saved {
        let line = format!("Last saved selection: {}", saved.to_uppercase());
        println!("{}", ui::style_text(&line, ui::StyleType::Subtle));
    }
    Ok(())
}

async fn selected_label(store: &RateStore) -> String {
    let selected = store.selected_currency().await.to_uppercase();
    ui::style_text(&selected, ui::StyleType::TotalLabel)
}
