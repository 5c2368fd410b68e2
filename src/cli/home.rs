use super::ui;
use crate::core::rates::StoreState;
use crate::rate_store::RateStore;
use anyhow::Result;
use comfy_table::Cell;

/// Triggers the page's fetch, with a spinner for as long as the store is
/// loading.
pub async fn mount(store: &RateStore) {
    let spinner = ui::new_spinner("Fetching currency rates");
    store.fetch_rates().await;
    spinner.finish_and_clear();
}

pub async fn run(store: &RateStore) -> Result<()> {
    mount(store).await;
    println!("{}", render(&store.snapshot().await));
    Ok(())
}

/// Shared page footer: fetch error, if any, and the time of the last update.
pub(crate) fn status_lines(state: &StoreState) -> String {
    let mut output = String::new();
    if let Some(error) = &state.error {
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(error, ui::StyleType::Error)
        ));
    }
    if let Some(updated) = state.last_updated {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!("Rates updated at {}", updated.format("%Y-%m-%d %H:%M:%S UTC")),
                ui::StyleType::Subtle
            )
        ));
    }
    output
}

pub fn render(state: &StoreState) -> String {
    let base = state.selected_currency.to_uppercase();
    let mut output = format!(
        "Rates for {}\n\n",
        ui::style_text(&base, ui::StyleType::Title)
    );

    let rates = state.rates_for_base_currency();
    if rates.is_empty() {
        output.push_str(&format!("No rates available for {base}."));
    } else {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Currency"),
            ui::header_cell(&format!("Rate (1 {base})")),
        ]);
        for (target, rate) in &rates {
            table.add_row(vec![Cell::new(target.to_uppercase()), ui::number_cell(*rate, 4)]);
        }
        output.push_str(&table.to_string());
    }

    let currencies = state.available_currencies();
    if !currencies.is_empty() {
        output.push_str(&format!(
            "\n\n{}: {}",
            ui::style_text("Available base currencies", ui::StyleType::TotalLabel),
            currencies.join(", ")
        ));
    }

    output.push_str(&status_lines(state));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::RateTable;

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
    fn test_render_lists_base_rates() {
        let output = console::strip_ansi_codes(&render(&sample_state())).to_string();

        assert!(output.contains("Rates for USD"));
        assert!(output.contains("EUR"));
        assert!(output.contains("0.9000"));
        assert!(output.contains("GBP"));
        assert!(output.contains("0.8000"));
        assert!(!output.contains("1.1000"));
        assert!(output.contains("Available base currencies: eur, usd"));
    }

    #[test]
    fn test_render_orders_targets() {
        let output = console::strip_ansi_codes(&render(&sample_state())).to_string();
        let eur = output.find("EUR").unwrap();
        let gbp = output.find("GBP").unwrap();
        assert!(eur < gbp);
    }

    #[test]
    fn test_render_empty_with_error() {
        let mut state = StoreState::default();
        state.error = Some("Failed to fetch currency rates".to_string());

        let output = console::strip_ansi_codes(&render(&state)).to_string();

        assert!(output.contains("No rates available for USD."));
        assert!(output.contains("Failed to fetch currency rates"));
        assert!(!output.contains("Available base currencies"));
        assert!(!output.contains("Rates updated at"));
    }

    #[test]
    fn test_render_stale_rates_with_error() {
        let mut state = sample_state();
        state.error = Some("Failed to fetch currency rates".to_string());
        state.last_updated = Some(chrono::Utc::now());

        let output = console::strip_ansi_codes(&render(&state)).to_string();

        assert!(output.contains("0.9000"));
        assert!(output.contains("Failed to fetch currency rates"));
        assert!(output.contains("Rates updated at"));
    }
}
