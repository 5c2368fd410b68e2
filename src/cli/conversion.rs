use super::{home, ui};
use crate::core::rates::StoreState;
use crate::rate_store::RateStore;
use anyhow::Result;
use comfy_table::Cell;

/// What the user asked the conversion page to convert.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionInput {
    pub amount: f64,
    /// Single target currency; all targets of the base currency when `None`.
    pub target: Option<String>,
}

impl Default for ConversionInput {
    fn default() -> Self {
        Self {
            amount: 1.0,
            target: None,
        }
    }
}

pub async fn run(store: &RateStore, input: &ConversionInput) -> Result<()> {
    home::mount(store).await;
    println!("{}", render(&store.snapshot().await, input));
    Ok(())
}

pub fn render(state: &StoreState, input: &ConversionInput) -> String {
    let base = state.selected_currency.to_uppercase();
    let has_error = state.error.is_some();

    let mut output = format!(
        "Convert {} {}\n\n",
        input.amount,
        ui::style_text(&base, ui::StyleType::Title)
    );

    let rows: Vec<(String, Option<f64>)> = match &input.target {
        Some(target) => {
            let target = target.to_lowercase();
            let rate = state.current_rate(&target);
            vec![(target, rate)]
        }
        None => state
            .rates_for_base_currency()
            .into_iter()
            .map(|(target, rate)| (target, Some(rate)))
            .collect(),
    };

    if rows.is_empty() {
        output.push_str(&format!("No rates available for {base}."));
    } else {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Currency"),
            ui::header_cell("Rate"),
            ui::header_cell("Amount"),
        ]);
        for (target, rate) in rows {
            table.add_row(vec![
                Cell::new(target.to_uppercase()),
                ui::optional_number_cell(rate, 4, has_error),
                ui::optional_number_cell(rate.map(|r| r * input.amount), 2, has_error),
            ]);
        }
        output.push_str(&table.to_string());
    }

    output.push_str(&home::status_lines(state));
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
    fn test_convert_to_single_target() {
        let input = ConversionInput {
            amount: 100.0,
            target: Some("EUR".to_string()),
        };
        let output = console::strip_ansi_codes(&render(&sample_state(), &input)).to_string();

        assert!(output.contains("Convert 100 USD"));
        assert!(output.contains("0.9000"));
        assert!(output.contains("90.00"));
        assert!(!output.contains("GBP"));
    }

    #[test]
    fn test_convert_to_all_targets() {
        let input = ConversionInput {
            amount: 10.0,
            target: None,
        };
        let output = console::strip_ansi_codes(&render(&sample_state(), &input)).to_string();

        assert!(output.contains("9.00"));
        assert!(output.contains("8.00"));
    }

    #[test]
    fn test_convert_missing_pair() {
        let input = ConversionInput {
            amount: 5.0,
            target: Some("jpy".to_string()),
        };
        let output = console::strip_ansi_codes(&render(&sample_state(), &input)).to_string();

        assert!(output.contains("JPY"));
        assert!(output.contains("N/A"));
    }

    #[test]
    fn test_convert_from_other_base() {
        let mut state = sample_state();
        state.selected_currency = "eur".to_string();
        let input = ConversionInput {
            amount: 2.0,
            target: Some("usd".to_string()),
        };
        let output = console::strip_ansi_codes(&render(&state, &input)).to_string();

        assert!(output.contains("Convert 2 EUR"));
        assert!(output.contains("1.1000"));
        assert!(output.contains("2.20"));
    }

    #[test]
    fn test_convert_with_no_rates() {
        let output = render(&StoreState::default(), &ConversionInput::default());
        assert!(console::strip_ansi_codes(&output).contains("No rates available for USD."));
    }
}
