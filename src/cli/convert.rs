use super::ui;
use crate::core::Converter;
use crate::core::currency::parse_code;
use anyhow::Result;
use comfy_table::Cell;

/// Runs one conversion. Provided arguments override the remembered
/// inputs; anything omitted keeps the last-used value.
pub async fn run(
    converter: &mut Converter,
    amount: Option<String>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    if let Some(amount) = amount {
        converter.set_amount(&amount).await;
    }
    if let Some(from) = from {
        converter.set_from_currency(&parse_code(&from)?);
    }
    if let Some(to) = to {
        converter.set_to_currency(&parse_code(&to)?).await;
    }

    let spinner = ui::new_spinner("Fetching latest rates...");
    let result = converter.refresh().await;
    spinner.finish_and_clear();
    result?;

    println!("{}", render_result(converter));
    Ok(())
}

/// Exchanges the remembered currency pair and re-converts.
pub async fn swap(converter: &mut Converter) -> Result<()> {
    let spinner = ui::new_spinner("Fetching latest rates...");
    let result = converter.swap().await;
    spinner.finish_and_clear();
    result?;

    println!("{}", render_result(converter));
    Ok(())
}

fn render_result(converter: &Converter) -> String {
    let state = converter.state();

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("From"),
        ui::header_cell("To"),
        ui::header_cell("Rate"),
    ]);
    table.add_row(vec![
        Cell::new(format!("{} {}", state.amount, state.from_currency)),
        ui::value_cell(&format!("{} {}", state.converted_amount, state.to_currency)),
        Cell::new(format!(
            "1 {} = {} {}",
            state.from_currency, state.rate, state.to_currency
        )),
    ]);

    let mut output = table.to_string();
    if let Some(updated) = converter.rates_updated_at() {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!("Rates as of {}", updated.format("%Y-%m-%d %H:%M UTC")),
                ui::StyleType::Subtle
            )
        ));
    }
    output
}
