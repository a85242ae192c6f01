use super::ui;
use crate::core::currency::SUPPORTED_CURRENCIES;
use comfy_table::Cell;

/// Prints the closed list of currencies the converter supports.
pub fn run() {
    println!("{}", render());
}

fn render() -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Currency")]);
    for (code, name) in SUPPORTED_CURRENCIES {
        table.add_row(vec![Cell::new(*code), Cell::new(*name)]);
    }
    let caption = ui::style_text("Supported currencies", ui::StyleType::Title);
    format!("{caption}\n\n{table}")
}
