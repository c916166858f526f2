//! Show the latest stored stock index quotes.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use rg_sync::Store;

pub fn run() -> Result<(), String> {
    let config = super::load_config()?;
    let store = super::open_store(&config)?;
    show(&store)
}

/// Render the latest index quotes from `store`.
pub fn show(store: &Store) -> Result<(), String> {
    let quotes = store.latest_index_quotes().map_err(|e| e.to_string())?;
    if quotes.is_empty() {
        super::print_missing("stock index");
        return Ok(());
    }

    println!("{}", "  === STOCK INDEXES ===".cyan().bold());

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Symbol", "Level", "Change", "Change %", "Volume"]);

    for quote in &quotes {
        let percent = quote
            .percent_change()
            .map(super::format_change)
            .unwrap_or_else(|| "—".to_string());
        let volume = quote
            .volume
            .map(|v| v.to_string())
            .unwrap_or_else(|| "—".to_string());
        table.add_row(vec![
            quote.symbol.clone(),
            format!("{:.2}", quote.price),
            super::format_change_abs(quote.change),
            percent,
            volume,
        ]);
    }

    println!("{table}");
    Ok(())
}
