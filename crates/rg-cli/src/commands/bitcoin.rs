//! Show the latest stored Bitcoin snapshot.

use colored::Colorize;

use rg_sync::Store;

pub fn run() -> Result<(), String> {
    let config = super::load_config()?;
    let store = super::open_store(&config)?;
    show(&store)
}

/// Render the latest Bitcoin snapshot from `store`.
pub fn show(store: &Store) -> Result<(), String> {
    let Some(snapshot) = store.latest_bitcoin().map_err(|e| e.to_string())? else {
        super::print_missing("bitcoin");
        return Ok(());
    };

    println!("{}", "  === BITCOIN ===".cyan().bold());
    println!("  Price:      ${:.2}", snapshot.price_usd);
    if let Some(change) = snapshot.percent_change_1h {
        println!("  1h change:  {}", super::format_change(change));
    }
    if let Some(change) = snapshot.percent_change_24h {
        println!("  24h change: {}", super::format_change(change));
    }
    if let Some(updated) = snapshot.last_updated {
        println!("  As of:      {}", updated.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}
