pub mod bitcoin;
pub mod play;
pub mod poll;
pub mod saves;
pub mod stocks;
pub mod sync;
pub mod weather;

use colored::Colorize;

use rg_core::Config;
use rg_sync::Store;

/// Load configuration from the environment.
pub fn load_config() -> Result<Config, String> {
    Config::from_env().map_err(|e| e.to_string())
}

/// Open the configured database.
pub fn open_store(config: &Config) -> Result<Store, String> {
    Store::open(&config.database_path)
        .map_err(|e| format!("cannot open database {}: {e}", config.database_path.display()))
}

/// Print a themed line for data that is not there. The game treats a
/// missing reading as an in-fiction anomaly, not a stack trace.
pub fn print_missing(what: &str) {
    println!(
        "{}",
        format!("  REALITY DISTORTION: no {what} reading found. Run `rg sync` to stabilize.")
            .red()
    );
}

/// Render a percent change with a sign and a color to match.
pub fn format_change(change: f64) -> String {
    let text = format!("{change:+.2}%");
    if change >= 0.0 {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}

/// Render an absolute change with a sign and a color to match.
pub fn format_change_abs(change: f64) -> String {
    let text = format!("{change:+.2}");
    if change >= 0.0 {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}
