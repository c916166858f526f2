//! The background poller: sync forever on a fixed interval.

use std::time::Duration;

use colored::Colorize;

use rg_sync::SyncJob;

pub fn run(interval_secs: Option<u64>) -> Result<(), String> {
    let config = super::load_config()?;
    let store = super::open_store(&config)?;
    let job = SyncJob::from_config(&config, store);

    let interval = interval_secs
        .map(Duration::from_secs)
        .unwrap_or(config.sync_interval);
    if interval.is_zero() {
        return Err("poll interval must be at least one second".into());
    }

    println!(
        "{}",
        format!(
            "  Polling every {}s into {} (Ctrl-C to stop)",
            interval.as_secs(),
            config.database_path.display()
        )
        .cyan()
    );
    job.run_forever(interval)
}
