//! One-shot sync of every data source.

use colored::Colorize;

use rg_sync::SyncJob;

pub fn run() -> Result<(), String> {
    let config = super::load_config()?;
    let store = super::open_store(&config)?;
    let job = SyncJob::from_config(&config, store);

    println!("{}", "  Synchronizing reality...".cyan());
    let outcome = job.run_once();

    println!(
        "  {} source(s) synced, {} failed, {} skipped",
        outcome.succeeded.to_string().green(),
        outcome.failed.to_string().red(),
        outcome.skipped,
    );

    if outcome.skipped > 0 {
        println!(
            "{}",
            "  hint: skipped sources have no API key configured (see .env.example)".yellow()
        );
    }
    if !outcome.any_succeeded() && outcome.failed > 0 {
        return Err("every configured source failed to sync".into());
    }
    Ok(())
}
