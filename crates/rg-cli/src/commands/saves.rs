//! List saved games.

use comfy_table::{ContentArrangement, Table};

use rg_story::SaveManager;

pub fn run() -> Result<(), String> {
    let config = super::load_config()?;
    let manager = SaveManager::new(&config.save_dir).map_err(|e| e.to_string())?;

    let saves = manager.list().map_err(|e| e.to_string())?;
    if saves.is_empty() {
        println!("  No saved games in {}.", config.save_dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Saved", "Title", "Story so far"]);

    for save in &saves {
        let preview: String = save.summary.chars().take(60).collect();
        table.add_row(vec![
            save.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            save.title.clone(),
            preview,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} save(s)", saves.len());
    Ok(())
}
