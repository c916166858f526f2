//! Arrow-key menus for saving and loading.

use colored::Colorize;
use crossterm::event::KeyCode;

use rg_story::{SaveManager, SaveMeta};

use super::display;
use super::input;

/// Outcome of the save menu.
pub enum SaveChoice {
    /// Write a brand-new save file.
    New,
    /// Overwrite the save with this id.
    Overwrite(String),
    /// Player backed out.
    Cancel,
}

/// Outcome of the load menu.
pub enum LoadChoice {
    /// Load the save with this id.
    Load(String),
    /// Player backed out.
    Cancel,
}

/// Run the save menu: "new save" plus every existing slot.
pub fn save_menu(saves: &SaveManager) -> Result<SaveChoice, String> {
    let existing = saves.list().map_err(|e| e.to_string())?;
    let mut labels = vec!["< new save >".to_string()];
    labels.extend(existing.iter().map(describe));

    match pick("SAVE STORY", &labels)? {
        None => Ok(SaveChoice::Cancel),
        Some(0) => Ok(SaveChoice::New),
        Some(i) => Ok(SaveChoice::Overwrite(existing[i - 1].id.clone())),
    }
}

/// Run the load menu over the existing slots.
pub fn load_menu(saves: &SaveManager) -> Result<LoadChoice, String> {
    let existing = saves.list().map_err(|e| e.to_string())?;
    if existing.is_empty() {
        display::notice("No saved games yet.");
        return Ok(LoadChoice::Cancel);
    }
    let labels: Vec<String> = existing.iter().map(describe).collect();

    match pick("LOAD STORY", &labels)? {
        None => Ok(LoadChoice::Cancel),
        Some(i) => Ok(LoadChoice::Load(existing[i].id.clone())),
    }
}

/// One menu line per save: timestamp, title, story excerpt.
fn describe(save: &SaveMeta) -> String {
    let preview: String = save.summary.chars().take(40).collect();
    format!(
        "{}  {}  {preview}",
        save.timestamp.format("%Y-%m-%d %H:%M"),
        save.title
    )
}

/// Generic selection loop: arrows move, Enter picks, Esc cancels.
fn pick(heading: &str, labels: &[String]) -> Result<Option<usize>, String> {
    let mut selected = 0usize;
    loop {
        display::clear_screen()?;
        println!("{}", format!("  === {heading} ===").cyan().bold());
        println!("{}", "  (arrows move, Enter selects, Esc cancels)".cyan());
        println!();
        for (i, label) in labels.iter().enumerate() {
            if i == selected {
                println!("{}", format!("  > {label}").green().bold());
            } else {
                println!("    {label}");
            }
        }

        match input::read_key()?.code {
            KeyCode::Up => selected = selected.saturating_sub(1),
            KeyCode::Down => selected = (selected + 1).min(labels.len().saturating_sub(1)),
            KeyCode::Enter => return Ok(Some(selected)),
            KeyCode::Esc => return Ok(None),
            _ => {}
        }
    }
}
