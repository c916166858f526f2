//! Terminal rendering: the CRT-green theme, typewriter output, and the
//! static screens (title, help, reality check).

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use colored::Colorize;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use rg_core::GlitchReport;

/// Delay between typewriter characters.
const TYPEWRITER_DELAY: Duration = Duration::from_millis(18);

/// Clear the screen and home the cursor.
pub fn clear_screen() -> Result<(), String> {
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0)).map_err(|e| e.to_string())
}

/// Print `text` character by character. `instant` skips the delay so
/// debug runs and tests are not slowed down.
pub fn typewriter(text: &str, instant: bool) {
    let styled = text.green();
    if instant {
        println!("{styled}");
        return;
    }
    for ch in styled.to_string().chars() {
        print!("{ch}");
        let _ = io::stdout().flush();
        if ch != ' ' {
            thread::sleep(TYPEWRITER_DELAY);
        }
    }
    println!();
}

/// The title banner shown on the main menu.
pub fn title_banner() {
    println!("{}", "  ╔══════════════════════════════════════╗".green());
    println!("{}", "  ║           REALITY GLITCH             ║".green().bold());
    println!("{}", "  ║   a text adventure warped by data    ║".green());
    println!("{}", "  ╚══════════════════════════════════════╝".green());
    println!();
}

/// The main menu key listing.
pub fn main_menu() {
    println!("{}", "  F1  help".cyan());
    println!("{}", "  F2  bitcoin reading".cyan());
    println!("{}", "  F3  stock index readings".cyan());
    println!("{}", "  F4  weather reading".cyan());
    println!("{}", "  F5  PANIC (force a reality sync)".cyan());
    println!("{}", "  F6  enter the story".cyan());
    println!("{}", "  F9  save story   F10 load story".cyan());
    println!("{}", "  Esc quit".cyan());
    println!();
}

/// The help screen, valid in both menu and story mode.
pub fn help() {
    println!("{}", "  === HELP ===".cyan().bold());
    println!("  Reality Glitch is a story that listens to the outside world.");
    println!("  Market crashes, heat waves, and crypto surges leak into the");
    println!("  narrative as glitches. Keep the poller running (`rg poll`)");
    println!("  for the full effect.");
    println!();
    println!("  In the story, press 1-3 to choose, Esc to step back out.");
    println!("  F9 saves at any point; F10 restores a previous session.");
    println!();
}

/// Show a story segment: narrative first, then the numbered choices.
pub fn story_segment(story: &str, choices: &[String], instant: bool) {
    println!();
    typewriter(story, instant);
    println!();
    for (i, choice) in choices.iter().enumerate() {
        println!("{}", format!("  {}. {choice}", i + 1).yellow());
    }
    println!();
}

/// The post-panic diagnostic: what reality currently looks like.
pub fn reality_check(report: &GlitchReport) {
    println!("{}", "  === REALITY CHECK ===".cyan().bold());
    println!("  Glitch intensity: {}", report.combined.intensity);
    println!("  Ambient mood:     {}", report.combined.mood);
    if report.is_neutral() {
        println!("{}", "  All readings nominal. Reality is (allegedly) stable.".green());
    } else {
        for anomaly in &report.combined.anomalies {
            println!("{}", format!("  ! {anomaly}").red());
        }
    }
    println!();
}

/// One-line status message, warning-colored.
pub fn notice(text: &str) {
    println!("{}", format!("  {text}").yellow());
}

/// One-line status message, error-colored.
pub fn alert(text: &str) {
    println!("{}", format!("  {text}").red());
}
