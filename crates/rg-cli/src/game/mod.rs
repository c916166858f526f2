//! The interactive game loop.
//!
//! A main menu exposes the raw reality readings and the panic button;
//! story mode runs the narrative. Keys are read one at a time in raw
//! mode; everything else is plain line output.

mod display;
mod input;
mod menu;

use std::time::Duration;

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use rg_core::{GlitchReport, StoryModifiers};
use rg_story::{SaveManager, StoryEngine};
use rg_sync::SyncJob;

use crate::commands;

/// Interactive session state.
pub struct Game {
    engine: StoryEngine,
    sync: SyncJob,
    saves: SaveManager,
    sync_interval: Duration,
    debug: bool,
    story_mode: bool,
    running: bool,
}

impl Game {
    /// Assemble a session.
    pub fn new(
        engine: StoryEngine,
        sync: SyncJob,
        saves: SaveManager,
        sync_interval: Duration,
        debug: bool,
    ) -> Self {
        Self {
            engine,
            sync,
            saves,
            sync_interval,
            debug,
            story_mode: false,
            running: true,
        }
    }

    /// Run until the player quits.
    pub fn run(&mut self) -> Result<(), String> {
        self.ensure_fresh_data()?;

        display::clear_screen()?;
        display::title_banner();
        display::main_menu();

        while self.running {
            let key = input::read_key()?;
            if self.story_mode {
                self.handle_story_key(key)?;
            } else {
                self.handle_menu_key(key)?;
            }
        }
        display::notice("Reality released. Goodbye.");
        Ok(())
    }

    /// Sync inline when the database is empty or the last sync is older
    /// than the poll interval, so a session without a running poller
    /// still gets data.
    fn ensure_fresh_data(&self) -> Result<(), String> {
        let store = self.sync.store();
        let needs_sync = store.is_empty().map_err(|e| e.to_string())?
            || store.is_stale(self.sync_interval).map_err(|e| e.to_string())?;
        if needs_sync {
            display::notice("Reality data is stale. Synchronizing...");
            self.sync.run_once();
        }
        Ok(())
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Result<(), String> {
        match key.code {
            KeyCode::F(1) => {
                display::help();
                display::main_menu();
            }
            KeyCode::F(2) => commands::bitcoin::show(self.sync.store())?,
            KeyCode::F(3) => commands::stocks::show(self.sync.store())?,
            KeyCode::F(4) => commands::weather::show(self.sync.store())?,
            KeyCode::F(5) => self.panic()?,
            KeyCode::F(6) => self.enter_story()?,
            KeyCode::F(9) => self.save_story()?,
            KeyCode::F(10) => self.load_story()?,
            KeyCode::Esc => self.running = false,
            _ => {}
        }
        Ok(())
    }

    fn handle_story_key(&mut self, key: KeyEvent) -> Result<(), String> {
        match key.code {
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.take_choice(index)?;
            }
            KeyCode::F(1) => display::help(),
            KeyCode::F(9) => self.save_story()?,
            KeyCode::F(10) => self.load_story()?,
            KeyCode::Esc => {
                self.story_mode = false;
                display::clear_screen()?;
                display::title_banner();
                display::main_menu();
            }
            _ => {}
        }
        Ok(())
    }

    /// Force a sync and show what reality looks like now.
    fn panic(&mut self) -> Result<(), String> {
        display::alert("PANIC: forcing a reality synchronization...");
        self.sync.run_once();
        let report = self.current_report()?;
        display::reality_check(&report);
        Ok(())
    }

    fn enter_story(&mut self) -> Result<(), String> {
        self.story_mode = true;
        display::clear_screen()?;
        display::story_segment(self.engine.story(), self.engine.choices(), self.debug);
        Ok(())
    }

    fn take_choice(&mut self, index: usize) -> Result<(), String> {
        let Some(choice) = self.engine.choices().get(index).cloned() else {
            display::alert("Invalid choice number. Please try again.");
            return Ok(());
        };
        display::typewriter(&format!("You chose: {choice}"), self.debug);
        display::notice("Generating response...");

        let report = self.current_report()?;
        let mut rng = StdRng::from_os_rng();
        let modifiers = StoryModifiers::from_report(&report, &mut rng);
        if self.debug {
            debug!(intensity = %modifiers.intensity, mood = modifiers.mood, "glitch modifiers");
            display::notice(&format!("[debug] {}", modifiers.system_addendum()));
        }

        let segment = self
            .engine
            .choose(index, &modifiers)
            .map_err(|e| e.to_string())?;
        display::clear_screen()?;
        display::story_segment(&segment.story, &segment.choices, self.debug);
        Ok(())
    }

    /// Classify the latest stored readings. Read failures degrade to
    /// missing data so the story keeps going on a broken database.
    fn current_report(&self) -> Result<GlitchReport, String> {
        let store = self.sync.store();
        let bitcoin = store.latest_bitcoin().unwrap_or_default();
        let weather = store.latest_weather().unwrap_or_default();
        let quotes = store.latest_index_quotes().unwrap_or_default();
        let mut rng = StdRng::from_os_rng();
        Ok(GlitchReport::classify(
            bitcoin.as_ref(),
            weather.as_ref(),
            &quotes,
            &mut rng,
        ))
    }

    fn save_story(&mut self) -> Result<(), String> {
        let outcome = menu::save_menu(&self.saves)?;
        let title = format!("Adventure {}", Utc::now().format("%b %d %H:%M"));
        let save = match outcome {
            menu::SaveChoice::Cancel => {
                self.redraw_after_menu()?;
                return Ok(());
            }
            menu::SaveChoice::New => self.engine.to_save(title),
            menu::SaveChoice::Overwrite(id) => {
                let mut save = self.engine.to_save(title);
                save.id = id;
                save
            }
        };
        self.saves.save(&save).map_err(|e| e.to_string())?;
        self.redraw_after_menu()?;
        display::notice("Story saved.");
        Ok(())
    }

    fn load_story(&mut self) -> Result<(), String> {
        match menu::load_menu(&self.saves)? {
            menu::LoadChoice::Cancel => self.redraw_after_menu()?,
            menu::LoadChoice::Load(id) => {
                let save = self.saves.load(&id).map_err(|e| e.to_string())?;
                self.engine.restore(save);
                self.story_mode = true;
                display::clear_screen()?;
                display::notice("Story loaded.");
                display::story_segment(self.engine.story(), self.engine.choices(), self.debug);
            }
        }
        Ok(())
    }

    /// Redraw whichever screen the menu covered.
    fn redraw_after_menu(&mut self) -> Result<(), String> {
        display::clear_screen()?;
        if self.story_mode {
            display::story_segment(self.engine.story(), self.engine.choices(), self.debug);
        } else {
            display::title_banner();
            display::main_menu();
        }
        Ok(())
    }
}
