//! Start the interactive game.

use rg_story::{ChatClient, SaveManager, StoryEngine};
use rg_sync::SyncJob;

use crate::game::Game;

pub fn run(debug: bool) -> Result<(), String> {
    let config = super::load_config()?;
    let store = super::open_store(&config)?;
    let sync = SyncJob::from_config(&config, store);

    let client = ChatClient::from_config(&config).map_err(|e| {
        format!("cannot start the story engine: {e}. Set GROQ_API_KEY in your environment or .env")
    })?;
    let engine = StoryEngine::new(client);
    let saves = SaveManager::new(&config.save_dir).map_err(|e| e.to_string())?;

    let mut game = Game::new(engine, sync, saves, config.sync_interval, debug);
    game.run()
}
