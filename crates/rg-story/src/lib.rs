//! LLM story engine for Reality Glitch.
//!
//! The engine keeps a chat transcript with a game-master system prompt,
//! asks an OpenAI-compatible completions endpoint for the next segment,
//! and parses the reply into narrative text plus exactly three choices.
//! Long transcripts are compressed into a summary so the context never
//! grows without bound, and the whole state round-trips through JSON
//! save files.

/// Story engine state machine.
pub mod engine;
/// Error types used throughout the crate.
pub mod error;
/// Chat-completions client.
pub mod llm;
/// Response parsing into story and choices.
pub mod parser;
/// Prompt text constants.
pub mod prompts;
/// Save file model and directory manager.
pub mod save;
/// Transcript summarization and compression.
pub mod summarizer;

/// Re-export the engine.
pub use engine::{StoryEngine, StorySegment};
/// Re-export error types.
pub use error::{StoryError, StoryResult};
/// Re-export the chat client and message types.
pub use llm::{ChatClient, Message, Role};
/// Re-export save types.
pub use save::{SaveFile, SaveManager, SaveMeta};
