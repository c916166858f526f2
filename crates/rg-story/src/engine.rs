//! The story engine state machine.
//!
//! Owns the chat transcript and the current segment. Each player choice
//! appends to the transcript, optionally compresses it, asks the model
//! for the next segment under a glitch-enhanced system prompt, and
//! falls back to a canned segment if the model misbehaves twice or the
//! network is down. The game must never stall on a bad reply.

use tracing::{info, warn};

use rg_core::StoryModifiers;

use crate::error::{StoryError, StoryResult};
use crate::llm::{ChatClient, Message};
use crate::parser::{is_well_formed, parse_reply};
use crate::prompts::{
    FALLBACK_CHOICES, FALLBACK_STORY, FORMAT_REMINDER, INITIAL_CHOICES, INITIAL_STORY,
    SYSTEM_PROMPT,
};
use crate::save::SaveFile;
use crate::summarizer;

/// Sampling temperature for story generation.
const STORY_TEMPERATURE: f64 = 0.7;
const STORY_MAX_TOKENS: u32 = 1024;

/// One narrative beat: text plus the choices it offers.
#[derive(Debug, Clone, PartialEq)]
pub struct StorySegment {
    /// Narrative text.
    pub story: String,
    /// Exactly three player choices.
    pub choices: Vec<String>,
}

/// Drives the story: transcript, current segment, and the model calls
/// between them.
pub struct StoryEngine {
    client: ChatClient,
    messages: Vec<Message>,
    current_story: String,
    current_choices: Vec<String>,
    summary_count: u32,
}

impl StoryEngine {
    /// A fresh engine at the opening scene.
    pub fn new(client: ChatClient) -> Self {
        let mut engine = Self {
            client,
            messages: Vec::new(),
            current_story: String::new(),
            current_choices: Vec::new(),
            summary_count: 0,
        };
        engine.reset();
        engine
    }

    /// Restore an engine from a save file.
    pub fn from_save(client: ChatClient, save: SaveFile) -> Self {
        Self {
            client,
            messages: save.messages,
            current_story: save.current_story,
            current_choices: save.current_choices,
            summary_count: save.summary_count,
        }
    }

    /// Replace all state with the contents of a save file.
    pub fn restore(&mut self, save: SaveFile) {
        self.messages = save.messages;
        self.current_story = save.current_story;
        self.current_choices = save.current_choices;
        self.summary_count = save.summary_count;
    }

    /// Throw away all progress and return to the opening scene.
    pub fn reset(&mut self) {
        self.messages = vec![
            Message::system(SYSTEM_PROMPT),
            Message::assistant(INITIAL_STORY),
        ];
        self.current_story = INITIAL_STORY.to_string();
        self.current_choices = INITIAL_CHOICES.iter().map(|c| c.to_string()).collect();
        self.summary_count = 0;
    }

    /// The current narrative text.
    pub fn story(&self) -> &str {
        &self.current_story
    }

    /// The current choice list.
    pub fn choices(&self) -> &[String] {
        &self.current_choices
    }

    /// The full transcript.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// How many times the transcript has been compressed.
    pub fn summary_count(&self) -> u32 {
        self.summary_count
    }

    /// Snapshot the engine into a save file.
    pub fn to_save(&self, title: impl Into<String>) -> SaveFile {
        SaveFile::new(
            title,
            self.messages.clone(),
            &self.current_story,
            self.current_choices.clone(),
            self.summary_count,
        )
    }

    /// Take the choice at `index` (zero-based) and generate the next
    /// segment, with `modifiers` steering the narrator's tone.
    ///
    /// Only an out-of-range index is an error; generation problems
    /// degrade to a fallback segment so the session survives them.
    pub fn choose(
        &mut self,
        index: usize,
        modifiers: &StoryModifiers,
    ) -> StoryResult<StorySegment> {
        let choice = self
            .current_choices
            .get(index)
            .ok_or(StoryError::InvalidChoice(index))?
            .clone();
        info!(index, %choice, "player chose");

        self.messages.push(Message::user(format!("I choose to: {choice}")));

        if summarizer::needs_compression(&self.messages) {
            self.messages = summarizer::compress(&self.client, &self.messages);
            self.summary_count += 1;
        }

        let segment = match self.generate(modifiers) {
            Ok(segment) => segment,
            Err(e) => {
                warn!("story generation failed, forcing fallback segment: {e}");
                self.forced_fallback()
            }
        };

        self.current_story = segment.story.clone();
        self.current_choices = segment.choices.clone();
        Ok(segment)
    }

    /// One generation attempt, retried once with a format reminder if
    /// the first reply breaks the format.
    fn generate(&mut self, modifiers: &StoryModifiers) -> StoryResult<StorySegment> {
        let reply = self.complete_enhanced(modifiers, None)?;
        let reply = if is_well_formed(&reply) {
            reply
        } else {
            warn!("malformed reply, retrying with format reminder");
            let retry = self.complete_enhanced(modifiers, Some(FORMAT_REMINDER))?;
            // Lenient parsing salvages even a second malformed reply.
            if is_well_formed(&retry) { retry } else { reply }
        };

        self.messages.push(Message::assistant(reply.clone()));
        let parsed = parse_reply(&reply);
        Ok(StorySegment {
            story: parsed.story,
            choices: parsed.choices,
        })
    }

    /// Call the model with the system prompt transiently enhanced by
    /// the glitch modifiers. The stored transcript keeps the plain
    /// prompt so glitch wording never accumulates across turns.
    fn complete_enhanced(
        &self,
        modifiers: &StoryModifiers,
        reminder: Option<&str>,
    ) -> StoryResult<String> {
        let mut request = self.messages.clone();
        if let Some(system) = request.first_mut() {
            system.content = modifiers.enhance_prompt(&system.content);
        }
        if let Some(reminder) = reminder {
            request.push(Message::system(reminder));
        }
        self.client
            .complete(&request, STORY_TEMPERATURE, STORY_MAX_TOKENS)
    }

    /// Record and return the canned fallback segment.
    fn forced_fallback(&mut self) -> StorySegment {
        let choices: Vec<String> = FALLBACK_CHOICES.iter().map(|c| c.to_string()).collect();
        let transcript_form = format!(
            "Story: {FALLBACK_STORY}\n\nChoices:\n1. {}\n2. {}\n3. {}",
            choices[0], choices[1], choices[2]
        );
        self.messages.push(Message::assistant(transcript_form));
        StorySegment {
            story: FALLBACK_STORY.to_string(),
            choices,
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    use rg_core::GlitchReport;

    use super::*;

    fn neutral_modifiers() -> StoryModifiers {
        let mut rng = StdRng::seed_from_u64(7);
        let report = GlitchReport::classify(None, None, &[], &mut rng);
        StoryModifiers::from_report(&report, &mut rng)
    }

    fn engine_against(server: &MockServer) -> StoryEngine {
        let client = ChatClient::new("k", &server.url("/chat/completions"), "m").unwrap();
        StoryEngine::new(client)
    }

    const GOOD_REPLY: &str = "Story: The aliens blink in unison.\n\nChoices:\n1. Blink back\n2. Offer them coffee\n3. Check the device\n";

    #[test]
    fn new_engine_starts_at_the_opening_scene() {
        let server = MockServer::start();
        let engine = engine_against(&server);
        assert_eq!(engine.story(), INITIAL_STORY);
        assert_eq!(engine.choices().len(), 3);
        assert_eq!(engine.choices()[0], INITIAL_CHOICES[0]);
        assert_eq!(engine.messages().len(), 2);
        assert_eq!(engine.summary_count(), 0);
    }

    #[test]
    fn out_of_range_choice_is_rejected() {
        let server = MockServer::start();
        let mut engine = engine_against(&server);
        let err = engine.choose(3, &neutral_modifiers()).unwrap_err();
        assert!(matches!(err, StoryError::InvalidChoice(3)));
        // Transcript untouched by the rejected choice.
        assert_eq!(engine.messages().len(), 2);
    }

    #[test]
    fn choosing_advances_story_and_transcript() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({
                "choices": [{ "message": { "role": "assistant", "content": GOOD_REPLY } }]
            }));
        });

        let mut engine = engine_against(&server);
        let segment = engine.choose(0, &neutral_modifiers()).unwrap();

        mock.assert();
        assert_eq!(segment.story, "The aliens blink in unison.");
        assert_eq!(segment.choices.len(), 3);
        assert_eq!(engine.story(), segment.story);
        // system, initial, user choice, assistant reply
        assert_eq!(engine.messages().len(), 4);
        assert_eq!(
            engine.messages()[2].content,
            format!("I choose to: {}", INITIAL_CHOICES[0])
        );
    }

    #[test]
    fn malformed_reply_triggers_one_retry() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({
                "choices": [{ "message": { "role": "assistant", "content": "Just vibes, no format." } }]
            }));
        });

        let mut engine = engine_against(&server);
        let segment = engine.choose(1, &neutral_modifiers()).unwrap();

        assert_eq!(mock.hits(), 2);
        // Lenient parse of the malformed reply still yields a playable segment.
        assert_eq!(segment.story, "Just vibes, no format.");
        assert_eq!(segment.choices.len(), 3);
    }

    #[test]
    fn network_failure_forces_the_fallback_segment() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(503);
        });

        let mut engine = engine_against(&server);
        let segment = engine.choose(2, &neutral_modifiers()).unwrap();

        assert_eq!(segment.story, FALLBACK_STORY);
        assert_eq!(segment.choices.len(), 3);
        // The fallback is recorded so the transcript stays coherent.
        assert!(engine.messages().last().unwrap().content.contains(FALLBACK_STORY));
    }

    #[test]
    fn long_transcript_is_compressed_before_generation() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({
                "choices": [{ "message": { "role": "assistant", "content": GOOD_REPLY } }]
            }));
        });

        let client = ChatClient::new("k", &server.url("/chat/completions"), "m").unwrap();
        let mut engine = StoryEngine::new(client);
        // Inflate the transcript to five exchange pairs.
        for i in 0..4 {
            engine.messages.push(Message::user(format!("I choose to: {i}")));
            engine.messages.push(Message::assistant(format!("Story: beat {i}")));
        }
        engine.messages.push(Message::user("I choose to: extra"));
        engine
            .messages
            .push(Message::assistant("Story: another beat"));

        engine.choose(0, &neutral_modifiers()).unwrap();

        assert_eq!(engine.summary_count(), 1);
        // system + summary + 4 kept + new assistant reply
        assert_eq!(engine.messages().len(), 7);
    }

    #[test]
    fn reset_returns_to_the_opening_scene() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({
                "choices": [{ "message": { "role": "assistant", "content": GOOD_REPLY } }]
            }));
        });

        let mut engine = engine_against(&server);
        engine.choose(0, &neutral_modifiers()).unwrap();
        engine.reset();

        assert_eq!(engine.story(), INITIAL_STORY);
        assert_eq!(engine.messages().len(), 2);
        assert_eq!(engine.summary_count(), 0);
    }

    #[test]
    fn save_round_trip_restores_the_session() {
        let server = MockServer::start();
        let engine = engine_against(&server);
        let save = engine.to_save("checkpoint");

        let client = ChatClient::new("k", &server.url("/chat/completions"), "m").unwrap();
        let restored = StoryEngine::from_save(client, save);
        assert_eq!(restored.story(), INITIAL_STORY);
        assert_eq!(restored.choices(), engine.choices());
    }
}
