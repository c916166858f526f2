//! Transcript compression.
//!
//! Every model call sends the full transcript, so a long session burns
//! context and money. Once enough exchanges accumulate, the middle of
//! the transcript is condensed into a single summary message and only
//! the most recent messages survive verbatim.

use tracing::{info, warn};

use crate::error::StoryResult;
use crate::llm::{ChatClient, Message, Role};
use crate::prompts::SUMMARY_PROMPT;

/// Number of player/model exchange pairs before compression kicks in.
pub const EXCHANGE_THRESHOLD: usize = 5;

/// Number of trailing messages kept verbatim after compression.
pub const PRESERVED_TAIL: usize = 4;

/// Sampling temperature for summaries. Lower than story generation;
/// summaries should not get creative.
const SUMMARY_TEMPERATURE: f64 = 0.3;
const SUMMARY_MAX_TOKENS: u32 = 500;

/// Summary used when the summarization call itself fails.
const FALLBACK_SUMMARY: &str = "The player has been navigating an encounter with three aliens \
and their malfunctioning device, making a series of choices whose consequences are still \
unfolding.";

/// Count completed player/model exchange pairs.
///
/// The first two messages are the system prompt and the opening
/// narration; everything after alternates user and assistant.
pub fn exchange_pairs(messages: &[Message]) -> usize {
    messages.len().saturating_sub(2) / 2
}

/// Whether the transcript is long enough to compress.
pub fn needs_compression(messages: &[Message]) -> bool {
    exchange_pairs(messages) >= EXCHANGE_THRESHOLD
}

/// Summarize the transcript and rebuild it as system prompt, summary,
/// and the last few messages.
///
/// A failed summarization call falls back to a canned summary rather
/// than aborting the game; losing nuance beats losing the session.
pub fn compress(client: &ChatClient, messages: &[Message]) -> Vec<Message> {
    let summary = match summarize(client, messages) {
        Ok(summary) => summary,
        Err(e) => {
            warn!("summarization failed, using fallback summary: {e}");
            FALLBACK_SUMMARY.to_string()
        }
    };

    let mut compressed = Vec::with_capacity(2 + PRESERVED_TAIL);
    if let Some(system) = messages.first() {
        compressed.push(system.clone());
    }
    compressed.push(Message::system(format!(
        "STORY SUMMARY SO FAR: {summary}\n\nContinue the story from this point, maintaining \
         consistency with the summary above."
    )));
    let tail_start = messages.len().saturating_sub(PRESERVED_TAIL);
    compressed.extend(messages[tail_start..].iter().cloned());

    info!(
        before = messages.len(),
        after = compressed.len(),
        "transcript compressed"
    );
    compressed
}

/// Ask the model for a summary of everything after the system prompt.
fn summarize(client: &ChatClient, messages: &[Message]) -> StoryResult<String> {
    let transcript = render_transcript(messages);
    let request = vec![
        Message::system(SUMMARY_PROMPT),
        Message::user(format!(
            "Here is the story so far:\n\n{transcript}\n\nPlease summarize it."
        )),
    ];
    client.complete(&request, SUMMARY_TEMPERATURE, SUMMARY_MAX_TOKENS)
}

/// Flatten the transcript into labeled plain text, skipping system
/// messages.
fn render_transcript(messages: &[Message]) -> String {
    let mut out = String::new();
    for message in messages {
        let label = match message.role {
            Role::System => continue,
            Role::User => "Player",
            Role::Assistant => "Narrator",
        };
        out.push_str(label);
        out.push_str(": ");
        out.push_str(&message.content);
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn transcript_with_pairs(pairs: usize) -> Vec<Message> {
        let mut messages = vec![
            Message::system("gm prompt"),
            Message::assistant("opening scene"),
        ];
        for i in 0..pairs {
            messages.push(Message::user(format!("I choose to: option {i}")));
            messages.push(Message::assistant(format!("Story: segment {i}")));
        }
        messages
    }

    #[test]
    fn compression_threshold() {
        assert!(!needs_compression(&transcript_with_pairs(4)));
        assert!(needs_compression(&transcript_with_pairs(5)));
        assert_eq!(exchange_pairs(&transcript_with_pairs(5)), 5);
    }

    #[test]
    fn compress_keeps_system_summary_and_tail() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "The player met aliens." } }
                ]
            }));
        });
        let client = ChatClient::new("k", &server.url("/chat/completions"), "m").unwrap();

        let messages = transcript_with_pairs(5);
        let compressed = compress(&client, &messages);

        assert_eq!(compressed.len(), 2 + PRESERVED_TAIL);
        assert_eq!(compressed[0].content, "gm prompt");
        assert_eq!(compressed[1].role, Role::System);
        assert!(compressed[1].content.contains("The player met aliens."));
        // Tail is the last four messages, in order.
        assert_eq!(compressed[2].content, "I choose to: option 3");
        assert_eq!(compressed[5].content, "Story: segment 4");
    }

    #[test]
    fn failed_summary_call_falls_back() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500);
        });
        let client = ChatClient::new("k", &server.url("/chat/completions"), "m").unwrap();

        let messages = transcript_with_pairs(5);
        let compressed = compress(&client, &messages);

        assert_eq!(compressed.len(), 2 + PRESERVED_TAIL);
        assert!(compressed[1].content.contains("malfunctioning device"));
    }

    #[test]
    fn transcript_rendering_skips_system_messages() {
        let rendered = render_transcript(&transcript_with_pairs(1));
        assert!(!rendered.contains("gm prompt"));
        assert!(rendered.starts_with("Narrator: opening scene"));
        assert!(rendered.contains("Player: I choose to: option 0"));
    }
}
