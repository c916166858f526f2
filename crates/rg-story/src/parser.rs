//! Parsing model replies into narrative plus exactly three choices.
//!
//! Models drift from the requested format no matter how firmly the
//! prompt insists, so parsing is layered: structured markers first,
//! bare numbered lines next, then choices invented from the narrative
//! itself. Whatever happens, the caller always gets a story string and
//! exactly three choices.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// A parsed story segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    /// The narrative text.
    pub story: String,
    /// Exactly three player choices.
    pub choices: Vec<String>,
}

/// A numbered choice line: `1. text`, `2: text`, or `3) text`.
static CHOICE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*\d+\s*[.:)]\s*(.+)$").unwrap_or_else(|e| unreachable!("{e}"))
});

/// Placeholder text the model was told not to emit but sometimes does,
/// e.g. `[Specific action choice 1]`.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[.*\]$").unwrap_or_else(|e| unreachable!("{e}")));

/// The `Story:` marker, any case.
static STORY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)story:").unwrap_or_else(|e| unreachable!("{e}")));

/// The `Choices:` marker, any case.
static CHOICES_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)choices:").unwrap_or_else(|e| unreachable!("{e}")));

/// Whether `reply` follows the requested `Story:` / `Choices:` format
/// with at least three numbered options.
pub fn is_well_formed(reply: &str) -> bool {
    let Some(m) = CHOICES_MARKER.find(reply) else {
        return false;
    };
    if !STORY_MARKER.is_match(reply) {
        return false;
    }
    usable_choices(&reply[m.end()..]).len() >= 3
}

/// Parse a model reply into a story and exactly three choices.
///
/// Never fails: a reply with no recognizable structure becomes pure
/// narrative with choices synthesized from its content.
pub fn parse_reply(reply: &str) -> ParsedReply {
    let (story_part, choices_part) = split_sections(reply);

    let story = strip_story_marker(story_part);
    let mut choices = usable_choices(choices_part);

    if choices.len() < 3 {
        debug!(
            found = choices.len(),
            "reply had too few choices, synthesizing the rest"
        );
        pad_choices(&mut choices, &story);
    }
    choices.truncate(3);

    ParsedReply { story, choices }
}

/// Split a reply at the `Choices:` marker (case-insensitive). Without
/// the marker, the first numbered line starts the choices section.
fn split_sections(reply: &str) -> (&str, &str) {
    if let Some(m) = CHOICES_MARKER.find(reply) {
        return (&reply[..m.start()], &reply[m.end()..]);
    }
    if let Some(m) = CHOICE_LINE.find(reply) {
        return (&reply[..m.start()], &reply[m.start()..]);
    }
    (reply, "")
}

/// Drop a leading `Story:` marker and trim.
fn strip_story_marker(text: &str) -> String {
    let trimmed = text.trim();
    match STORY_MARKER.find(trimmed) {
        Some(m) => trimmed[m.end()..].trim().to_string(),
        None => trimmed.to_string(),
    }
}

/// Extract numbered choice lines, discarding placeholders and blanks.
fn usable_choices(section: &str) -> Vec<String> {
    CHOICE_LINE
        .captures_iter(section)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|choice| !choice.is_empty() && !PLACEHOLDER.is_match(choice))
        .collect()
}

/// Top up `choices` to three entries with actions that fit the story.
fn pad_choices(choices: &mut Vec<String>, story: &str) {
    let lower = story.to_lowercase();
    let mut candidates: Vec<&str> = Vec::new();

    if lower.contains("alien") || lower.contains("creature") {
        candidates.extend([
            "Try to communicate with the beings",
            "Observe them from a safe distance",
            "Look for a way to escape",
        ]);
    }
    if lower.contains("device") || lower.contains("machine") || lower.contains("gadget") {
        candidates.extend([
            "Examine the device more closely",
            "Ask about the device's purpose",
            "Keep your distance from the device",
        ]);
    }
    if lower.contains("door") || lower.contains("exit") || lower.contains("window") {
        candidates.extend([
            "Head for the exit",
            "Block the doorway",
            "Peek outside before moving",
        ]);
    }
    // Generic actions close any remaining gap.
    candidates.extend([
        "Investigate further",
        "Proceed with caution",
        "Wait and see what happens next",
    ]);

    for candidate in candidates {
        if choices.len() >= 3 {
            break;
        }
        if !choices.iter().any(|c| c == candidate) {
            choices.push(candidate.to_string());
        }
    }
}
