//! Prompt modifiers: turning a glitch report into narrator guidance.
//!
//! The story generator receives its usual system prompt plus an addendum
//! whose insistence scales with the glitch intensity. Descriptors and
//! anomalies are sampled down so the prompt stays short.

use rand::rngs::StdRng;
use rand::Rng;

use crate::glitch::{GlitchReport, Intensity};

/// Maximum descriptors quoted in the prompt addendum.
const MAX_DESCRIPTORS: usize = 5;
/// Maximum anomalies quoted in the prompt addendum.
const MAX_ANOMALIES: usize = 3;

/// Narrator guidance derived from a glitch report.
#[derive(Debug, Clone)]
pub struct StoryModifiers {
    /// Overall glitch intensity.
    pub intensity: Intensity,
    /// The voted mood word.
    pub mood: &'static str,
    /// Sampled descriptors.
    pub descriptors: Vec<&'static str>,
    /// Sampled anomaly lines.
    pub anomalies: Vec<&'static str>,
}

impl StoryModifiers {
    /// Sample modifiers from a glitch report.
    pub fn from_report(report: &GlitchReport, rng: &mut StdRng) -> Self {
        let combined = &report.combined;
        Self {
            intensity: combined.intensity,
            mood: combined.mood,
            descriptors: sample(&combined.descriptors, MAX_DESCRIPTORS, rng),
            anomalies: sample(&combined.anomalies, MAX_ANOMALIES, rng),
        }
    }

    /// Render the system-prompt addendum for this intensity.
    pub fn system_addendum(&self) -> String {
        match self.intensity {
            Intensity::None => "Keep the story realistic and grounded.".to_string(),
            Intensity::Slight => format!(
                "Subtly incorporate the following reality glitch elements into your storytelling:\n\
                 - Overall mood: {}\n\
                 - Use these descriptive elements occasionally: {}\n\
                 - Minor anomalies that could happen: {}",
                self.mood,
                self.descriptors.join(", "),
                self.anomalies.first().unwrap_or(&"slight déjà vu"),
            ),
            Intensity::Moderate => format!(
                "Distinctly incorporate these reality glitch elements into your narrative:\n\
                 - Overall atmosphere: {}\n\
                 - Frequently use these descriptive elements: {}\n\
                 - Anomalies to include: {}",
                self.mood,
                self.descriptors.join(", "),
                self.anomalies
                    .iter()
                    .take(2)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(". "),
            ),
            Intensity::Strong => format!(
                "Prominently feature these major reality glitch elements throughout your narrative:\n\
                 - Dominant atmosphere: {}\n\
                 - Heavily emphasize these descriptive elements: {}\n\
                 - Major anomalies to weave into the story: {}",
                self.mood,
                self.descriptors.join(", "),
                self.anomalies.join(". "),
            ),
        }
    }

    /// Append the addendum to a base system prompt.
    ///
    /// A neutral report leaves the prompt untouched so an empty database
    /// never changes the story's voice.
    pub fn enhance_prompt(&self, system_prompt: &str) -> String {
        if self.intensity == Intensity::None {
            return system_prompt.to_string();
        }
        format!("{}\n\n{}", system_prompt, self.system_addendum())
    }
}

/// Sample up to `max` items without replacement.
fn sample(items: &[&'static str], max: usize, rng: &mut StdRng) -> Vec<&'static str> {
    if items.len() <= max {
        return items.to_vec();
    }
    let mut pool = items.to_vec();
    let mut picked = Vec::with_capacity(max);
    for _ in 0..max {
        let idx = rng.random_range(0..pool.len());
        picked.push(pool.swap_remove(idx));
    }
    picked
}
