// ABOUTME: Response generation from knowledge-base matches and persona/mode fallback templating
// ABOUTME: First matching knowledge entry wins; otherwise a deterministic persona-driven template
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response generation
//!
//! A chat turn resolves to either a knowledge-base answer or a fallback
//! template. Matching is case-insensitive substring containment of the
//! entry's question inside the raw user input, scanned in the order the
//! store supplies entries; the first match wins and its answer is returned
//! verbatim. No match is not an error: the fallback composes the persona
//! name, the (title-cased) mode, the mode's tone, and the verbatim input.
//!
//! The generator is read-only over its inputs and never consults the
//! normalized tokens; NLP preprocessing stays an independent diagnostic
//! capability.

use std::sync::Arc;

use crate::database::knowledge_base::KnowledgeEntry;
use crate::database::personas::Persona;
use crate::modes::ModeRegistry;

/// Rule-based response generator
pub struct ResponseGenerator {
    modes: Arc<ModeRegistry>,
}

impl ResponseGenerator {
    /// Create a generator over the shared mode registry
    #[must_use]
    pub fn new(modes: Arc<ModeRegistry>) -> Self {
        Self { modes }
    }

    /// Produce a response for one conversation turn
    ///
    /// `persona` must already be resolved; callers signal "persona not
    /// found" before reaching this point.
    #[must_use]
    pub fn generate(
        &self,
        user_input: &str,
        persona: &Persona,
        mode_name: &str,
        entries: &[KnowledgeEntry],
    ) -> String {
        let haystack = user_input.to_lowercase();
        for entry in entries {
            if haystack.contains(&entry.question.to_lowercase()) {
                return entry.answer.clone();
            }
        }

        let mode = self.modes.resolve(mode_name);
        format!(
            "[{} - {}]: As someone who is {}, I think about your question: '{}'. (No KB answer found.)",
            persona.name,
            title_case(mode_name),
            mode.tone,
            user_input
        )
    }
}

/// Uppercase the first character, leaving the rest untouched
/// ("critic" -> "Critic", "unknown_mode" -> "Unknown_mode")
fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
