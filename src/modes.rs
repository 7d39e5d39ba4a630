// ABOUTME: Conversation mode registry mapping mode names to tone and behavior text
// ABOUTME: Unknown names deliberately resolve to the educator profile as a safe default
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation mode registry
//!
//! A mode shapes the fallback response's tone (interviewer, critic,
//! educator). The registry is built once at startup and shared read-only;
//! resolution is total, with unknown names falling back to the educator
//! profile rather than erroring.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mode name used when a requested mode is unknown
pub const DEFAULT_MODE: &str = "educator";

/// Tone and behavior descriptor for a conversation mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeProfile {
    /// What the mode does
    pub description: String,
    /// Tone adjectives woven into the fallback template
    pub tone: String,
}

/// Immutable registry of conversation modes
pub struct ModeRegistry {
    modes: HashMap<String, ModeProfile>,
    fallback: ModeProfile,
}

impl ModeRegistry {
    /// Build the registry with the built-in mode table
    #[must_use]
    pub fn with_builtin_modes() -> Self {
        let mut modes = HashMap::new();
        modes.insert(
            "interviewer".to_owned(),
            ModeProfile {
                description: "Acts as an interviewer, asking insightful questions.".to_owned(),
                tone: "curious, probing".to_owned(),
            },
        );
        modes.insert(
            "critic".to_owned(),
            ModeProfile {
                description: "Acts as a critic, giving constructive feedback.".to_owned(),
                tone: "critical, analytical".to_owned(),
            },
        );
        let educator = ModeProfile {
            description: "Acts as an educator, explaining concepts clearly.".to_owned(),
            tone: "clear, informative".to_owned(),
        };
        modes.insert(DEFAULT_MODE.to_owned(), educator.clone());

        Self {
            modes,
            fallback: educator,
        }
    }

    /// Resolve a mode name to its profile
    ///
    /// Total over all strings; unknown names (including the empty string)
    /// resolve to the educator profile.
    #[must_use]
    pub fn resolve(&self, name: &str) -> &ModeProfile {
        self.modes.get(name).unwrap_or(&self.fallback)
    }

    /// Names of all registered modes
    #[must_use]
    pub fn mode_names(&self) -> Vec<&str> {
        self.modes.keys().map(String::as_str).collect()
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::with_builtin_modes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_modes() {
        let registry = ModeRegistry::with_builtin_modes();

        assert_eq!(registry.resolve("interviewer").tone, "curious, probing");
        assert_eq!(registry.resolve("critic").tone, "critical, analytical");
        assert_eq!(registry.resolve("educator").tone, "clear, informative");
    }

    #[test]
    fn test_unknown_mode_falls_back_to_educator() {
        let registry = ModeRegistry::with_builtin_modes();

        assert_eq!(registry.resolve("unknown_mode").tone, "clear, informative");
        assert_eq!(registry.resolve("").tone, "clear, informative");
        assert_eq!(
            registry.resolve("EDUCATOR").tone,
            "clear, informative",
            "lookup is case-sensitive, so uppercase falls back"
        );
    }

    #[test]
    fn test_registry_has_three_builtin_modes() {
        let registry = ModeRegistry::with_builtin_modes();
        assert_eq!(registry.mode_names().len(), 3);
    }
}
