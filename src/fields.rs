//! Enumerations and classification helpers for schedule tasks.
//!
//! This module defines the priority levels used throughout the pipeline and
//! the classifier that maps free-text priority cells (including Portuguese
//! labels and colored marker glyphs) onto them.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Priority classification for a schedule task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Rank used when sorting tasks for allocation. Higher sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    /// Lowercase label used in payloads and card metadata.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Tracker backend selection for the publish command.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Backend {
    /// GitHub milestones + issues.
    Github,
    /// Generic GitProject tracker (projects, sprints, kanban boards).
    Gitproject,
}

/// Map a free-text priority cell to a canonical priority level.
///
/// Recognizes case-insensitive Portuguese and English tokens and colored
/// marker glyphs. Anything unrecognized defaults to Medium. Total and
/// deterministic; never fails.
pub fn classify_priority(raw: &str) -> Priority {
    let s = raw.to_lowercase();
    if s.contains('🔴') || s.contains("alta") || s.contains("high") {
        Priority::High
    } else if s.contains('🟢') || s.contains("baixa") || s.contains("low") {
        Priority::Low
    } else {
        // Covers 🟡 / "média" / "medium" and every unrecognized token.
        Priority::Medium
    }
}

/// Format a priority level for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_portuguese_tokens() {
        assert_eq!(classify_priority("Alta"), Priority::High);
        assert_eq!(classify_priority("Média"), Priority::Medium);
        assert_eq!(classify_priority("Baixa"), Priority::Low);
    }

    #[test]
    fn test_classify_english_tokens() {
        assert_eq!(classify_priority("HIGH"), Priority::High);
        assert_eq!(classify_priority("medium"), Priority::Medium);
        assert_eq!(classify_priority("Low"), Priority::Low);
    }

    #[test]
    fn test_classify_marker_glyphs() {
        assert_eq!(classify_priority("🔴 Alta"), Priority::High);
        assert_eq!(classify_priority("🟡 Média"), Priority::Medium);
        assert_eq!(classify_priority("🟢 Baixa"), Priority::Low);
    }

    #[test]
    fn test_classify_defaults_to_medium() {
        assert_eq!(classify_priority(""), Priority::Medium);
        assert_eq!(classify_priority("urgent!!!"), Priority::Medium);
        assert_eq!(classify_priority("???"), Priority::Medium);
    }

    #[test]
    fn test_classify_is_idempotent() {
        for input in ["Alta", "🟡 Média", "low", "garbage"] {
            assert_eq!(classify_priority(input), classify_priority(input));
        }
    }

    #[test]
    fn test_priority_rank_ordering() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }
}
