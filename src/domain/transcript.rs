use serde::{Deserialize, Serialize};

use super::{AvatarVariant, avatar_uri};

/// One utterance from the provider's line-delimited transcript artifact.
/// Never persisted; reconstructed from the artifact on each read.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscriptLine {
    pub speaker_id: String,
    pub text: String,
    pub start_ts: i64,
    pub stop_ts: i64,
}

/// Resolved display identity for a transcript speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Speaker {
    pub name: String,
    pub image: String,
}

impl Speaker {
    /// Fallback for a speaker id absent from both registries.
    pub fn unknown() -> Self {
        Self {
            name: "Unknown".to_string(),
            image: avatar_uri("Unknown", AvatarVariant::Initials),
        }
    }
}

/// A transcript line annotated with its resolved speaker.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub speaker_id: String,
    pub text: String,
    pub start_ts: i64,
    pub stop_ts: i64,
    pub speaker: Speaker,
}

impl TranscriptEntry {
    pub fn new(line: TranscriptLine, speaker: Speaker) -> Self {
        Self {
            speaker_id: line.speaker_id,
            text: line.text,
            start_ts: line.start_ts,
            stop_ts: line.stop_ts,
            speaker,
        }
    }
}
