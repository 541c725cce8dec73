use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::application::ports::{
    AgentRepository, MeetingRepository, RepositoryError, TranscriptStore, UserRepository,
};
use crate::domain::{
    AgentId, AvatarVariant, MeetingId, Speaker, TranscriptEntry, TranscriptLine, UserId,
    avatar_uri,
};

/// Post-hoc transcript reconciliation: fetches the raw artifact for a
/// meeting and annotates each line with a display identity resolved
/// against the human and agent speaker registries.
pub struct TranscriptService {
    meetings: Arc<dyn MeetingRepository>,
    users: Arc<dyn UserRepository>,
    agents: Arc<dyn AgentRepository>,
    transcripts: Arc<dyn TranscriptStore>,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("meeting not found")]
    NotFound,
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}

impl TranscriptService {
    pub fn new(
        meetings: Arc<dyn MeetingRepository>,
        users: Arc<dyn UserRepository>,
        agents: Arc<dyn AgentRepository>,
        transcripts: Arc<dyn TranscriptStore>,
    ) -> Self {
        Self {
            meetings,
            users,
            agents,
            transcripts,
        }
    }

    /// Returns the meeting's transcript in original line order, each
    /// line annotated with its speaker's name and avatar. The lookup is
    /// owner-scoped; a meeting belonging to another user is NotFound. A
    /// meeting with no transcript yet, or an unreachable artifact,
    /// yields an empty transcript rather than an error.
    #[tracing::instrument(skip(self))]
    pub async fn get_transcript(
        &self,
        meeting_id: MeetingId,
        requesting_user: UserId,
    ) -> Result<Vec<TranscriptEntry>, TranscriptError> {
        let meeting = self
            .meetings
            .get_owned(meeting_id, requesting_user)
            .await?
            .ok_or(TranscriptError::NotFound)?;

        let Some(url) = meeting.transcript_url else {
            return Ok(Vec::new());
        };

        let lines = match self.transcripts.fetch_lines(&url).await {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    meeting_id = %meeting_id.as_uuid(),
                    "Transcript artifact unavailable, returning empty transcript"
                );
                return Ok(Vec::new());
            }
        };

        let speakers = self.resolve_speakers(&lines).await?;

        Ok(lines
            .into_iter()
            .map(|line| {
                let speaker = speakers
                    .get(&line.speaker_id)
                    .cloned()
                    .unwrap_or_else(Speaker::unknown);
                TranscriptEntry::new(line, speaker)
            })
            .collect())
    }

    /// Batch-resolves the distinct speaker ids against both registries.
    /// A speaker id belongs to exactly one registry in practice, but
    /// nothing here assumes that; when both answer, the user registry
    /// wins.
    async fn resolve_speakers(
        &self,
        lines: &[TranscriptLine],
    ) -> Result<HashMap<String, Speaker>, TranscriptError> {
        let mut ids: Vec<Uuid> = Vec::new();
        for line in lines {
            if let Ok(uuid) = Uuid::parse_str(&line.speaker_id) {
                if !ids.contains(&uuid) {
                    ids.push(uuid);
                }
            }
        }

        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let user_ids: Vec<UserId> = ids.iter().copied().map(UserId::from_uuid).collect();
        let agent_ids: Vec<AgentId> = ids.iter().copied().map(AgentId::from_uuid).collect();

        let users = self.users.get_by_ids(&user_ids).await?;
        let agents = self.agents.get_by_ids(&agent_ids).await?;

        let mut speakers = HashMap::new();
        for user in users {
            let image = user
                .image
                .unwrap_or_else(|| avatar_uri(&user.name, AvatarVariant::Initials));
            speakers.insert(
                user.id.as_uuid().to_string(),
                Speaker {
                    name: user.name,
                    image,
                },
            );
        }
        for agent in agents {
            speakers
                .entry(agent.id.as_uuid().to_string())
                .or_insert_with(|| Speaker {
                    image: avatar_uri(&agent.name, AvatarVariant::BotttsNeutral),
                    name: agent.name,
                });
        }

        Ok(speakers)
    }
}
