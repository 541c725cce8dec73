use std::sync::Arc;

use chrono::{DateTime, Utc};
use parley::application::ports::{
    AgentRepository, MeetingListFilter, MeetingPage, MeetingRepository, MeetingWithAgent,
    RepositoryError, TranscriptStore, TranscriptStoreError, UserRepository,
};
use parley::application::services::{TranscriptError, TranscriptService};
use parley::domain::{
    Agent, AgentId, AvatarVariant, Meeting, MeetingId, TranscriptLine, User, UserId, avatar_uri,
};

struct SingleMeetingRepository {
    meeting: Meeting,
}

#[async_trait::async_trait]
impl MeetingRepository for SingleMeetingRepository {
    async fn create(&self, _meeting: &Meeting) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn get_owned(
        &self,
        id: MeetingId,
        owner: UserId,
    ) -> Result<Option<Meeting>, RepositoryError> {
        if self.meeting.id == id && self.meeting.user_id == owner {
            Ok(Some(self.meeting.clone()))
        } else {
            Ok(None)
        }
    }

    async fn get_owned_with_agent(
        &self,
        _id: MeetingId,
        _owner: UserId,
    ) -> Result<Option<MeetingWithAgent>, RepositoryError> {
        Ok(None)
    }

    async fn list(
        &self,
        _owner: UserId,
        _filter: &MeetingListFilter,
    ) -> Result<MeetingPage, RepositoryError> {
        Ok(MeetingPage {
            items: vec![],
            total: 0,
            total_pages: 0,
        })
    }

    async fn claim_for_start(
        &self,
        _id: MeetingId,
        _started_at: DateTime<Utc>,
    ) -> Result<Option<AgentId>, RepositoryError> {
        Ok(None)
    }

    async fn finish_if_active(
        &self,
        _id: MeetingId,
        _ended_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    async fn set_transcript_url(
        &self,
        _id: MeetingId,
        _url: &str,
    ) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    async fn set_recording_url(
        &self,
        _id: MeetingId,
        _url: &str,
    ) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    async fn complete_if_processing(&self, _id: MeetingId) -> Result<bool, RepositoryError> {
        Ok(false)
    }
}

struct FixedUserRepository {
    users: Vec<User>,
}

#[async_trait::async_trait]
impl UserRepository for FixedUserRepository {
    async fn get_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        Ok(self
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }
}

struct FixedAgentRepository {
    agents: Vec<Agent>,
}

#[async_trait::async_trait]
impl AgentRepository for FixedAgentRepository {
    async fn get_by_id(&self, id: AgentId) -> Result<Option<Agent>, RepositoryError> {
        Ok(self.agents.iter().find(|a| a.id == id).cloned())
    }

    async fn get_by_ids(&self, ids: &[AgentId]) -> Result<Vec<Agent>, RepositoryError> {
        Ok(self
            .agents
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect())
    }
}

struct FixedTranscriptStore {
    lines: Vec<TranscriptLine>,
}

#[async_trait::async_trait]
impl TranscriptStore for FixedTranscriptStore {
    async fn fetch_lines(&self, _url: &str) -> Result<Vec<TranscriptLine>, TranscriptStoreError> {
        Ok(self.lines.clone())
    }
}

struct FailingTranscriptStore;

#[async_trait::async_trait]
impl TranscriptStore for FailingTranscriptStore {
    async fn fetch_lines(&self, url: &str) -> Result<Vec<TranscriptLine>, TranscriptStoreError> {
        Err(TranscriptStoreError::FetchFailed(format!(
            "unreachable: {}",
            url
        )))
    }
}

fn line(speaker: &str, text: &str, start: i64) -> TranscriptLine {
    TranscriptLine {
        speaker_id: speaker.to_string(),
        text: text.to_string(),
        start_ts: start,
        stop_ts: start + 1000,
    }
}

fn service(
    meeting: Meeting,
    users: Vec<User>,
    agents: Vec<Agent>,
    store: Arc<dyn TranscriptStore>,
) -> TranscriptService {
    TranscriptService::new(
        Arc::new(SingleMeetingRepository { meeting }),
        Arc::new(FixedUserRepository { users }),
        Arc::new(FixedAgentRepository { agents }),
        store,
    )
}

#[tokio::test]
async fn returns_empty_when_meeting_has_no_transcript_url() {
    let owner = UserId::new();
    let meeting = Meeting::new(owner, AgentId::new(), "Sync".to_string());
    let id = meeting.id;

    let service = service(meeting, vec![], vec![], Arc::new(FailingTranscriptStore));

    let entries = service.get_transcript(id, owner).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn rejects_meeting_owned_by_another_user() {
    let owner = UserId::new();
    let mut meeting = Meeting::new(owner, AgentId::new(), "Sync".to_string());
    meeting.transcript_url = Some("https://artifacts.example/t.jsonl".to_string());
    let id = meeting.id;

    let service = service(
        meeting,
        vec![],
        vec![],
        Arc::new(FixedTranscriptStore { lines: vec![] }),
    );

    let result = service.get_transcript(id, UserId::new()).await;
    assert!(matches!(result, Err(TranscriptError::NotFound)));
}

#[tokio::test]
async fn degrades_to_empty_when_artifact_is_unreachable() {
    let owner = UserId::new();
    let mut meeting = Meeting::new(owner, AgentId::new(), "Sync".to_string());
    meeting.transcript_url = Some("https://artifacts.example/gone.jsonl".to_string());
    let id = meeting.id;

    let service = service(meeting, vec![], vec![], Arc::new(FailingTranscriptStore));

    let entries = service.get_transcript(id, owner).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn annotates_lines_in_order_with_known_and_unknown_speakers() {
    let owner = UserId::new();
    let alice = User {
        id: UserId::new(),
        name: "Alice".to_string(),
        image: Some("https://cdn.example/alice.png".to_string()),
    };
    let bob = User {
        id: UserId::new(),
        name: "Bob".to_string(),
        image: None,
    };
    let stranger = "0b0b0b0b-0000-0000-0000-000000000000";

    let mut meeting = Meeting::new(owner, AgentId::new(), "Sync".to_string());
    meeting.transcript_url = Some("https://artifacts.example/t.jsonl".to_string());
    let id = meeting.id;

    let lines = vec![
        line(&alice.id.as_uuid().to_string(), "Hello", 0),
        line(&bob.id.as_uuid().to_string(), "Hi Alice", 1000),
        line(stranger, "Who am I?", 2000),
        line(&alice.id.as_uuid().to_string(), "Welcome", 3000),
    ];

    let service = service(
        meeting,
        vec![alice.clone(), bob.clone()],
        vec![],
        Arc::new(FixedTranscriptStore { lines }),
    );

    let entries = service.get_transcript(id, owner).await.unwrap();
    assert_eq!(entries.len(), 4);

    let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Hello", "Hi Alice", "Who am I?", "Welcome"]);

    assert_eq!(entries[0].speaker.name, "Alice");
    assert_eq!(entries[0].speaker.image, "https://cdn.example/alice.png");

    assert_eq!(entries[1].speaker.name, "Bob");
    assert_eq!(
        entries[1].speaker.image,
        avatar_uri("Bob", AvatarVariant::Initials)
    );

    assert_eq!(entries[2].speaker.name, "Unknown");
    assert_eq!(
        entries[2].speaker.image,
        avatar_uri("Unknown", AvatarVariant::Initials)
    );

    assert_eq!(entries[3].speaker.name, "Alice");
}

#[tokio::test]
async fn agent_speakers_get_a_bot_avatar() {
    let owner = UserId::new();
    let agent = Agent::new(owner, "Scribe".to_string(), "Take notes.".to_string());

    let mut meeting = Meeting::new(owner, agent.id, "Sync".to_string());
    meeting.transcript_url = Some("https://artifacts.example/t.jsonl".to_string());
    let id = meeting.id;

    let lines = vec![line(
        &agent.id.as_uuid().to_string(),
        "Here is the summary.",
        0,
    )];

    let service = service(
        meeting,
        vec![],
        vec![agent.clone()],
        Arc::new(FixedTranscriptStore { lines }),
    );

    let entries = service.get_transcript(id, owner).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].speaker.name, "Scribe");
    assert_eq!(
        entries[0].speaker.image,
        avatar_uri("Scribe", AvatarVariant::BotttsNeutral)
    );
}
