mod agent_repository;
mod job_dispatcher;
mod meeting_repository;
mod realtime_sessions;
mod repository_error;
mod transcript_store;
mod user_repository;

pub use agent_repository::AgentRepository;
pub use job_dispatcher::{DispatchError, JobDispatcher, ProcessingJob};
pub use meeting_repository::{
    MeetingListFilter, MeetingPage, MeetingRepository, MeetingWithAgent,
};
pub use realtime_sessions::{RealtimeError, RealtimeSessions};
pub use repository_error::RepositoryError;
pub use transcript_store::{TranscriptStore, TranscriptStoreError};
pub use user_repository::UserRepository;
