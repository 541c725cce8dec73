mod pg_agent_repository;
mod pg_meeting_repository;
mod pg_pool;
mod pg_user_repository;

pub use pg_agent_repository::PgAgentRepository;
pub use pg_meeting_repository::PgMeetingRepository;
pub use pg_pool::create_pool;
pub use pg_user_repository::PgUserRepository;
