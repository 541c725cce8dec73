mod agent;
mod avatar;
mod call_id;
mod event;
mod meeting;
mod meeting_status;
mod transcript;
mod user;

pub use agent::{Agent, AgentId};
pub use avatar::{AvatarVariant, avatar_uri};
pub use call_id::{CallIdParseError, CompositeCallId};
pub use event::{EventParseError, WebhookEvent};
pub use meeting::{Meeting, MeetingId};
pub use meeting_status::MeetingStatus;
pub use transcript::{Speaker, TranscriptEntry, TranscriptLine};
pub use user::{User, UserId};
