use std::fmt;
use std::str::FromStr;

/// Colon-delimited call identifier some provider events carry instead of a
/// structured meeting id field, e.g. `"default:1b4e..."`. The format is a
/// boundary contract with the provider: a first segment naming the call
/// type and a second segment holding the meeting id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeCallId {
    pub call_type: String,
    pub meeting_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallIdParseError {
    #[error("call cid has no meeting id segment: {0:?}")]
    MissingMeetingId(String),
}

impl FromStr for CompositeCallId {
    type Err = CallIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split(':');
        let call_type = segments.next().unwrap_or_default();
        let meeting_id = segments.next().unwrap_or_default();

        if call_type.is_empty() || meeting_id.is_empty() {
            return Err(CallIdParseError::MissingMeetingId(s.to_string()));
        }

        Ok(Self {
            call_type: call_type.to_string(),
            meeting_id: meeting_id.to_string(),
        })
    }
}

impl fmt::Display for CompositeCallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.call_type, self.meeting_id)
    }
}
