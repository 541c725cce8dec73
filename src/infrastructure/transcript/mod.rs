mod http_transcript_store;

pub use http_transcript_store::{HttpTranscriptStore, parse_jsonl};
