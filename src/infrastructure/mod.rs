pub mod jobs;
pub mod observability;
pub mod persistence;
pub mod realtime;
pub mod transcript;
