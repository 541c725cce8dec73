mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseSettings, JobSettings, PaginationSettings, RealtimeSettings, ServerSettings, Settings,
};
