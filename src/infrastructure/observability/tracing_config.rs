use crate::presentation::config::Environment;

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: Environment,
    pub json_format: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        let environment = std::env::var("APP_ENV")
            .ok()
            .and_then(|v| Environment::try_from(v).ok())
            .unwrap_or(Environment::Local);

        Self {
            environment,
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(environment == Environment::Prod),
        }
    }
}
