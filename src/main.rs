use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use parley::application::services::{ProcessingWorker, TranscriptService, WebhookService};
use parley::infrastructure::jobs::ChannelJobDispatcher;
use parley::infrastructure::observability::{TracingConfig, init_tracing};
use parley::infrastructure::persistence::{
    PgAgentRepository, PgMeetingRepository, PgUserRepository, create_pool,
};
use parley::infrastructure::realtime::{StreamVideoClient, WebhookSignature};
use parley::infrastructure::transcript::HttpTranscriptStore;
use parley::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(TracingConfig::default(), settings.server.port);

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;

    let meetings = Arc::new(PgMeetingRepository::new(pool.clone()));
    let agents = Arc::new(PgAgentRepository::new(pool.clone()));
    let users = Arc::new(PgUserRepository::new(pool));

    let realtime = Arc::new(StreamVideoClient::new(
        settings.realtime.base_url.clone(),
        settings.realtime.api_key.clone(),
    ));
    let transcripts = Arc::new(HttpTranscriptStore::new());

    let (job_sender, job_receiver) = mpsc::channel(settings.jobs.queue_capacity);
    let dispatcher = Arc::new(ChannelJobDispatcher::new(job_sender));

    let worker = ProcessingWorker::new(job_receiver, meetings.clone());
    tokio::spawn(worker.run());

    let webhook_service = Arc::new(WebhookService::new(
        meetings.clone(),
        agents.clone(),
        realtime.clone(),
        dispatcher,
    ));
    let transcript_service = Arc::new(TranscriptService::new(
        meetings.clone(),
        users,
        agents.clone(),
        transcripts,
    ));

    let state = AppState {
        webhook_service,
        transcript_service,
        meetings,
        agents,
        realtime,
        signature: WebhookSignature::new(settings.realtime.webhook_secret.clone()),
        pagination: settings.pagination.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
