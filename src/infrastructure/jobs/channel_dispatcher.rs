use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::ports::{DispatchError, JobDispatcher, ProcessingJob};

/// In-process job dispatch over a bounded channel. The receiving end is
/// owned by the `ProcessingWorker` task spawned at startup.
pub struct ChannelJobDispatcher {
    sender: mpsc::Sender<ProcessingJob>,
}

impl ChannelJobDispatcher {
    pub fn new(sender: mpsc::Sender<ProcessingJob>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl JobDispatcher for ChannelJobDispatcher {
    async fn enqueue(&self, job: ProcessingJob) -> Result<(), DispatchError> {
        self.sender
            .send(job)
            .await
            .map_err(|e| DispatchError::QueueUnavailable(e.to_string()))
    }
}
