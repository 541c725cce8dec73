use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::{MeetingRepository, ProcessingJob, RepositoryError};

/// Consumes `meetings/processing` jobs off the queue. Summarization and
/// other derived artifacts run downstream of this worker; its own
/// responsibility is closing out the lifecycle with the terminal
/// `processing -> completed` transition.
pub struct ProcessingWorker {
    receiver: mpsc::Receiver<ProcessingJob>,
    meetings: Arc<dyn MeetingRepository>,
}

impl ProcessingWorker {
    pub fn new(receiver: mpsc::Receiver<ProcessingJob>, meetings: Arc<dyn MeetingRepository>) -> Self {
        Self { receiver, meetings }
    }

    pub async fn run(mut self) {
        tracing::info!("Meeting processing worker started");
        while let Some(job) = self.receiver.recv().await {
            let span = tracing::info_span!(
                "processing_job",
                meeting_id = %job.meeting_id.as_uuid(),
            );
            let _guard = span.enter();

            if let Err(e) = self.process(job).await {
                tracing::error!(error = %e, "Meeting processing failed");
            }
        }
        tracing::info!("Meeting processing worker stopped: channel closed");
    }

    async fn process(&self, job: ProcessingJob) -> Result<(), RepositoryError> {
        tracing::debug!(transcript_url = %job.transcript_url, "Processing meeting transcript");

        let completed = self.meetings.complete_if_processing(job.meeting_id).await?;
        if completed {
            tracing::info!("Meeting completed");
        } else {
            tracing::debug!("Meeting is not in processing state, skipping completion");
        }
        Ok(())
    }
}
