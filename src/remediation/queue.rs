use crate::error::{RemediationError, RemediationResult};
use std::future::Future;
use std::pin::Pin;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Single-worker task queue. Submitted jobs run one at a time, in submission order.
#[derive(Debug, Clone)]
pub struct SerialQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl SerialQueue {
    /// Start the worker on the current runtime
    pub fn spawn(name: &'static str) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        let worker = tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                job.await;
            }
            tracing::debug!(queue = name, "serial queue drained");
        });
        (Self { tx }, worker)
    }

    pub fn submit<F>(&self, job: F) -> RemediationResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tx
            .send(Box::pin(job))
            .map_err(|_| RemediationError::QueueClosed)
    }

    /// Wait until every job submitted before this call has finished
    pub async fn flush(&self) -> RemediationResult<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.submit(async move {
            let _ = done_tx.send(());
        })?;
        done_rx.await.map_err(|_| RemediationError::QueueClosed)
    }
}
