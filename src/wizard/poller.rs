//! Recurring deployment status poll
//!
//! One tokio task per monitored deployment. It polls immediately, then once
//! per interval, and stops on its own after a terminal status. Updates go back
//! over an mpsc channel tagged with the session generation so the receiver can
//! ignore anything from a session it has since cancelled.

use crate::api::ProvisioningBackend;
use crate::model::DeploymentStatus;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// One poll result
#[derive(Debug, Clone)]
pub struct PollUpdate {
    /// Session that produced this update
    pub generation: u64,
    pub deployment_id: String,
    /// Transport/API failures are carried as messages and are never terminal
    pub result: Result<DeploymentStatus, String>,
}

impl PollUpdate {
    pub fn is_terminal(&self) -> bool {
        matches!(&self.result, Ok(status) if status.is_terminal())
    }
}

/// Owner of a running poll task; dropping it cancels the task
#[derive(Debug)]
pub struct PollHandle {
    generation: u64,
    cancel: watch::Sender<bool>,
    requests: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Status requests issued so far by this session
    pub fn requests_issued(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// The task has exited, either after a terminal status or cancellation
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn cancel(&self) {
        if !self.is_cancelled() {
            log::debug!("Cancelling status poll session {}", self.generation);
        }
        let _ = self.cancel.send(true);
        self.task.abort();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawn a poll session for `deployment_id`
pub fn spawn_status_poller<B: ProvisioningBackend>(
    backend: Arc<B>,
    deployment_id: String,
    interval: Duration,
    generation: u64,
    updates: mpsc::UnboundedSender<PollUpdate>,
) -> PollHandle {
    let (cancel_tx, mut cancel_rx) = watch::channel(false);
    let requests = Arc::new(AtomicU64::new(0));
    let counter = requests.clone();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        log::debug!(
            "Polling {} every {:?} (session {})",
            deployment_id,
            interval,
            generation
        );

        loop {
            // first tick completes immediately
            tokio::select! {
                biased;
                _ = cancel_rx.changed() => break,
                _ = ticker.tick() => {}
            }

            counter.fetch_add(1, Ordering::SeqCst);
            let result = tokio::select! {
                biased;
                _ = cancel_rx.changed() => break,
                result = backend.deployment_status(&deployment_id) => result,
            };
            if *cancel_rx.borrow() {
                break;
            }

            let update = PollUpdate {
                generation,
                deployment_id: deployment_id.clone(),
                result: match result {
                    Ok(status) => {
                        log::debug!(
                            "{}: {} ({}%) {}",
                            deployment_id,
                            status.status,
                            status.progress,
                            status.message
                        );
                        Ok(status)
                    }
                    Err(e) => {
                        log::warn!("Status poll for {} failed: {}", deployment_id, e);
                        Err(e.to_string())
                    }
                },
            };
            let terminal = update.is_terminal();
            if updates.send(update).is_err() || terminal {
                break;
            }
        }
        log::debug!("Status poll session {} finished", generation);
    });

    PollHandle {
        generation,
        cancel: cancel_tx,
        requests,
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SimulatedBackend;
    use crate::model::{Architecture, AwsCredentials, DeploymentPhase, ProviderCredentials};

    async fn launched(backend: &SimulatedBackend) -> String {
        let credentials = ProviderCredentials::Aws(AwsCredentials {
            access_key: "AKIAEXAMPLE".to_string(),
            secret_key: "secret".to_string(),
            region: "us-east-1".to_string(),
        });
        backend
            .deploy(&credentials, &Architecture::default())
            .await
            .unwrap()
            .deployment_id
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_until_terminal() {
        let backend = Arc::new(SimulatedBackend::new(Duration::from_secs(3)));
        let id = launched(&backend).await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_status_poller(backend, id, Duration::from_secs(3), 1, tx);

        let mut phases = Vec::new();
        while let Some(update) = rx.recv().await {
            assert_eq!(update.generation, 1);
            phases.push(update.result.unwrap().status);
        }
        assert_eq!(phases.first(), Some(&DeploymentPhase::Initializing));
        assert_eq!(phases.last(), Some(&DeploymentPhase::Completed));

        let issued = handle.requests_issued();
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(handle.requests_issued(), issued);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_updates() {
        let backend = Arc::new(SimulatedBackend::new(Duration::from_secs(60)));
        let id = launched(&backend).await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_status_poller(backend, id, Duration::from_secs(3), 7, tx);

        let first = rx.recv().await.unwrap();
        assert!(!first.is_terminal());
        handle.cancel();
        assert!(handle.is_cancelled());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(rx.recv().await.is_none());
    }
}
