use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use super::StatusSnapshot;
use crate::gateway::BenefitsGateway;

/// Self-renewing backend health probe.
///
/// Activation spawns one background task that probes immediately and then on
/// a fixed period. Each successful probe replaces the published status
/// wholesale; a failed probe is logged and the last known status kept.
pub struct StatusPoller<G> {
    gateway: Arc<G>,
    period: Duration,
}

impl<G> StatusPoller<G>
where
    G: BenefitsGateway + 'static,
{
    pub fn new(gateway: Arc<G>, period: Duration) -> Self {
        Self { gateway, period }
    }

    /// Spawn the probe task. The returned handle owns the schedule; when it
    /// is dropped no further probe fires.
    pub fn activate(self) -> StatusPollerHandle {
        let (snapshots, subscription) = watch::channel(StatusSnapshot::Loading);
        let (refresh, kicks) = mpsc::channel(1);

        let task = tokio::spawn(run_schedule(self.gateway, self.period, snapshots, kicks));

        StatusPollerHandle {
            snapshots: subscription,
            refresh,
            task,
        }
    }
}

async fn run_schedule<G>(
    gateway: Arc<G>,
    period: Duration,
    snapshots: watch::Sender<StatusSnapshot>,
    mut kicks: mpsc::Receiver<()>,
) where
    G: BenefitsGateway,
{
    // A probe outlasting the period must not be followed by a burst of
    // catch-up probes.
    let mut ticks = interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticks.tick() => {}
            kick = kicks.recv() => {
                if kick.is_none() {
                    break;
                }
            }
        }
        probe(gateway.as_ref(), &snapshots).await;
    }
}

async fn probe<G>(gateway: &G, snapshots: &watch::Sender<StatusSnapshot>)
where
    G: BenefitsGateway,
{
    match gateway.fetch_system_status().await {
        Ok(status) => {
            debug!(connected = status.connected, "status probe resolved");
            snapshots.send_replace(StatusSnapshot::Ready(status));
        }
        Err(err) => {
            warn!(error = %err, "status probe failed; keeping last known status");
            snapshots.send_if_modified(|current| {
                if matches!(current, StatusSnapshot::Loading) {
                    *current = StatusSnapshot::Unavailable;
                    true
                } else {
                    false
                }
            });
        }
    }
}

/// Owner of the recurring probe schedule.
///
/// The cancellation handle is captured at spawn time and invoked exactly
/// once, on drop, so the schedule dies with its owner on every exit path.
/// An aborted in-flight probe is abandoned, not awaited.
#[derive(Debug)]
pub struct StatusPollerHandle {
    snapshots: watch::Receiver<StatusSnapshot>,
    refresh: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl StatusPollerHandle {
    /// Current snapshot, without waiting.
    pub fn snapshot(&self) -> StatusSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Subscribe to snapshot replacements.
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.snapshots.clone()
    }

    /// Request one extra probe now without disturbing the fixed schedule.
    /// The kick is dropped when one is already pending.
    pub fn refresh(&self) {
        let _ = self.refresh.try_send(());
    }
}

impl Drop for StatusPollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
