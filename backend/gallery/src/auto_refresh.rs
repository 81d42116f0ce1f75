//! Periodic gallery refresh.
//!
//! The timer task only schedules; each refresh runs as its own task so that
//! stopping the timer never aborts a fetch already in flight.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::view_model::GalleryViewModel;

/// Handle to a running refresh timer. Dropping it cancels the timer.
pub struct AutoRefresh {
    task: JoinHandle<()>,
    period: Duration,
}

impl AutoRefresh {
    /// Refresh immediately, then once per `period`.
    pub fn spawn(view_model: Arc<GalleryViewModel>, period: Duration) -> Self {
        info!(period_secs = period.as_secs(), "Gallery auto-refresh started");

        let task = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                debug!("Auto-refresh tick");
                let view_model = Arc::clone(&view_model);
                tokio::spawn(async move {
                    view_model.refresh().await;
                });
            }
        });

        Self { task, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Cancel the timer. Equivalent to dropping the handle.
    pub fn stop(self) {}
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        self.task.abort();
        debug!("Gallery auto-refresh stopped");
    }
}
