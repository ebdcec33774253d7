//! Async host wrapper that plays delayed computer moves on a timer.
//!
//! The controller sits behind one mutex. Each deferred computer move gets a
//! single sleeping task; exiting, restarting or resetting aborts that task,
//! and the controller's ticket check rejects anything that slips through.

use crate::config::MatchConfig;
use crate::controller::MatchController;
use crate::error::MatchError;
use crate::snapshot::MatchSnapshot;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

/// Shared, timer-driven match.
#[derive(Debug)]
pub struct MatchSession {
    controller: Arc<Mutex<MatchController>>,
    timer: Option<JoinHandle<()>>,
}

impl MatchSession {
    /// Wraps a controller.
    pub fn new(controller: MatchController) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            timer: None,
        }
    }

    /// Starts a match. See [`MatchController::start_match`].
    #[instrument(skip(self, config))]
    pub async fn start_match(&mut self, config: MatchConfig) -> Result<MatchSnapshot, MatchError> {
        self.cancel_timer();
        let result = self.controller.lock().await.start_match(config);
        self.after_command(result).await
    }

    /// Submits a human move. See [`MatchController::submit_move`].
    #[instrument(skip(self))]
    pub async fn submit_move(&mut self, index: usize) -> Result<MatchSnapshot, MatchError> {
        let result = self.controller.lock().await.submit_move(index);
        self.after_command(result).await
    }

    /// Starts the next round. See [`MatchController::advance_round`].
    #[instrument(skip(self))]
    pub async fn advance_round(&mut self) -> Result<MatchSnapshot, MatchError> {
        let result = self.controller.lock().await.advance_round();
        self.after_command(result).await
    }

    /// Replays the current round. See [`MatchController::reset_round`].
    #[instrument(skip(self))]
    pub async fn reset_round(&mut self) -> Result<MatchSnapshot, MatchError> {
        let result = self.controller.lock().await.reset_round();
        if result.is_ok() {
            self.cancel_timer();
        }
        self.after_command(result).await
    }

    /// Starts a fresh match with the last configuration.
    #[instrument(skip(self))]
    pub async fn rematch(&mut self) -> Result<MatchSnapshot, MatchError> {
        self.cancel_timer();
        let result = self.controller.lock().await.rematch();
        self.after_command(result).await
    }

    /// Abandons the match, keeping its configuration for a rematch.
    #[instrument(skip(self))]
    pub async fn restart_match(&mut self) -> MatchSnapshot {
        self.cancel_timer();
        let mut controller = self.controller.lock().await;
        controller.restart_match();
        controller.snapshot()
    }

    /// Abandons the match and returns to setup.
    #[instrument(skip(self))]
    pub async fn exit_match(&mut self) -> MatchSnapshot {
        self.cancel_timer();
        let mut controller = self.controller.lock().await;
        controller.exit_match();
        controller.snapshot()
    }

    /// Current state.
    pub async fn snapshot(&self) -> MatchSnapshot {
        self.controller.lock().await.snapshot()
    }

    /// Waits until a scheduled computer move (if any) has been played.
    pub async fn wait_for_computer(&mut self) -> MatchSnapshot {
        if let Some(timer) = self.timer.take()
            && let Err(err) = timer.await
            && !err.is_cancelled()
        {
            warn!(error = %err, "Computer move task failed");
        }
        self.snapshot().await
    }

    async fn after_command(
        &mut self,
        result: Result<(), MatchError>,
    ) -> Result<MatchSnapshot, MatchError> {
        result?;
        self.schedule_pending().await;
        Ok(self.snapshot().await)
    }

    async fn schedule_pending(&mut self) {
        let (ticket, delay) = {
            let controller = self.controller.lock().await;
            (controller.pending_computer_move(), controller.computer_delay())
        };
        let Some(ticket) = ticket else {
            return;
        };

        self.cancel_timer();
        let controller = Arc::clone(&self.controller);
        debug!(?ticket, ?delay, "Scheduling computer move");
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut controller = controller.lock().await;
            if let Err(err) = controller.play_computer_move(ticket) {
                warn!(error = %err, "Scheduled computer move not played");
            }
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            debug!("Cancelled scheduled computer move");
        }
    }
}

impl Drop for MatchSession {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
