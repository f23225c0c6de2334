use strum_macros::Display;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Lifecycle of an `AcquisitionLoop`. Transitions only move forward, `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum LoopState {
    Idle,
    Running,
    Stopping,
    Stopped,
}

/// Cloneable remote control of a running loop.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    state_rx: watch::Receiver<LoopState>,
    stop_tok: CancellationToken,
}

impl LoopHandle {
    pub(super) fn new(state_rx: watch::Receiver<LoopState>, stop_tok: CancellationToken) -> Self {
        Self { state_rx, stop_tok }
    }

    pub fn state(&self) -> LoopState { *self.state_rx.borrow() }

    /// Requests termination. Has no effect unless the loop is currently running.
    pub fn stop(&self) {
        if self.state() == LoopState::Running {
            self.stop_tok.cancel();
        }
    }

    /// Waits until the loop reached `target` or a later state.
    /// Returns the observed state, or `None` if the loop was dropped before.
    pub async fn wait_for(&self, target: LoopState) -> Option<LoopState> {
        let mut rx = self.state_rx.clone();
        rx.wait_for(|state| *state >= target).await.ok().map(|state| *state)
    }
}
