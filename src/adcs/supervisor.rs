use super::{
    Subsystem,
    signal::{SubsystemExit, SubsystemReport},
};
use crate::{error, info, log, warn};
use std::any::Any;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

enum Slot {
    Active(Box<dyn Subsystem>),
    Placeholder(&'static str),
}

/// Runs every registered subsystem as its own task and isolates their failures.
///
/// All subsystems share one `CancellationToken`. It is cancelled on Ctrl-C or through
/// [`Supervisor::token`]. An error or a panic of one subsystem is logged and counted as
/// its termination, the others keep running.
pub struct Supervisor {
    slots: Vec<Slot>,
    c_tok: CancellationToken,
}

impl Supervisor {
    pub fn new() -> Self { Self { slots: Vec::new(), c_tok: CancellationToken::new() } }

    pub fn register(&mut self, subsystem: Box<dyn Subsystem>) {
        self.slots.push(Slot::Active(subsystem));
    }

    /// Reserves a slot for a subsystem that is not implemented yet.
    pub fn register_placeholder(&mut self, name: &'static str) {
        self.slots.push(Slot::Placeholder(name));
    }

    pub fn token(&self) -> CancellationToken { self.c_tok.clone() }

    /// Spawns all subsystems and waits until every one of them has returned.
    pub async fn run(self) -> Vec<SubsystemReport> {
        let signal_tok = self.c_tok.clone();
        let signal_task = tokio::spawn(async move {
            tokio::select! {
                res = tokio::signal::ctrl_c() => match res {
                    Ok(()) => {
                        info!("Ctrl-C received, shutting down.");
                        signal_tok.cancel();
                    }
                    Err(e) => error!("Can not listen for Ctrl-C: {e}"),
                },
                () = signal_tok.cancelled() => {}
            }
        });

        let mut reports = Vec::with_capacity(self.slots.len());
        let mut handles = Vec::new();
        for slot in self.slots {
            match slot {
                Slot::Active(subsystem) => {
                    let name = subsystem.name();
                    log!("Starting subsystem {name}.");
                    handles.push((name, tokio::spawn(subsystem.run(self.c_tok.clone()))));
                }
                Slot::Placeholder(name) => {
                    warn!("Subsystem {name} is not implemented, skipping.");
                    reports.push(SubsystemReport { name, exit: SubsystemExit::Skipped });
                }
            }
        }

        for (name, handle) in handles {
            let exit = match handle.await {
                Ok(Ok(())) => {
                    info!("Subsystem {name} terminated.");
                    SubsystemExit::Completed
                }
                Ok(Err(e)) => {
                    error!("Subsystem {name} failed: {e}");
                    SubsystemExit::Failed(e)
                }
                Err(e) => Self::join_failure(name, e),
            };
            reports.push(SubsystemReport { name, exit });
        }
        signal_task.abort();
        reports
    }

    fn join_failure(name: &'static str, err: JoinError) -> SubsystemExit {
        if err.is_panic() {
            let msg = panic_message(&*err.into_panic());
            error!("Subsystem {name} panicked: {msg}");
            SubsystemExit::Panicked(msg)
        } else {
            warn!("Subsystem {name} was aborted.");
            SubsystemExit::Aborted
        }
    }
}

impl Default for Supervisor {
    fn default() -> Self { Self::new() }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        String::from("unknown panic payload")
    }
}
