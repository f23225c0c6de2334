use super::SubsystemError;

/// How a supervised subsystem ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubsystemExit {
    Completed,
    Failed(SubsystemError),
    Panicked(String),
    /// Not implemented yet, never started.
    Skipped,
    Aborted,
}

impl SubsystemExit {
    /// `false` for `Failed`, `Panicked` and `Aborted`. Containment does not depend on this,
    /// every exit ends only its own subsystem.
    pub fn is_nominal(&self) -> bool { matches!(self, Self::Completed | Self::Skipped) }
}

/// Final outcome of one subsystem after `Supervisor::run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsystemReport {
    pub name: &'static str,
    pub exit: SubsystemExit,
}
