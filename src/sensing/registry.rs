use super::{Axis, Channel};
use crate::config::ConfigurationError;
use crate::event;
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Registered identities of all active photodiodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    pub channels: BTreeSet<Channel>,
    pub vectors: BTreeSet<Axis>,
    pub colors: BTreeSet<String>,
}

/// Enforces that no two active photodiodes share a channel or a mount direction,
/// and optionally a color tag.
///
/// The registry is owned by the configuration step and handed to every
/// `Photoresistor` on construction. A rejected registration never modifies it.
#[derive(Debug)]
pub struct SensorRegistry {
    allowed: BTreeSet<Channel>,
    unique_colors: bool,
    state: Mutex<RegistrySnapshot>,
}

impl SensorRegistry {
    pub fn new(allowed: impl IntoIterator<Item = Channel>, unique_colors: bool) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
            unique_colors,
            state: Mutex::new(RegistrySnapshot::default()),
        }
    }

    /// Builds a registry from harness labels like `"AIN0"`.
    pub fn from_labels<S: AsRef<str>>(
        labels: &[S],
        unique_colors: bool,
    ) -> Result<Self, ConfigurationError> {
        let allowed = labels
            .iter()
            .map(|l| Channel::parse(l.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(allowed, unique_colors))
    }

    fn lock(&self) -> MutexGuard<'_, RegistrySnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Checks all constraints first and only then registers channel, vector and color together.
    pub fn validate(
        &self,
        channel: Channel,
        vector: Axis,
        color: Option<&str>,
    ) -> Result<(), ConfigurationError> {
        if !self.allowed.contains(&channel) {
            return Err(ConfigurationError::InvalidChannel(channel.to_string()));
        }
        let mut state = self.lock();
        if state.channels.contains(&channel) {
            return Err(ConfigurationError::DuplicateChannel(channel.to_string()));
        }
        if state.vectors.contains(&vector) {
            return Err(ConfigurationError::DuplicateMountVector(vector.to_string()));
        }
        if let Some(c) = color {
            if self.unique_colors && state.colors.contains(c) {
                return Err(ConfigurationError::DuplicateColor(c.to_string()));
            }
        }
        state.channels.insert(channel);
        state.vectors.insert(vector);
        if let Some(c) = color.filter(|_| self.unique_colors) {
            state.colors.insert(c.to_string());
        }
        event!("Registered {channel} facing {vector}.");
        Ok(())
    }

    /// Removes a registration. Entries that are not registered are ignored.
    pub fn unregister(&self, channel: Channel, vector: Axis, color: Option<&str>) {
        let mut state = self.lock();
        state.channels.remove(&channel);
        state.vectors.remove(&vector);
        if let Some(c) = color {
            state.colors.remove(c);
        }
    }

    pub fn snapshot(&self) -> RegistrySnapshot { self.lock().clone() }
}
