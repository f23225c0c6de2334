use crate::config::ConfigurationError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static CHANNEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^AIN(\d{1,2})$").expect("[FATAL] Invalid channel regex!"));

/// An analog input line of the ADC, labeled `AIN<n>` on the harness.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Channel {
    index: u8,
}

impl Channel {
    pub const fn new(index: u8) -> Self { Self { index } }

    /// Parses a harness label such as `"AIN3"`.
    pub fn parse(label: &str) -> Result<Self, ConfigurationError> {
        CHANNEL_REGEX
            .captures(label.trim())
            .and_then(|caps| caps.get(1))
            .and_then(|idx| idx.as_str().parse::<u8>().ok())
            .map(Self::new)
            .ok_or_else(|| ConfigurationError::InvalidChannel(label.to_string()))
    }

    /// The IIO channel number used in the sysfs path.
    pub const fn index(self) -> u8 { self.index }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "AIN{}", self.index) }
}
