//! Static configuration of the sun sensor deployment.
//!
//! Defaults describe the flight harness (five photodiodes wired to the
//! `BeagleBone` IIO ADC). Every tunable can be overridden through an
//! `ADCS_*` environment variable at startup.

use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};

/// Errors raised while loading the configuration or while constructing sensors from it.
/// All of them abort startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The label is malformed or not part of the allowed channel set.
    InvalidChannel(String),
    /// Another active sensor already uses this channel.
    DuplicateChannel(String),
    /// Another active sensor already faces this direction.
    DuplicateMountVector(String),
    /// Another active sensor already carries this color tag.
    DuplicateColor(String),
    /// The vector is not one of the six canonical axis directions.
    InvalidMountVector([i8; 3]),
    /// A full scale code of zero can not be used for normalization.
    InvalidFullScale,
    /// An environment override could not be parsed.
    InvalidEnvValue { key: &'static str, value: String },
    /// The telemetry HTTP client could not be built.
    TelemetryClient(String),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChannel(ch) => write!(f, "invalid channel name: {ch}"),
            Self::DuplicateChannel(ch) => write!(f, "channel {ch} is already in use"),
            Self::DuplicateMountVector(v) => write!(f, "vector {v} is already in use"),
            Self::DuplicateColor(c) => write!(f, "color {c} is already in use"),
            Self::InvalidMountVector(v) => write!(f, "{v:?} is not a canonical axis direction"),
            Self::InvalidFullScale => write!(f, "full scale code must be greater than zero"),
            Self::InvalidEnvValue { key, value } => write!(f, "can not parse {key}={value}"),
            Self::TelemetryClient(reason) => write!(f, "telemetry client setup failed: {reason}"),
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// One photodiode entry of the harness description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorSpec {
    pub channel: String,
    pub color: Option<String>,
    pub vector: [i8; 3],
}

impl SensorSpec {
    pub fn new(channel: &str, color: &str, vector: [i8; 3]) -> Self {
        Self { channel: channel.to_string(), color: Some(color.to_string()), vector }
    }
}

/// Connection settings of the remote plot app.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Whether live ticks are published. The shutdown publish is sent regardless.
    pub enabled: bool,
    pub base_url: String,
    pub auth_header: (String, String),
    pub timeout: Duration,
}

/// Settings of the interactive heading calibration run.
#[derive(Debug, Clone)]
pub struct CalibrationConfig {
    pub step_deg: u32,
    pub samples_per_heading: usize,
    pub sample_delay: Duration,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AdcsConfig {
    pub allowed_channels: Vec<String>,
    pub sensors: Vec<SensorSpec>,
    /// Tick period of the acquisition loop. Zero means a single shot.
    pub read_interval: Duration,
    pub print_result: bool,
    pub telemetry: TelemetryConfig,
    pub full_scale_code: u16,
    pub reference_voltage: f64,
    /// Sysfs path of a raw ADC value, `{channel}` is replaced by the channel index.
    pub iio_path_template: String,
    pub unique_colors: bool,
    pub calibration: Option<CalibrationConfig>,
}

impl Default for AdcsConfig {
    fn default() -> Self {
        Self {
            allowed_channels: (0..=6).map(|i| format!("AIN{i}")).collect(),
            sensors: vec![
                SensorSpec::new("AIN2", "orange", [0, 0, 1]),
                SensorSpec::new("AIN0", "white", [1, 0, 0]),
                SensorSpec::new("AIN1", "green", [0, -1, 0]),
                SensorSpec::new("AIN5", "yellow", [0, 1, 0]),
                SensorSpec::new("AIN3", "brown", [-1, 0, 0]),
            ],
            read_interval: Duration::from_secs(1),
            print_result: true,
            telemetry: TelemetryConfig {
                enabled: true,
                base_url: String::from("https://adcs-plot-app-5522ec11eb30.herokuapp.com"),
                auth_header: (String::from("Authorization"), String::from("ADCS")),
                timeout: Duration::from_secs(5),
            },
            full_scale_code: 4095,
            reference_voltage: 1.8,
            iio_path_template: String::from(
                "/sys/bus/iio/devices/iio:device0/in_voltage{channel}_raw",
            ),
            unique_colors: false,
            calibration: None,
        }
    }
}

impl AdcsConfig {
    const ENV_READ_INTERVAL: &'static str = "ADCS_READ_INTERVAL_MS";
    const ENV_PRINT_RESULT: &'static str = "ADCS_PRINT_RESULT";
    const ENV_PUBLISH: &'static str = "ADCS_PUBLISH_TELEMETRY";
    const ENV_URL: &'static str = "ADCS_TELEMETRY_URL";
    const ENV_KEY: &'static str = "ADCS_TELEMETRY_KEY";
    const ENV_IIO_PATH: &'static str = "ADCS_IIO_PATH";
    const ENV_UNIQUE_COLORS: &'static str = "ADCS_UNIQUE_COLORS";
    const ENV_CALIB_STEP: &'static str = "ADCS_CALIBRATION_STEP_DEG";
    const ENV_CALIB_OUTPUT: &'static str = "ADCS_CALIBRATION_OUTPUT";

    /// Builds the default configuration and applies all `ADCS_*` environment overrides.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigurationError>
    where F: Fn(&'static str) -> Option<String> {
        if let Some(ms) = parse_var::<u64, _>(&lookup, Self::ENV_READ_INTERVAL)? {
            self.read_interval = Duration::from_millis(ms);
        }
        if let Some(print) = parse_bool(&lookup, Self::ENV_PRINT_RESULT)? {
            self.print_result = print;
        }
        if let Some(publish) = parse_bool(&lookup, Self::ENV_PUBLISH)? {
            self.telemetry.enabled = publish;
        }
        if let Some(url) = lookup(Self::ENV_URL) {
            self.telemetry.base_url = url;
        }
        if let Some(key) = lookup(Self::ENV_KEY) {
            self.telemetry.auth_header.1 = key;
        }
        if let Some(path) = lookup(Self::ENV_IIO_PATH) {
            self.iio_path_template = path;
        }
        if let Some(unique) = parse_bool(&lookup, Self::ENV_UNIQUE_COLORS)? {
            self.unique_colors = unique;
        }
        if let Some(step_deg) = parse_var::<u32, _>(&lookup, Self::ENV_CALIB_STEP)? {
            if step_deg == 0 {
                return Err(ConfigurationError::InvalidEnvValue {
                    key: Self::ENV_CALIB_STEP,
                    value: step_deg.to_string(),
                });
            }
            let output = lookup(Self::ENV_CALIB_OUTPUT)
                .map_or_else(|| PathBuf::from("sun_sensor_results.csv"), PathBuf::from);
            self.calibration = Some(CalibrationConfig {
                step_deg,
                samples_per_heading: 10,
                sample_delay: Duration::from_secs(1),
                output,
            });
        }
        if self.full_scale_code == 0 {
            return Err(ConfigurationError::InvalidFullScale);
        }
        Ok(self)
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigurationError>
where
    T: FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value.trim().parse::<T>().map_err(|_| ConfigurationError::InvalidEnvValue { key, value })
        })
        .transpose()
}

fn parse_bool<F>(lookup: &F, key: &'static str) -> Result<Option<bool>, ConfigurationError>
where F: Fn(&'static str) -> Option<String> {
    lookup(key)
        .map(|value| match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigurationError::InvalidEnvValue { key, value }),
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_harness() {
        let config = AdcsConfig::default();
        assert_eq!(config.sensors.len(), 5);
        assert_eq!(config.allowed_channels.len(), 7);
        assert_eq!(config.full_scale_code, 4095);
        assert_eq!(config.read_interval, Duration::from_secs(1));
        assert!(!config.unique_colors);
        assert!(config.calibration.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = AdcsConfig::default()
            .with_overrides(lookup_from(&[
                ("ADCS_READ_INTERVAL_MS", "250"),
                ("ADCS_PUBLISH_TELEMETRY", "off"),
                ("ADCS_TELEMETRY_KEY", "secret"),
                ("ADCS_CALIBRATION_STEP_DEG", "30"),
            ]))
            .unwrap();
        assert_eq!(config.read_interval, Duration::from_millis(250));
        assert!(!config.telemetry.enabled);
        assert_eq!(config.telemetry.auth_header.1, "secret");
        let calib = config.calibration.unwrap();
        assert_eq!(calib.step_deg, 30);
        assert_eq!(calib.output, PathBuf::from("sun_sensor_results.csv"));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let res = AdcsConfig::default().with_overrides(lookup_from(&[("ADCS_PRINT_RESULT", "maybe")]));
        assert_eq!(
            res.unwrap_err(),
            ConfigurationError::InvalidEnvValue { key: "ADCS_PRINT_RESULT", value: "maybe".into() }
        );
        let res = AdcsConfig::default().with_overrides(lookup_from(&[("ADCS_READ_INTERVAL_MS", "-3")]));
        assert!(res.is_err());
    }
}
