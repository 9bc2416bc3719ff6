use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context as _;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::foundation::core::GeoPoint;
use crate::foundation::error::{RadarError, RadarResult};
use crate::marker::icon::DEFAULT_ICON_SIZE;

/// Places searched, in order, when no config path is given.
pub const CONFIG_PATHS: [&str; 3] = ["/app/config.yaml", "config.yaml", "/config/config.yaml"];

const MIN_ICON_SIZE: u32 = 8;

/// Immutable settings snapshot for the life of a cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub radar: RadarSettings,
    pub scheduler: SchedulerSettings,
    pub archive: ArchiveSettings,
    pub delivery: DeliverySettings,
    pub layers: LayerList,
    pub output: OutputSettings,
    pub gif: GifSettings,
    pub logging: LoggingSettings,
    pub residential_location: ResidentialSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarSettings {
    pub product_id: String,
    /// IANA zone name used for the local half of the capture note.
    pub timezone: String,
    pub radar_directory: String,
    pub transparencies_directory: String,
}

impl Default for RadarSettings {
    fn default() -> Self {
        Self {
            product_id: "IDR022".to_string(),
            timezone: "Australia/Melbourne".to_string(),
            radar_directory: "anon/gen/radar".to_string(),
            transparencies_directory: "anon/gen/radar_transparencies".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// Continuous mode; `false` runs one cycle and exits.
    pub enabled: bool,
    /// Seconds between cycles after a success.
    pub update_interval: u64,
    pub retry_on_error: bool,
    /// Seconds before the next attempt after a failure, when `retry_on_error` is set.
    pub retry_interval: u64,
    /// Exit the loop after a failure when `retry_on_error` is off.
    pub stop_on_failure: bool,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            update_interval: 600,
            retry_on_error: true,
            retry_interval: 60,
            stop_on_failure: false,
        }
    }
}

impl SchedulerSettings {
    pub fn update_delay(&self) -> Duration {
        Duration::from_secs(self.update_interval)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_interval)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveSettings {
    /// Local mirror of the radar archive.
    pub root: PathBuf,
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/archive"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliverySettings {
    /// Mounted share root; delivery is skipped when unset.
    pub root: Option<PathBuf>,
    pub remote_path: String,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            root: None,
            remote_path: "/radar".to_string(),
        }
    }
}

/// Transparency layers, bottom to top.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerList(pub Vec<String>);

impl Default for LayerList {
    fn default() -> Self {
        Self(
            ["background", "catchments", "topography", "locations"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub animated_gif: String,
    pub timestamp_file: String,
    pub legend_file: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("/images"),
            animated_gif: "radar_animated.gif".to_string(),
            timestamp_file: "radar_last_update.txt".to_string(),
            legend_file: PathBuf::from("/app/IDR.legend.0.png"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GifSettings {
    /// Per-frame delay in milliseconds.
    pub duration: u32,
    /// `0` loops forever.
    #[serde(rename = "loop")]
    pub loop_count: u16,
}

impl Default for GifSettings {
    fn default() -> Self {
        Self {
            duration: 500,
            loop_count: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResidentialSettings {
    pub enabled: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub icon_size: u32,
}

impl Default for ResidentialSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            latitude: None,
            longitude: None,
            icon_size: DEFAULT_ICON_SIZE,
        }
    }
}

impl ResidentialSettings {
    /// Marker position, or `None` when the marker is off or incomplete.
    pub fn target(&self) -> Option<GeoPoint> {
        if !self.enabled {
            return None;
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }

    /// Turn the marker off when it is enabled without both coordinates. Returns whether it did.
    pub fn disable_if_incomplete(&mut self) -> bool {
        if !self.enabled || (self.latitude.is_some() && self.longitude.is_some()) {
            return false;
        }
        tracing::warn!("residential location enabled but coordinates not provided; marker disabled");
        self.enabled = false;
        true
    }
}

impl Settings {
    /// Parse a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(text: &str) -> RadarResult<Self> {
        serde_yaml::from_str(text).map_err(|e| RadarError::config(format!("parse yaml: {e}")))
    }

    /// Read and parse a YAML settings file.
    pub fn load(path: &Path) -> RadarResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))
            .map_err(|e| RadarError::config(format!("{e:#}")))?;
        Self::from_yaml_str(&text)
            .map_err(|e| RadarError::config(format!("{} ({e})", path.display())))
    }

    /// First existing path among `explicit` or [`CONFIG_PATHS`].
    pub fn locate(explicit: Option<&Path>) -> RadarResult<PathBuf> {
        if let Some(path) = explicit {
            if path.is_file() {
                return Ok(path.to_path_buf());
            }
            return Err(RadarError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_file())
            .ok_or_else(|| {
                RadarError::config(format!(
                    "no configuration file found; checked paths: {}",
                    CONFIG_PATHS.join(", ")
                ))
            })
    }

    /// Locate, load, apply overrides from the process environment, drop an incomplete marker,
    /// and validate.
    pub fn resolve(explicit: Option<&Path>) -> RadarResult<(PathBuf, Self)> {
        let path = Self::locate(explicit)?;
        let mut settings = Self::load(&path)?;
        settings.apply_env_overrides(|key| std::env::var(key).ok())?;
        settings.residential_location.disable_if_incomplete();
        settings.validate()?;
        Ok((path, settings))
    }

    /// Apply environment-style overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> RadarResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PRODUCT_ID") {
            self.radar.product_id = v;
        }
        if let Some(v) = lookup("TIMEZONE") {
            self.radar.timezone = v;
        }
        if let Some(v) = lookup("SCHEDULER_ENABLED") {
            self.scheduler.enabled = v.trim().eq_ignore_ascii_case("true");
        }
        if let Some(v) = lookup("UPDATE_INTERVAL") {
            self.scheduler.update_interval = parse_number("UPDATE_INTERVAL", &v)?;
        }
        if let Some(v) = lookup("RETRY_INTERVAL") {
            self.scheduler.retry_interval = parse_number("RETRY_INTERVAL", &v)?;
        }
        if let Some(v) = lookup("OUTPUT_DIR") {
            self.output.directory = PathBuf::from(v);
        }
        if let Some(v) = lookup("ANIMATED_GIF") {
            self.output.animated_gif = v;
        }
        if let Some(v) = lookup("TIMESTAMP_FILE") {
            self.output.timestamp_file = v;
        }
        if let Some(v) = lookup("LEGEND_FILE") {
            self.output.legend_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("GIF_DURATION") {
            self.gif.duration = parse_number("GIF_DURATION", &v)?;
        }
        if let Some(v) = lookup("GIF_LOOP") {
            self.gif.loop_count = parse_number("GIF_LOOP", &v)?;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            self.logging.level = v.to_uppercase();
        }
        if let Some(v) = lookup("ARCHIVE_ROOT") {
            self.archive.root = PathBuf::from(v);
        }
        if let Some(v) = lookup("DELIVERY_ROOT") {
            self.delivery.root = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("DELIVERY_REMOTE_PATH") {
            self.delivery.remote_path = v;
        }
        Ok(())
    }

    /// Reject settings that cannot produce a working cycle.
    pub fn validate(&self) -> RadarResult<()> {
        if self.radar.product_id.trim().is_empty() {
            return Err(RadarError::config("radar.product_id must not be empty"));
        }
        if self.radar.timezone.parse::<Tz>().is_err() {
            return Err(RadarError::config(format!(
                "radar.timezone '{}' is not a known IANA zone",
                self.radar.timezone
            )));
        }
        if self.scheduler.update_interval == 0 {
            return Err(RadarError::config("scheduler.update_interval must be > 0"));
        }
        if self.scheduler.retry_interval == 0 {
            return Err(RadarError::config("scheduler.retry_interval must be > 0"));
        }
        if self.output.animated_gif.trim().is_empty() || self.output.timestamp_file.trim().is_empty()
        {
            return Err(RadarError::config("output file names must not be empty"));
        }
        if self.residential_location.icon_size < MIN_ICON_SIZE {
            return Err(RadarError::config(format!(
                "residential_location.icon_size must be >= {MIN_ICON_SIZE}"
            )));
        }
        Ok(())
    }
}

fn parse_number<T>(key: &str, value: &str) -> RadarResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| RadarError::config(format!("{key}='{value}' is not a valid number: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
