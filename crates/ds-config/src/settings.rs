//! The DownShift settings aggregate and its sidecar-file loader.
//!
//! Settings are bound from an XML sidecar file next to the service
//! executable (see [`crate::resolve`]). Every value is self-enforcing:
//! numeric fields are clamped into their bounds on every assignment and
//! text fields are stored trimmed, so an out-of-range or padded value is
//! never observable, whether it came from the file or from a direct
//! setter call. A missing file is not an error; a malformed one is
//! reported as a single [`SettingsError`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::SettingsError;
use crate::resolve;

/// Default number of worker threads probing process load.
pub const DEFAULT_WORKERS: u32 = 5;

/// Default per-process load threshold, in percent.
pub const DEFAULT_PROCESS_LOAD_MAX: u32 = 25;

/// Default normalization time, in seconds.
pub const DEFAULT_NORMALIZATION_TIME: u64 = 5;

const WORKERS_BOUNDS: (i64, i64) = (1, 25);
const PROCESS_LOAD_MAX_BOUNDS: (i64, i64) = (0, 100);
const NORMALIZATION_TIME_FLOOR: i64 = 1;

fn whitespace() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

/// Tunable operating parameters for the DownShift service.
///
/// Construct with [`Settings::default`] or [`Settings::load`]; both paths
/// run every value through the same clamping/trimming setters. The entity
/// is a read-only snapshot for the rest of the service once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "SettingsDoc")]
pub struct Settings {
    workers: u32,
    process_load_max: u32,
    normalization_time: u64,
    suspension: String,
    decrease: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            process_load_max: DEFAULT_PROCESS_LOAD_MAX,
            normalization_time: DEFAULT_NORMALIZATION_TIME,
            suspension: String::new(),
            decrease: String::new(),
        }
    }
}

impl Settings {
    /// Number of worker threads, clamped to [1, 25].
    pub fn workers(&self) -> u32 {
        self.workers
    }

    /// Set the worker count; out-of-range input snaps to the nearest bound.
    pub fn set_workers(&mut self, value: i64) {
        self.workers = value.clamp(WORKERS_BOUNDS.0, WORKERS_BOUNDS.1) as u32;
    }

    /// Per-process load threshold in percent, clamped to [0, 100].
    pub fn process_load_max(&self) -> u32 {
        self.process_load_max
    }

    /// Set the load threshold; out-of-range input snaps to the nearest bound.
    pub fn set_process_load_max(&mut self, value: i64) {
        self.process_load_max =
            value.clamp(PROCESS_LOAD_MAX_BOUNDS.0, PROCESS_LOAD_MAX_BOUNDS.1) as u32;
    }

    /// Normalization time in seconds, at least 1.
    pub fn normalization_time(&self) -> u64 {
        self.normalization_time
    }

    /// Set the normalization time; values below 1 snap to 1.
    pub fn set_normalization_time(&mut self, value: i64) {
        self.normalization_time = value.max(NORMALIZATION_TIME_FLOOR) as u64;
    }

    /// Raw suspension list as stored: trimmed, internal whitespace intact.
    pub fn suspension(&self) -> &str {
        &self.suspension
    }

    /// Set the suspension list; leading/trailing whitespace is dropped.
    pub fn set_suspension(&mut self, value: &str) {
        self.suspension = value.trim().to_string();
    }

    /// Raw decrease list as stored: trimmed, internal whitespace intact.
    pub fn decrease(&self) -> &str {
        &self.decrease
    }

    /// Set the decrease list; leading/trailing whitespace is dropped.
    pub fn set_decrease(&mut self, value: &str) {
        self.decrease = value.trim().to_string();
    }

    /// Process names whose threads get suspended, split on whitespace runs.
    ///
    /// Recomputed on every call from the stored text. An empty stored
    /// string yields `[""]` (one empty token), not an empty sequence;
    /// callers that need "nothing configured" should check
    /// [`Settings::suspension`] for emptiness instead of counting tokens.
    pub fn suspensions(&self) -> Vec<&str> {
        whitespace().split(&self.suspension).collect()
    }

    /// Process names whose priority gets decreased, split on whitespace runs.
    ///
    /// Same empty-string caveat as [`Settings::suspensions`].
    pub fn decreases(&self) -> Vec<&str> {
        whitespace().split(&self.decrease).collect()
    }

    /// Load settings from the sidecar file next to the running executable.
    ///
    /// A missing file yields all defaults. A file that exists but cannot
    /// be opened, parsed, or bound fails with a single [`SettingsError`];
    /// there is no per-field recovery and no retry.
    pub fn load() -> Result<Self, SettingsError> {
        let path = resolve::settings_path().map_err(SettingsError::malformed)?;
        Self::from_file(&path)
    }

    /// Load settings from an explicit file path.
    ///
    /// Same absence and failure semantics as [`Settings::load`].
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let file = File::open(path).map_err(SettingsError::malformed)?;
        let settings: Settings =
            quick_xml::de::from_reader(BufReader::new(file)).map_err(SettingsError::malformed)?;

        debug!(
            path = %path.display(),
            workers = settings.workers,
            process_load_max = settings.process_load_max,
            normalization_time = settings.normalization_time,
            "settings loaded"
        );
        Ok(settings)
    }

    /// Bind settings from an in-memory XML document.
    pub fn parse_xml(xml: &str) -> Result<Self, SettingsError> {
        quick_xml::de::from_str(xml).map_err(SettingsError::malformed)
    }
}

/// Raw shape of the `<settings>` document.
///
/// Every element is optional; absent elements bind as the field default.
/// Conversion into [`Settings`] goes through the public setters so file
/// values get the exact same clamping/trimming as direct assignment.
#[derive(Debug, Default, Deserialize)]
struct SettingsDoc {
    workers: Option<i64>,

    #[serde(rename = "processLoadMax")]
    process_load_max: Option<i64>,

    #[serde(rename = "normalizationTime")]
    normalization_time: Option<i64>,

    suspensions: Option<String>,

    decreases: Option<String>,
}

impl From<SettingsDoc> for Settings {
    fn from(doc: SettingsDoc) -> Self {
        let mut settings = Settings::default();
        if let Some(value) = doc.workers {
            settings.set_workers(value);
        }
        if let Some(value) = doc.process_load_max {
            settings.set_process_load_max(value);
        }
        if let Some(value) = doc.normalization_time {
            settings.set_normalization_time(value);
        }
        if let Some(value) = doc.suspensions {
            settings.set_suspension(&value);
        }
        if let Some(value) = doc.decreases {
            settings.set_decrease(&value);
        }
        settings
    }
}
