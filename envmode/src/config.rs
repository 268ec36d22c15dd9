//! Mode selection, `.env` overlays and prefixed lookups

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::TimeDelta;

use crate::error::{Error, LookupError};
use crate::lookup::LookupResult;
use crate::populate::{populate, Populate};
use crate::source::{ProcessEnv, Source};

/// Variable that selects the mode explicitly.
pub const MODE_VAR: &str = "APP_ENV";

/// Which overlay file a [`Config`] loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Production,
    Staging,
    Development,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Development => "development",
        }
    }

    /// Overlay file name, relative to the config directory.
    pub fn overlay_file(self) -> &'static str {
        match self {
            Self::Production => ".env",
            Self::Staging => ".env.staging",
            Self::Development => ".env.development",
        }
    }

    /// Pick a mode from `APP_ENV`, or from the overlay files present in `dir`.
    ///
    /// | `.env` | `.env.staging` | `.env.development` | mode |
    /// |---|---|---|---|
    /// | yes | yes | yes | development |
    /// | yes | yes | no | staging |
    /// | yes | no | any | production |
    /// | no | any | any | development |
    pub fn detect(dir: &Path) -> Result<Self, Error> {
        let explicit = ProcessEnv.resolve(MODE_VAR);
        if !explicit.is_empty() {
            return explicit.parse();
        }

        let has = |mode: Mode| dir.join(mode.overlay_file()).is_file();
        let mode = match (has(Self::Production), has(Self::Staging), has(Self::Development)) {
            (true, true, true) => Self::Development,
            (true, true, false) => Self::Staging,
            (true, false, _) => Self::Production,
            (false, _, _) => Self::Development,
        };
        Ok(mode)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

/// Builder for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    mode: Option<Mode>,
    prefix: String,
    dir: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Use `mode` instead of detecting it.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Prepend `prefix` to every looked up key.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Directory holding the overlay files (defaults to the working directory).
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Resolve the mode and load its overlay file into the process environment.
    ///
    /// # Errors
    ///
    /// - `APP_ENV` names an unknown mode
    /// - the production `.env` file is missing
    /// - the overlay file cannot be parsed
    pub fn build(self) -> Result<Config, Error> {
        let dir = self.dir.unwrap_or_else(|| PathBuf::from("."));
        let mode = match self.mode {
            Some(mode) => mode,
            None => Mode::detect(&dir)?,
        };
        tracing::debug!(%mode, dir = %dir.display(), "resolved environment mode");

        let config = Config {
            mode,
            prefix: self.prefix,
            dir,
        };
        config.load()?;
        Ok(config)
    }
}

/// Explicit configuration context: mode, key prefix and overlay directory.
///
/// Values are read from the process environment on every call, with the
/// prefix prepended to the key.
///
/// ```rust,no_run
/// use envmode::{Config, Mode};
///
/// # fn main() -> Result<(), envmode::Error> {
/// let config = Config::builder().mode(Mode::Development).prefix("APP_").build()?;
/// let port = config.key("PORT").default("8080").int_or(8080);
/// let debug = config.get_bool_or("DEBUG", false);
/// # let _ = (port, debug);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    mode: Mode,
    prefix: String,
    dir: PathBuf,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Detect the mode from the working directory and load its overlay.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    /// Merge the mode's overlay file into the process environment.
    ///
    /// Variables that are already set are not overridden. A missing file is
    /// an error only in production.
    pub fn load(&self) -> Result<(), Error> {
        let path = self.overlay_path();
        if !path.is_file() {
            if self.mode == Mode::Production {
                return Err(Error::MissingOverlay { path });
            }
            tracing::warn!(path = %path.display(), mode = %self.mode, "environment file not found");
            return Ok(());
        }

        dotenvy::from_path(&path).map_err(|source| Error::Overlay {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded environment file");
        Ok(())
    }

    pub fn overlay_path(&self) -> PathBuf {
        self.dir.join(self.mode.overlay_file())
    }

    /// Same mode and directory with a different prefix. Nothing is reloaded.
    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..self.clone()
        }
    }

    /// Same prefix and directory with a different mode. Nothing is reloaded.
    pub fn with_mode(&self, mode: Mode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_production(&self) -> bool {
        self.mode == Mode::Production
    }

    pub fn is_staging(&self) -> bool {
        self.mode == Mode::Staging
    }

    pub fn is_development(&self) -> bool {
        self.mode == Mode::Development
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Start an accessor chain for `key`.
    pub fn key(&self, key: &str) -> LookupResult {
        let key = self.prefixed(key);
        let value = ProcessEnv.resolve(&key);
        LookupResult::new(key, value)
    }

    /// Fill `target`'s fields from the environment using this prefix.
    pub fn parse<T: Populate>(&self, target: &mut T) -> Result<(), Error> {
        populate(target, &ProcessEnv, &self.prefix)
    }

    pub fn get(&self, key: &str) -> String {
        self.key(key).into_string()
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.key(key).default(default).into_string()
    }

    pub fn get_int(&self, key: &str) -> Result<i64, LookupError> {
        self.key(key).int()
    }

    /// `default` when the value is absent; a malformed value is still an error.
    pub fn get_int_or(&self, key: &str, default: i64) -> Result<i64, LookupError> {
        let result = self.key(key);
        if result.as_str().is_empty() {
            return Ok(default);
        }
        result.int()
    }

    pub fn get_float(&self, key: &str) -> Result<f64, LookupError> {
        self.key(key).float()
    }

    pub fn get_float_or(&self, key: &str, default: f64) -> Result<f64, LookupError> {
        let result = self.key(key);
        if result.as_str().is_empty() {
            return Ok(default);
        }
        result.float()
    }

    pub fn get_duration(&self, key: &str) -> Result<TimeDelta, LookupError> {
        self.key(key).duration()
    }

    pub fn get_duration_or(&self, key: &str, default: TimeDelta) -> Result<TimeDelta, LookupError> {
        let result = self.key(key);
        if result.as_str().is_empty() {
            return Ok(default);
        }
        result.duration()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.key(key).bool()
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.key(key).bool_or(default)
    }

    pub fn get_list(&self, key: &str, delimiter: &str) -> Vec<String> {
        self.key(key).list(delimiter)
    }

    pub fn get_list_or(&self, key: &str, delimiter: &str, default: Vec<String>) -> Vec<String> {
        self.key(key).list_or(delimiter, default)
    }

    pub fn get_map(&self, key: &str) -> HashMap<String, String> {
        self.key(key).map()
    }

    pub fn get_map_or(
        &self,
        key: &str,
        default: HashMap<String, String>,
    ) -> HashMap<String, String> {
        self.key(key).map_or(default)
    }
}
