//! Run configuration read from the environment.
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `UT_OUTPUT` | `human`, `teamcity` | `teamcity` under TeamCity, else `human` |
//! | `UT_VERBOSE` | `1`, `true`, `0`, `false` | off |
//! | `UT_COLOR` | `auto`, `always`, `never` | `auto` |
//!
//! TeamCity agents export `TEAMCITY_VERSION`; its presence selects TeamCity
//! output unless `UT_OUTPUT` says otherwise.

use std::io::Write;
use std::str::FromStr;

use ut_report::{ColorMode, HumanFormatter, OutputFormatter, TeamCityFormatter};

/// Which formatter a run writes through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Human,
    TeamCity,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "normal" => Ok(OutputFormat::Human),
            "teamcity" => Ok(OutputFormat::TeamCity),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

/// Invalid configuration value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown output format `{0}` (expected `human` or `teamcity`)")]
    UnknownFormat(String),
    #[error("unknown color mode `{0}` (expected `auto`, `always` or `never`)")]
    UnknownColorMode(String),
    #[error("invalid value `{value}` for {key} (expected `1`, `true`, `0` or `false`)")]
    InvalidFlag { key: &'static str, value: String },
}

/// Settings for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub format: OutputFormat,
    pub verbose: bool,
    pub color: ColorMode,
}

impl RunConfig {
    pub const OUTPUT_VAR: &'static str = "UT_OUTPUT";
    pub const VERBOSE_VAR: &'static str = "UT_VERBOSE";
    pub const COLOR_VAR: &'static str = "UT_COLOR";
    pub const TEAMCITY_VAR: &'static str = "TEAMCITY_VERSION";

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let format = match lookup(Self::OUTPUT_VAR) {
            Some(value) => value.parse()?,
            None if lookup(Self::TEAMCITY_VAR).is_some() => OutputFormat::TeamCity,
            None => OutputFormat::Human,
        };
        let verbose = match lookup(Self::VERBOSE_VAR) {
            Some(value) => parse_flag(Self::VERBOSE_VAR, &value)?,
            None => false,
        };
        let color = match lookup(Self::COLOR_VAR) {
            Some(value) => parse_color_mode(&value)?,
            None => ColorMode::Auto,
        };
        let config = RunConfig {
            format,
            verbose,
            color,
        };
        tracing::debug!(?config, "run configuration");
        Ok(config)
    }

    /// Build the configured formatter over `writer`.
    ///
    /// `is_tty` resolves [`ColorMode::Auto`] for human output.
    pub fn formatter<'w, W>(&self, writer: W, is_tty: bool) -> Box<dyn OutputFormatter + 'w>
    where
        W: Write + 'w,
    {
        match self.format {
            OutputFormat::Human => Box::new(
                HumanFormatter::with_color_mode(writer, self.color, is_tty).verbose(self.verbose),
            ),
            OutputFormat::TeamCity => Box::new(TeamCityFormatter::new(writer)),
        }
    }
}

/// Parse a `UT_COLOR` value.
pub fn parse_color_mode(s: &str) -> Result<ColorMode, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "auto" => Ok(ColorMode::Auto),
        "always" => Ok(ColorMode::Always),
        "never" => Ok(ColorMode::Never),
        _ => Err(ConfigError::UnknownColorMode(s.to_string())),
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
