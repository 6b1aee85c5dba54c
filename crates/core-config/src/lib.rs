//! Configuration loading for `hexgrid.toml`.
//!
//! The file is parsed leniently into [`ConfigFile`] (plain strings and
//! integers) and then validated field by field into typed [`Settings`]. A
//! field that fails validation logs a `warn!` on target `config` and keeps
//! its default, so one bad value does not discard the rest of the file. A
//! missing file, or one that is not valid TOML for this layout, yields the
//! defaults.
//!
//! ```toml
//! [layout]
//! bytes_per_row = 16          # or "auto"
//! code_type = "hexadecimal"   # binary | octal | decimal | hexadecimal
//! view_mode = "dual"          # code_matrix | text_preview | dual
//! row_position_length = 0     # 0 = derived from the document size
//!
//! [layout.grouping]
//! half_space = 0
//! space = 1
//! double_space = 0
//!
//! [caret]
//! blink_rate_ms = 450         # 0 disables blinking
//!
//! [scroll]
//! vertical = "if_needed"      # never | if_needed | always
//! horizontal = "if_needed"
//! vertical_size = 1
//! horizontal_size = 1
//!
//! [display]
//! uppercase = true
//! ```

use anyhow::Result;
use core_layout::{
    CodeType, DigitCase, LayoutError, LayoutProfile, ViewMode, check_bytes_per_row,
};
use core_model::{BytesPerRow, DEFAULT_SCROLLBAR_SIZE, MAX_ROW_POSITION_LENGTH, Navigator};
use core_state::{DEFAULT_BLINK_RATE, ScrollbarVisibility};
use serde::Deserialize;
use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::{DeserializeOwned, IntoDeserializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use std::{fs, path::PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CONFIG_FILE_NAME: &str = "hexgrid.toml";

/// A raw configuration value that cannot be turned into a setting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown {field} `{value}`")]
    UnknownKeyword { field: &'static str, value: String },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: i64 },
    #[error("{field} value {value} is too large")]
    TooLarge { field: &'static str, value: i64 },
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// `bytes_per_row` as written: a count or the `"auto"` keyword.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawBytesPerRow {
    Count(i64),
    Keyword(String),
}

impl Default for RawBytesPerRow {
    fn default() -> Self {
        RawBytesPerRow::Count(16)
    }
}

/// Command line form; anything that is not an integer is kept as a keyword
/// and judged during validation.
impl FromStr for RawBytesPerRow {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i64>() {
            Ok(n) => RawBytesPerRow::Count(n),
            Err(_) => RawBytesPerRow::Keyword(s.to_string()),
        })
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GroupingConfig {
    pub half_space: i64,
    pub space: i64,
    pub double_space: i64,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            half_space: 0,
            space: 1,
            double_space: 0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutConfig {
    pub bytes_per_row: RawBytesPerRow,
    pub code_type: String,
    pub view_mode: String,
    pub row_position_length: i64,
    pub grouping: GroupingConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bytes_per_row: RawBytesPerRow::default(),
            code_type: "hexadecimal".to_string(),
            view_mode: "dual".to_string(),
            row_position_length: 0,
            grouping: GroupingConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CaretConfig {
    pub blink_rate_ms: i64,
}

impl Default for CaretConfig {
    fn default() -> Self {
        Self {
            blink_rate_ms: DEFAULT_BLINK_RATE.as_millis() as i64,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ScrollConfig {
    pub vertical: String,
    pub horizontal: String,
    pub vertical_size: i64,
    pub horizontal_size: i64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            vertical: "if_needed".to_string(),
            horizontal: "if_needed".to_string(),
            vertical_size: i64::from(DEFAULT_SCROLLBAR_SIZE),
            horizontal_size: i64::from(DEFAULT_SCROLLBAR_SIZE),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub uppercase: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { uppercase: true }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub caret: CaretConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Validated settings ready to be applied to a [`Navigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub code_type: CodeType,
    pub view_mode: ViewMode,
    pub bytes_per_row: BytesPerRow,
    pub profile: LayoutProfile,
    pub row_position_length: usize,
    pub blink_rate: Duration,
    pub vertical_scrollbar: ScrollbarVisibility,
    pub horizontal_scrollbar: ScrollbarVisibility,
    pub vertical_scrollbar_size: u32,
    pub horizontal_scrollbar_size: u32,
    pub digit_case: DigitCase,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            code_type: CodeType::default(),
            view_mode: ViewMode::default(),
            bytes_per_row: BytesPerRow::default(),
            profile: LayoutProfile::default(),
            row_position_length: 0,
            blink_rate: DEFAULT_BLINK_RATE,
            vertical_scrollbar: ScrollbarVisibility::default(),
            horizontal_scrollbar: ScrollbarVisibility::default(),
            vertical_scrollbar_size: DEFAULT_SCROLLBAR_SIZE,
            horizontal_scrollbar_size: DEFAULT_SCROLLBAR_SIZE,
            digit_case: DigitCase::Upper,
        }
    }
}

fn keyword<T: DeserializeOwned>(field: &'static str, raw: &str) -> Result<T, ConfigError> {
    let de: StrDeserializer<'_, ValueError> = raw.trim().into_deserializer();
    T::deserialize(de).map_err(|_| ConfigError::UnknownKeyword {
        field,
        value: raw.to_string(),
    })
}

fn to_usize(field: &'static str, value: i64) -> Result<usize, ConfigError> {
    let unsigned = u64::try_from(value).map_err(|_| ConfigError::Negative { field, value })?;
    usize::try_from(unsigned).map_err(|_| ConfigError::TooLarge { field, value })
}

fn to_u32(field: &'static str, value: i64) -> Result<u32, ConfigError> {
    let unsigned = u64::try_from(value).map_err(|_| ConfigError::Negative { field, value })?;
    u32::try_from(unsigned).map_err(|_| ConfigError::TooLarge { field, value })
}

fn parse_bytes_per_row(raw: &RawBytesPerRow) -> Result<BytesPerRow, ConfigError> {
    match raw {
        RawBytesPerRow::Count(n) => {
            let n = check_bytes_per_row(to_usize("bytes_per_row", *n)?)?;
            Ok(BytesPerRow::Fixed(n))
        }
        RawBytesPerRow::Keyword(k) if k.trim().eq_ignore_ascii_case("auto") => {
            Ok(BytesPerRow::Auto)
        }
        RawBytesPerRow::Keyword(k) => Err(ConfigError::UnknownKeyword {
            field: "bytes_per_row",
            value: k.clone(),
        }),
    }
}

fn parse_profile(grouping: &GroupingConfig) -> Result<LayoutProfile, ConfigError> {
    Ok(LayoutProfile::new(
        to_usize("half_space", grouping.half_space)?,
        to_usize("space", grouping.space)?,
        to_usize("double_space", grouping.double_space)?,
    )?)
}

fn parse_row_position_length(value: i64) -> Result<usize, ConfigError> {
    let length = to_usize("row_position_length", value)?;
    if length > MAX_ROW_POSITION_LENGTH {
        return Err(LayoutError::RowPositionLengthTooLarge {
            value: length,
            max: MAX_ROW_POSITION_LENGTH,
        }
        .into());
    }
    Ok(length)
}

fn or_default<T: fmt::Debug>(field: &'static str, parsed: Result<T, ConfigError>, default: T) -> T {
    parsed.unwrap_or_else(|error| {
        warn!(target: "config", field, %error, fallback = ?default, "config_value_rejected");
        default
    })
}

impl Settings {
    /// Validate every field of `file`; rejected fields keep their default.
    pub fn from_file(file: &ConfigFile) -> Self {
        let d = Settings::default();
        let layout = &file.layout;
        let scroll = &file.scroll;
        Settings {
            code_type: or_default(
                "layout.code_type",
                keyword("code_type", &layout.code_type),
                d.code_type,
            ),
            view_mode: or_default(
                "layout.view_mode",
                keyword("view_mode", &layout.view_mode),
                d.view_mode,
            ),
            bytes_per_row: or_default(
                "layout.bytes_per_row",
                parse_bytes_per_row(&layout.bytes_per_row),
                d.bytes_per_row,
            ),
            profile: or_default("layout.grouping", parse_profile(&layout.grouping), d.profile),
            row_position_length: or_default(
                "layout.row_position_length",
                parse_row_position_length(layout.row_position_length),
                d.row_position_length,
            ),
            blink_rate: or_default(
                "caret.blink_rate_ms",
                to_u32("blink_rate_ms", file.caret.blink_rate_ms)
                    .map(|ms| Duration::from_millis(u64::from(ms))),
                d.blink_rate,
            ),
            vertical_scrollbar: or_default(
                "scroll.vertical",
                keyword("scrollbar visibility", &scroll.vertical),
                d.vertical_scrollbar,
            ),
            horizontal_scrollbar: or_default(
                "scroll.horizontal",
                keyword("scrollbar visibility", &scroll.horizontal),
                d.horizontal_scrollbar,
            ),
            vertical_scrollbar_size: or_default(
                "scroll.vertical_size",
                to_u32("vertical_size", scroll.vertical_size),
                d.vertical_scrollbar_size,
            ),
            horizontal_scrollbar_size: or_default(
                "scroll.horizontal_size",
                to_u32("horizontal_size", scroll.horizontal_size),
                d.horizontal_scrollbar_size,
            ),
            digit_case: if file.display.uppercase {
                DigitCase::Upper
            } else {
                DigitCase::Lower
            },
        }
    }

    /// Push the settings into `navigator`. Settings produced by
    /// [`Settings::from_file`] are already in range; hand-built ones are
    /// checked again by the navigator setters.
    pub fn apply_to(&self, navigator: &mut Navigator) -> Result<(), LayoutError> {
        navigator.set_bytes_per_row(self.bytes_per_row)?;
        navigator.set_row_position_length(self.row_position_length)?;
        navigator.set_code_type(self.code_type);
        navigator.set_view_mode(self.view_mode);
        navigator.set_layout_profile(self.profile);
        navigator.set_scrollbar_visibility(self.vertical_scrollbar, self.horizontal_scrollbar);
        navigator.set_scrollbar_sizes(self.vertical_scrollbar_size, self.horizontal_scrollbar_size);
        navigator.caret_mut().set_blink_rate(self.blink_rate);
        debug!(target: "config", settings = ?self, "settings_applied");
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub settings: Settings,  // validated from `file`
}

impl Config {
    /// Re-validate after `file` was edited in place (command line
    /// overrides).
    pub fn resolve(&mut self) -> &Settings {
        self.settings = Settings::from_file(&self.file);
        &self.settings
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("hexgrid").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(target: "config", path = %path.display(), "config_not_found");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let settings = Settings::from_file(&file);
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                settings,
            })
        }
        Err(error) => {
            warn!(target: "config", path = %path.display(), %error, "config_parse_failed");
            Ok(Config::default())
        }
    }
}
