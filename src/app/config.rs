//! User settings for the rain
//!
//! Settings are resolved with the precedence CLI > environment > file >
//! defaults, then turned into an immutable [`Config`] once the terminal
//! size is known.
//!
//! The file is TOML, by default `matrix-rain/config.toml` under the user's
//! config directory (`~/.config` on Linux):
//!
//! ```toml
//! charset = "hex"
//! char_change_probability = 0.05
//! fps = 24
//! colors = ["white bold", "color(46)", "color(28)", "black"]
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::rain::{Alphabet, Charset, ColorRamp, Config, Style, DEFAULT_CHAR_CHANGE_PROBABILITY};

/// Environment variable naming a settings file
pub const CONFIG_ENV: &str = "MATRIX_RAIN_CONFIG";
/// Environment variable holding a seed
pub const SEED_ENV: &str = "MATRIX_RAIN_SEED";

const MAX_FPS: u32 = 240;

/// CLI arguments for the rain
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "matrix")]
#[command(version)]
#[command(about = "Digital rain in your terminal", long_about = None)]
pub struct CliArgs {
    /// Path to a settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Named character set
    #[arg(long, value_enum)]
    pub charset: Option<Charset>,

    /// Explicit characters to draw from (overrides --charset)
    #[arg(short, long, value_name = "CHARS")]
    pub alphabet: Option<String>,

    /// Chance that any character changes on a frame
    #[arg(long, value_name = "P")]
    pub char_change: Option<f64>,

    /// Frames per second
    #[arg(long)]
    pub fps: Option<u32>,

    /// Seed for a reproducible animation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Character set used unless `alphabet` is given
    #[serde(default)]
    pub charset: Charset,

    /// Explicit characters to draw from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alphabet: Option<String>,

    /// Color ramp from head to background (None = built-in green ramp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<Style>>,

    /// Chance that any character changes on a frame
    #[serde(default = "default_char_change")]
    pub char_change_probability: f64,

    /// Frames per second
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Seed (None = seeded from the OS)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_char_change() -> f64 {
    DEFAULT_CHAR_CHANGE_PROBABILITY
}
fn default_fps() -> u32 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            charset: Charset::default(),
            alphabet: None,
            colors: None,
            char_change_probability: default_char_change(),
            fps: default_fps(),
            seed: None,
        }
    }
}

/// Settings error
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid setting '{field}': {message}")]
    Invalid { field: &'static str, message: String },
    #[error(transparent)]
    Rain(#[from] crate::Error),
}

impl Settings {
    /// Load settings with full precedence:
    /// CLI args > environment variables > settings file > defaults
    pub fn load_with_args(args: &CliArgs) -> Result<Self, SettingsError> {
        let mut settings = match args
            .config
            .clone()
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
        {
            // An explicitly named file must load
            Some(path) => Self::load_from_file(&path)?,
            None => Self::load_default(),
        };

        settings.apply_env_vars();
        settings.apply_cli_args(args);
        settings.validate()?;
        Ok(settings)
    }

    /// Load from the default location, falling back to defaults
    fn load_default() -> Self {
        let Some(path) = Self::default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to load settings from {:?}: {}", path, e);
                Self::default()
            },
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        let settings = toml::from_str(&content)?;
        tracing::debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// `matrix-rain/config.toml` in the platform config directory
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("matrix-rain").join("config.toml"))
    }

    fn apply_env_vars(&mut self) {
        if let Ok(value) = env::var(SEED_ENV) {
            match value.trim().parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => tracing::warn!("Ignoring {}={:?}: not a u64", SEED_ENV, value),
            }
        }
    }

    fn apply_cli_args(&mut self, args: &CliArgs) {
        if let Some(charset) = args.charset {
            self.charset = charset;
            // A named set on the command line beats a file's alphabet
            self.alphabet = None;
        }
        if let Some(alphabet) = &args.alphabet {
            self.alphabet = Some(alphabet.clone());
        }
        if let Some(p) = args.char_change {
            self.char_change_probability = p;
        }
        if let Some(fps) = args.fps {
            self.fps = fps;
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(SettingsError::Invalid {
                field: "fps",
                message: format!("must be between 1 and {}", MAX_FPS),
            });
        }
        if !(0.0..=1.0).contains(&self.char_change_probability) {
            return Err(SettingsError::Invalid {
                field: "char_change_probability",
                message: format!("{} is outside [0, 1]", self.char_change_probability),
            });
        }
        self.alphabet()?;
        self.ramp()?;
        Ok(())
    }

    pub fn alphabet(&self) -> Result<Alphabet, SettingsError> {
        match &self.alphabet {
            Some(chars) => Ok(Alphabet::new(chars)?),
            None => Ok(self.charset.into()),
        }
    }

    pub fn ramp(&self) -> Result<ColorRamp, SettingsError> {
        match &self.colors {
            Some(styles) => Ok(ColorRamp::new(styles.clone())?),
            None => Ok(ColorRamp::default()),
        }
    }

    /// Time budget of one frame
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Freeze into the animation configuration for a `width` x `height` terminal
    pub fn to_config(&self, width: usize, height: usize) -> Result<Config, SettingsError> {
        let config = Config::builder(width, height)
            .alphabet(self.alphabet()?)
            .ramp(self.ramp()?)
            .char_change_probability(self.char_change_probability)
            .build()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::Error;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.charset, Charset::Binary);
        assert_eq!(settings.char_change_probability, 0.10);
        assert_eq!(settings.fps, 30);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_toml_parsing() {
        let settings: Settings = toml::from_str(
            r#"
            charset = "hex"
            fps = 12
            colors = ["white bold", "color(46)", "black"]
            "#,
        )
        .unwrap();
        assert_eq!(settings.charset, Charset::Hex);
        assert_eq!(settings.fps, 12);
        assert_eq!(settings.char_change_probability, 0.10);
        assert_eq!(settings.ramp().unwrap().len(), 3);
    }

    #[test]
    fn test_toml_rejects_bad_color() {
        let result: Result<Settings, _> = toml::from_str(r#"colors = ["purple haze"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alphabet = \"ab\"\nseed = 7").unwrap();
        let settings = Settings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.alphabet.as_deref(), Some("ab"));
        assert_eq!(settings.seed, Some(7));
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alphabet = \"ab\"\nfps = 10").unwrap();
        let args = CliArgs {
            config: Some(file.path().to_path_buf()),
            charset: Some(Charset::Octal),
            fps: Some(60),
            seed: Some(3),
            ..Default::default()
        };
        let settings = Settings::load_with_args(&args).unwrap();
        assert_eq!(settings.alphabet, None);
        assert_eq!(settings.charset, Charset::Octal);
        assert_eq!(settings.fps, 60);
        assert_eq!(settings.seed, Some(3));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let args = CliArgs {
            config: Some(PathBuf::from("/nonexistent/matrix-rain.toml")),
            ..Default::default()
        };
        assert!(matches!(
            Settings::load_with_args(&args),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_validation() {
        let settings = Settings {
            fps: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { field: "fps", .. })
        ));

        let settings = Settings {
            char_change_probability: 2.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            alphabet: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Rain(Error::EmptyAlphabet))
        ));

        let settings = Settings {
            colors: Some(Vec::new()),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Rain(Error::EmptyColorRamp))
        ));
    }

    #[test]
    fn test_to_config() {
        let settings = Settings {
            charset: Charset::Digits,
            char_change_probability: 0.25,
            ..Default::default()
        };
        let config = settings.to_config(100, 30).unwrap();
        assert_eq!(config.alphabet().len(), 10);
        assert_eq!(config.char_change_probability(), 0.25);
        assert_eq!(config.column_count(), 50);
        assert_eq!(config.column_length(), 30);
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = Settings::default_config_path() {
            assert!(path.ends_with("matrix-rain/config.toml"));
            assert_eq!(path.parent().and_then(|p| p.parent()), dirs::config_dir().as_deref());
        }
    }

    #[test]
    fn test_frame_duration() {
        let settings = Settings {
            fps: 25,
            ..Default::default()
        };
        assert_eq!(settings.frame_duration(), Duration::from_millis(40));
    }
}
