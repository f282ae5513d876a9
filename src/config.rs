use crate::error::{Error, Result};
use crate::slide::{default_deck, ImageRef, Slide};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    /// Directory that relative image and font paths resolve against.
    /// Defaults to the config directory.
    pub assets_dir: Option<PathBuf>,
    pub navigation: NavigationConfig,
    pub transition: TransitionConfig,
    pub window: WindowConfig,
    pub theme: ThemeConfig,
    pub slides: Vec<Slide>,
}

/// Gesture sensitivity
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct NavigationConfig {
    /// Minimum gap between two accepted moves (in milliseconds)
    pub cooldown_ms: u64,
    /// Wheel delta (in points) that counts as one move
    pub wheel_threshold: f32,
    /// Swipe distance on narrow screens (in points)
    pub swipe_threshold_narrow: f32,
    /// Swipe distance everywhere else (in points)
    pub swipe_threshold_wide: f32,
    /// Viewports narrower than this use the narrow swipe threshold
    pub narrow_viewport_width: f32,
    /// Points per line for wheels that report in lines
    pub wheel_line_height: f32,
}

/// Slide transition animation
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TransitionConfig {
    /// Length of each of the exit and enter phases (in milliseconds)
    pub duration_ms: u64,
    /// Horizontal travel of a slide while entering or leaving (in points)
    pub offset: f32,
    /// Scale of a slide at the start of enter and end of exit
    pub scale: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub fullscreen: bool,
    pub width: f32,
    pub height: f32,
    pub icon: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ThemeConfig {
    /// Display font (TTF/OTF) for headings and captions
    pub font: Option<PathBuf>,
    /// Fill behind the background image, as [r, g, b]
    pub background_color: [u8; 3],
    pub text_color: [u8; 3],
    /// Full-window background image, scaled to cover
    pub background: Option<ImageRef>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets_dir: None,
            navigation: NavigationConfig::default(),
            transition: TransitionConfig::default(),
            window: WindowConfig::default(),
            theme: ThemeConfig::default(),
            slides: default_deck(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 900,
            wheel_threshold: 70.0,
            swipe_threshold_narrow: 50.0,
            swipe_threshold_wide: 70.0,
            narrow_viewport_width: 768.0,
            wheel_line_height: 100.0,
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 550,
            offset: 80.0,
            scale: 0.98,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Save the Date".to_string(),
            fullscreen: true,
            width: 1280.0,
            height: 800.0,
            icon: None,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            font: None,
            background_color: [124, 170, 214],
            text_color: [255, 255, 255],
            background: Some(ImageRef::new("Animated-Clouds2.png", "Clouds")),
        }
    }
}

impl NavigationConfig {
    /// Swipe distance for a viewport of the given width. Unknown width counts as wide.
    pub fn swipe_threshold_for(&self, viewport_width: Option<f32>) -> f32 {
        match viewport_width {
            Some(width) if width < self.narrow_viewport_width => self.swipe_threshold_narrow,
            _ => self.swipe_threshold_wide,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "save-the-date")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location, or return defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::warn!("no config directory, using default configuration");
            return Config::default();
        };
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using default configuration");
            return Config::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "using default configuration");
                Config::default()
            }
        }
    }

    /// Load and validate a specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = toml::from_str::<Config>(&contents)?;
        if config.assets_dir.is_none() {
            config.assets_dir = path.parent().map(Path::to_path_buf);
        }
        config.validate()?;
        tracing::info!(path = %path.display(), slides = config.slides.len(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.slides.is_empty() {
            return Err(Error::Invalid("at least one slide is required".into()));
        }
        let nav = &self.navigation;
        if nav.cooldown_ms == 0 {
            return Err(Error::Invalid("navigation.cooldown_ms must be positive".into()));
        }
        for (name, value) in [
            ("wheel_threshold", nav.wheel_threshold),
            ("swipe_threshold_narrow", nav.swipe_threshold_narrow),
            ("swipe_threshold_wide", nav.swipe_threshold_wide),
            ("narrow_viewport_width", nav.narrow_viewport_width),
            ("wheel_line_height", nav.wheel_line_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Invalid(format!(
                    "navigation.{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if nav.wheel_line_height <= nav.wheel_threshold {
            return Err(Error::Invalid(format!(
                "navigation.wheel_line_height ({}) must exceed wheel_threshold ({}) so one notch moves a slide",
                nav.wheel_line_height, nav.wheel_threshold
            )));
        }
        let scale = self.transition.scale;
        if !(scale > 0.0 && scale <= 1.0) {
            return Err(Error::Invalid(format!(
                "transition.scale must be in (0, 1], got {}",
                scale
            )));
        }
        Ok(())
    }

    /// Last valid slide index
    pub fn max_index(&self) -> usize {
        self.slides.len().saturating_sub(1)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.assets_dir
            .clone()
            .or_else(|| Self::config_path().and_then(|p| p.parent().map(Path::to_path_buf)))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve a path from the config against the assets directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.assets_dir().join(path)
        }
    }

    /// Save configuration to the given file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|e| Error::io(path, e))?;
        Ok(())
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(Error::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Create a default config file if it doesn't exist, returning its path
    pub fn create_default() -> Result<PathBuf> {
        let path = Self::config_path().ok_or(Error::NoConfigDir)?;
        if !path.exists() {
            Config::default().save()?;
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.navigation.cooldown_ms, 900);
        assert_eq!(config.navigation.wheel_threshold, 70.0);
        assert_eq!(config.navigation.swipe_threshold_narrow, 50.0);
        assert_eq!(config.navigation.swipe_threshold_wide, 70.0);
        assert_eq!(config.transition.duration_ms, 550);
        assert_eq!(config.slides.len(), 4);
        assert_eq!(config.max_index(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        let deserialized: Config = toml::from_str(&toml_str).expect("Failed to deserialize");
        assert_eq!(config.slides, deserialized.slides);
        assert_eq!(config.window.title, deserialized.window.title);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [navigation]
            cooldown_ms = 400
            "#,
        )
        .expect("Failed to parse");
        assert_eq!(config.navigation.cooldown_ms, 400);
        assert_eq!(config.navigation.wheel_threshold, 70.0);
        assert_eq!(config.slides.len(), 4);
    }

    #[test]
    fn test_swipe_threshold_for_width() {
        let nav = NavigationConfig::default();
        assert_eq!(nav.swipe_threshold_for(Some(400.0)), 50.0);
        assert_eq!(nav.swipe_threshold_for(Some(767.9)), 50.0);
        assert_eq!(nav.swipe_threshold_for(Some(768.0)), 70.0);
        assert_eq!(nav.swipe_threshold_for(Some(1920.0)), 70.0);
        assert_eq!(nav.swipe_threshold_for(None), 70.0);
    }

    #[test]
    fn test_validate_rejects_empty_deck() {
        let config = Config {
            slides: Vec::new(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let mut config = Config::default();
        config.navigation.wheel_threshold = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.navigation.cooldown_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.transition.scale = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_wheel_notch_below_threshold() {
        let mut config = Config::default();
        assert!(config.navigation.wheel_line_height > config.navigation.wheel_threshold);

        config.navigation.wheel_line_height = 40.0;
        assert!(matches!(config.validate(), Err(Error::Invalid(_))));

        config.navigation.wheel_line_height = 70.0;
        assert!(matches!(config.validate(), Err(Error::Invalid(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [window]
            fullscreen = false

            [[slides]]
            kind = "title"
            text = "Hello"
            "#,
        )
        .expect("write config");

        let config = Config::load_from(&path).expect("load config");
        assert!(!config.window.fullscreen);
        assert_eq!(config.max_index(), 0);
        assert_eq!(config.assets_dir(), dir.path());
        assert_eq!(config.resolve(Path::new("font.ttf")), dir.path().join("font.ttf"));
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "slides = []").expect("write config");
        assert!(matches!(Config::load_from(&path), Err(Error::Invalid(_))));

        fs::write(&path, "[navigation").expect("write config");
        assert!(matches!(Config::load_from(&path), Err(Error::Parse(_))));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load_from(&missing), Err(Error::Io { .. })));
    }

    #[test]
    fn test_save_to_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.navigation.cooldown_ms = 1200;
        config.save_to(&path).expect("save config");

        let loaded = Config::load_from(&path).expect("load config");
        assert_eq!(loaded.navigation.cooldown_ms, 1200);
        assert_eq!(loaded.slides, config.slides);
    }
}
