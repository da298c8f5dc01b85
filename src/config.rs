// File: ./src/config.rs
// Handles configuration loading and defaults.
use crate::color_utils::{Rgb, parse_hex_to_floats};
use crate::context::AppContext;
use crate::fonts::{DEFAULT_FALLBACK_FONTS, FontSelection};
use crate::render::{Layout, Palette};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_regular_font() -> String {
    "Helvetica".to_string()
}
fn default_bold_font() -> String {
    "Helvetica-Bold".to_string()
}
fn default_fallback_fonts() -> Vec<String> {
    DEFAULT_FALLBACK_FONTS.iter().map(|s| s.to_string()).collect()
}

fn default_label_budget() -> usize {
    19
}

fn default_base_color() -> String {
    "#1a1a1a".to_string()
}
fn default_alert_color() -> String {
    "#cc2222".to_string()
}
fn default_muted_color() -> String {
    "#a3a3a3".to_string()
}
fn default_border_color() -> String {
    "#404040".to_string()
}
fn default_marker_color() -> String {
    "#999999".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct PaletteConfig {
    #[serde(default = "default_base_color")]
    pub base: String,
    #[serde(default = "default_alert_color")]
    pub alert: String,
    #[serde(default = "default_muted_color")]
    pub muted: String,
    #[serde(default = "default_border_color")]
    pub border: String,
    #[serde(default = "default_marker_color")]
    pub marker: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            base: default_base_color(),
            alert: default_alert_color(),
            muted: default_muted_color(),
            border: default_border_color(),
            marker: default_marker_color(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_regular_font")]
    pub regular_font: String,
    #[serde(default = "default_bold_font")]
    pub bold_font: String,
    /// Falls back to `bold_font` when unset.
    #[serde(default)]
    pub title_font: Option<String>,
    #[serde(default = "default_fallback_fonts")]
    pub fallback_fonts: Vec<String>,

    /// Searched after the user and system font directories, before the bundled one.
    #[serde(default)]
    pub font_dirs: Vec<PathBuf>,

    #[serde(default = "default_label_budget")]
    pub label_budget: usize,

    #[serde(default)]
    pub palette: PaletteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            regular_font: default_regular_font(),
            bold_font: default_bold_font(),
            title_font: None,
            fallback_fonts: default_fallback_fonts(),
            font_dirs: Vec::new(),
            label_budget: default_label_budget(),
            palette: PaletteConfig::default(),
        }
    }
}

fn color_or(hex: &str, fallback: Rgb, name: &str) -> Rgb {
    parse_hex_to_floats(hex).unwrap_or_else(|| {
        log::warn!("Invalid {} color '{}' in config; using default", name, hex);
        fallback
    })
}

impl Config {
    /// Load the configuration using an explicit context. A missing file yields the defaults;
    /// unreadable or malformed files are errors.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            log::debug!("No config at {}; using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    pub fn font_selection(&self) -> FontSelection {
        FontSelection {
            regular: self.regular_font.clone(),
            bold: self.bold_font.clone(),
            title: self.title_font.clone(),
            fallback: self.fallback_fonts.clone(),
        }
    }

    pub fn palette(&self) -> Palette {
        let defaults = Palette::default();
        Palette {
            base: color_or(&self.palette.base, defaults.base, "base"),
            alert: color_or(&self.palette.alert, defaults.alert, "alert"),
            muted: color_or(&self.palette.muted, defaults.muted, "muted"),
            border: color_or(&self.palette.border, defaults.border, "border"),
            marker: color_or(&self.palette.marker, defaults.marker, "marker"),
        }
    }

    pub fn layout(&self) -> Layout {
        Layout {
            label_budget: self.label_budget,
            ..Layout::default()
        }
    }
}
