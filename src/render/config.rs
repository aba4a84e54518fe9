use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// 24-bit RGB color. Deserializes from `0xRRGGBB` integers or `"#rrggbb"` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xff_ffff)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u32),
            Hex(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) if n <= 0xff_ffff => Ok(Color(n)),
            Repr::Number(n) => Err(serde::de::Error::custom(format!(
                "color {:#x} out of range",
                n
            ))),
            Repr::Hex(s) => {
                let digits = s.trim_start_matches('#').trim_start_matches("0x");
                if digits.len() != 6 {
                    return Err(serde::de::Error::custom(format!("invalid color {}", s)));
                }
                u32::from_str_radix(digits, 16)
                    .map(Color)
                    .map_err(|_| serde::de::Error::custom(format!("invalid color {}", s)))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelStyle {
    pub font_family: String,
    pub font_size: f64,
    pub fill: Color,
    pub resolution: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_family: "arial".to_string(),
            font_size: 9.0,
            fill: Color(0xffffff),
            resolution: 2.0,
        }
    }
}

/// Detailed (per-base) tier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LargeScaleConfig {
    pub colors: BTreeMap<String, Color>,
    pub fallback_color: Color,
    pub label_display_after_pixels_per_bp: f64,
    pub label_style: LabelStyle,
}

impl LargeScaleConfig {
    /// Fill color for a base symbol, case-insensitive.
    pub fn color_for(&self, base: &str) -> Color {
        self.colors
            .get(&base.to_uppercase())
            .copied()
            .unwrap_or(self.fallback_color)
    }
}

impl Default for LargeScaleConfig {
    fn default() -> Self {
        let colors = [
            ("A", 0x3ab04a),
            ("C", 0x2e6fd6),
            ("G", 0xd7951e),
            ("T", 0xe23a2e),
            ("N", 0x7f7f7f),
        ]
        .into_iter()
        .map(|(base, rgb)| (base.to_string(), Color(rgb)))
        .collect();

        Self {
            colors,
            fallback_color: Color(0x7f7f7f),
            label_display_after_pixels_per_bp: 10.0,
            label_style: LabelStyle::default(),
        }
    }
}

/// Coarse (score gradient) tier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LowScaleConfig {
    pub color1: Color,
    pub color2: Color,
    pub sensitive_value: f64,
}

impl Default for LowScaleConfig {
    fn default() -> Self {
        Self {
            color1: Color(0x2e6fd6),
            color2: Color(0xe23a2e),
            sensitive_value: 0.5,
        }
    }
}

/// Reference track renderer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferenceConfig {
    pub height: f64,
    pub large_scale: LargeScaleConfig,
    pub low_scale: LowScaleConfig,
    /// Above this many pixels per bp the detailed padding is corrected.
    pub low_scale_margin_threshold: f64,
    pub low_scale_margin_offset: f64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            height: 30.0,
            large_scale: LargeScaleConfig::default(),
            low_scale: LowScaleConfig::default(),
            low_scale_margin_threshold: 4.0,
            low_scale_margin_offset: -0.5,
        }
    }
}

impl ReferenceConfig {
    /// Load and validate a JSON configuration file. Missing fields take defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        let sensitive = self.low_scale.sensitive_value;
        if !(sensitive > 0.0 && sensitive < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "sensitiveValue must be within (0, 1), got {}",
                sensitive
            )));
        }
        if !self.large_scale.label_display_after_pixels_per_bp.is_finite() {
            return Err(Error::InvalidConfig(
                "labelDisplayAfterPixelsPerBp must be finite".to_string(),
            ));
        }
        if self.large_scale.label_style.font_size <= 0.0 {
            return Err(Error::InvalidConfig(
                "label font size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
