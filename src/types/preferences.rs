use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Allowed font sizes in pixels.
pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 14..=28;

/// Allowed text opacity values.
pub const TEXT_OPACITY_RANGE: RangeInclusive<f64> = 0.3..=1.0;

/// The reader's saved display configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadingPreferences {
    pub font_size: u32,
    pub font_family: FontFamily,
    pub theme: Theme,
    pub line_height: LineHeight,
    pub letter_spacing: LetterSpacing,
    pub text_opacity: f64,
    pub text_align: TextAlign,
}

impl Default for ReadingPreferences {
    fn default() -> Self {
        Self {
            font_size: 20,
            font_family: FontFamily::Lato,
            theme: Theme::Light,
            line_height: LineHeight::Relaxed,
            letter_spacing: LetterSpacing::Normal,
            text_opacity: 1.0,
            text_align: TextAlign::Left,
        }
    }
}

impl ReadingPreferences {
    /// Checks the numeric fields against their bounds.
    ///
    /// Enumerated fields are valid by construction.
    pub fn validate(&self) -> Result<(), String> {
        if !FONT_SIZE_RANGE.contains(&self.font_size) {
            return Err(format!(
                "fontSize {} outside {}..={}",
                self.font_size,
                FONT_SIZE_RANGE.start(),
                FONT_SIZE_RANGE.end()
            ));
        }
        if !TEXT_OPACITY_RANGE.contains(&self.text_opacity) {
            return Err(format!(
                "textOpacity {} outside {}..={}",
                self.text_opacity,
                TEXT_OPACITY_RANGE.start(),
                TEXT_OPACITY_RANGE.end()
            ));
        }
        Ok(())
    }
}

/// Reading font options.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Inter,
    Lato,
    Playfair,
}

impl FontFamily {
    pub const ALL: [FontFamily; 3] = [FontFamily::Inter, FontFamily::Lato, FontFamily::Playfair];
}

/// Colour theme of the reading surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Light,
    Dark,
    Sepia,
    HighContrast,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Light, Theme::Dark, Theme::Sepia, Theme::HighContrast];

    /// Value written to the document root's `data-theme` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Sepia => "sepia",
            Theme::HighContrast => "high-contrast",
        }
    }

    /// Whether the theme renders light text on a dark surface.
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark | Theme::HighContrast)
    }

    /// The header toggle only flips between light and dark.
    pub fn toggled(&self) -> Theme {
        if self.is_dark() {
            Theme::Light
        } else {
            Theme::Dark
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineHeight {
    Normal,
    Relaxed,
    Loose,
}

impl LineHeight {
    pub const ALL: [LineHeight; 3] = [LineHeight::Normal, LineHeight::Relaxed, LineHeight::Loose];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LetterSpacing {
    Normal,
    Wide,
    Wider,
}

impl LetterSpacing {
    pub const ALL: [LetterSpacing; 3] =
        [LetterSpacing::Normal, LetterSpacing::Wide, LetterSpacing::Wider];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Justify,
}

impl TextAlign {
    pub const ALL: [TextAlign; 2] = [TextAlign::Left, TextAlign::Justify];
}

/// A stored preferences record in which any field may be missing.
///
/// Records written by older versions lack newer fields; a field whose stored
/// value does not fit its domain is treated as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialPreferences {
    pub font_size: Option<u32>,
    pub font_family: Option<FontFamily>,
    pub theme: Option<Theme>,
    pub line_height: Option<LineHeight>,
    pub letter_spacing: Option<LetterSpacing>,
    pub text_opacity: Option<f64>,
    pub text_align: Option<TextAlign>,
}

fn field<T: DeserializeOwned>(
    map: &serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Option<T> {
    map.get(key)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}

impl PartialPreferences {
    /// Parses a stored record. Returns `None` when the text is not a JSON object.
    pub fn from_json(raw: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(raw).ok()?;
        let map = value.as_object()?;
        Some(Self {
            font_size: field::<u32>(map, "fontSize").filter(|v| FONT_SIZE_RANGE.contains(v)),
            font_family: field(map, "fontFamily"),
            theme: field(map, "theme"),
            line_height: field(map, "lineHeight"),
            letter_spacing: field(map, "letterSpacing"),
            text_opacity: field::<f64>(map, "textOpacity")
                .filter(|v| TEXT_OPACITY_RANGE.contains(v)),
            text_align: field(map, "textAlign"),
        })
    }

    /// Right-biased merge: present fields win over `base`.
    pub fn merge_over(self, base: ReadingPreferences) -> ReadingPreferences {
        ReadingPreferences {
            font_size: self.font_size.unwrap_or(base.font_size),
            font_family: self.font_family.unwrap_or(base.font_family),
            theme: self.theme.unwrap_or(base.theme),
            line_height: self.line_height.unwrap_or(base.line_height),
            letter_spacing: self.letter_spacing.unwrap_or(base.letter_spacing),
            text_opacity: self.text_opacity.unwrap_or(base.text_opacity),
            text_align: self.text_align.unwrap_or(base.text_align),
        }
    }
}
