//! Reading style for Czytelnia.
//!
//! Turns the reader's preferences into the style parameters the reading view
//! renders with, plus the option lists shown in the settings panel.

use serde::Serialize;

use crate::types::preferences::{
    FontFamily, LetterSpacing, LineHeight, ReadingPreferences, TextAlign, Theme,
    FONT_SIZE_RANGE, TEXT_OPACITY_RANGE,
};

/// The settings panel preview never grows past this size.
const PREVIEW_MAX_FONT_SIZE: u32 = 18;

/// Style parameters of the reading view.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadingStyle {
    pub font_size_px: u32,
    pub font_family: &'static str,
    pub line_height_class: &'static str,
    pub line_height: f64,
    pub letter_spacing_class: &'static str,
    pub letter_spacing: &'static str,
    pub opacity: f64,
    pub text_align: &'static str,
    pub preview_font_size_px: u32,
}

impl ReadingStyle {
    pub fn from_preferences(p: &ReadingPreferences) -> Self {
        Self {
            font_size_px: p.font_size,
            font_family: font_stack(p.font_family),
            line_height_class: line_height_class(p.line_height),
            line_height: line_height_value(p.line_height),
            letter_spacing_class: letter_spacing_class(p.letter_spacing),
            letter_spacing: letter_spacing_value(p.letter_spacing),
            opacity: p.text_opacity,
            text_align: match p.text_align {
                TextAlign::Left => "left",
                TextAlign::Justify => "justify",
            },
            preview_font_size_px: p.font_size.min(PREVIEW_MAX_FONT_SIZE),
        }
    }

    /// Inline CSS declarations for the story text container.
    pub fn to_inline_css(&self) -> String {
        format!(
            "font-family: {}; font-size: {}px; line-height: {}; letter-spacing: {}; opacity: {}; text-align: {};",
            self.font_family,
            self.font_size_px,
            self.line_height,
            self.letter_spacing,
            self.opacity,
            self.text_align
        )
    }
}

fn font_stack(family: FontFamily) -> &'static str {
    match family {
        FontFamily::Inter => "'Inter', 'DM Sans', system-ui, sans-serif",
        FontFamily::Lato => "'Lato', 'Crimson Pro', Georgia, serif",
        FontFamily::Playfair => "'Playfair Display', 'Cormorant Garamond', Georgia, serif",
    }
}

fn line_height_class(value: LineHeight) -> &'static str {
    match value {
        LineHeight::Normal => "leading-normal",
        LineHeight::Relaxed => "leading-relaxed",
        LineHeight::Loose => "leading-loose",
    }
}

fn line_height_value(value: LineHeight) -> f64 {
    match value {
        LineHeight::Normal => 1.5,
        LineHeight::Relaxed => 1.625,
        LineHeight::Loose => 2.0,
    }
}

fn letter_spacing_class(value: LetterSpacing) -> &'static str {
    match value {
        LetterSpacing::Normal => "tracking-normal",
        LetterSpacing::Wide => "tracking-wide",
        LetterSpacing::Wider => "tracking-wider",
    }
}

fn letter_spacing_value(value: LetterSpacing) -> &'static str {
    match value {
        LetterSpacing::Normal => "0em",
        LetterSpacing::Wide => "0.025em",
        LetterSpacing::Wider => "0.05em",
    }
}

/// One selectable entry of a settings panel control.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SettingOption {
    pub value: serde_json::Value,
    pub label: &'static str,
}

fn option<T: Serialize>(value: T, label: &'static str) -> SettingOption {
    SettingOption {
        value: serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
        label,
    }
}

/// Everything the settings panel offers, keyed by preference name.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOptions {
    pub font_size_min: u32,
    pub font_size_max: u32,
    pub text_opacity_min: f64,
    pub text_opacity_max: f64,
    pub text_opacity_step: f64,
    pub font_family: Vec<SettingOption>,
    pub theme: Vec<SettingOption>,
    pub line_height: Vec<SettingOption>,
    pub letter_spacing: Vec<SettingOption>,
    pub text_align: Vec<SettingOption>,
}

pub fn settings_options() -> SettingsOptions {
    SettingsOptions {
        font_size_min: *FONT_SIZE_RANGE.start(),
        font_size_max: *FONT_SIZE_RANGE.end(),
        text_opacity_min: *TEXT_OPACITY_RANGE.start(),
        text_opacity_max: *TEXT_OPACITY_RANGE.end(),
        text_opacity_step: 0.05,
        font_family: FontFamily::ALL
            .iter()
            .map(|f| {
                let label = match f {
                    FontFamily::Inter => "Inter",
                    FontFamily::Lato => "Lato",
                    FontFamily::Playfair => "Playfair",
                };
                option(f, label)
            })
            .collect(),
        theme: Theme::ALL
            .iter()
            .map(|t| {
                let label = match t {
                    Theme::Light => "Light",
                    Theme::Dark => "Dark",
                    Theme::Sepia => "Sepia",
                    Theme::HighContrast => "High contrast",
                };
                option(t, label)
            })
            .collect(),
        line_height: LineHeight::ALL
            .iter()
            .map(|l| {
                let label = match l {
                    LineHeight::Normal => "Compact",
                    LineHeight::Relaxed => "Relaxed",
                    LineHeight::Loose => "Spacious",
                };
                option(l, label)
            })
            .collect(),
        letter_spacing: LetterSpacing::ALL
            .iter()
            .map(|s| {
                let label = match s {
                    LetterSpacing::Normal => "Normal",
                    LetterSpacing::Wide => "Wide",
                    LetterSpacing::Wider => "Wider",
                };
                option(s, label)
            })
            .collect(),
        text_align: TextAlign::ALL
            .iter()
            .map(|a| {
                let label = match a {
                    TextAlign::Left => "Left",
                    TextAlign::Justify => "Justify",
                };
                option(a, label)
            })
            .collect(),
    }
}
