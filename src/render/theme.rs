//! Presentation text and colors, optionally overridden from a JSON file
//!
//! Every field falls back to the built-in value on its own, so a theme file with
//! one bad color still applies its other fields.

use ratatui::style::Color;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub title: String,
    pub player_label: String,
    pub enemy_label: String,
    pub player_color: Color,
    pub enemy_color: Color,
    pub accent_color: Color,
    pub floor_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: "CATCH ME IF YOU CAN".to_string(),
            player_label: "Windy".to_string(),
            enemy_label: "Hunter".to_string(),
            player_color: Color::Cyan,
            enemy_color: Color::Red,
            accent_color: Color::Yellow,
            floor_color: Color::DarkGray,
        }
    }
}

/// Theme file as written on disk; every field optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThemeFile {
    title: Option<String>,
    player_label: Option<String>,
    enemy_label: Option<String>,
    player_color: Option<String>,
    enemy_color: Option<String>,
    accent_color: Option<String>,
    floor_color: Option<String>,
}

impl Theme {
    /// Load a theme, falling back to the built-in one when the file is missing
    /// or unreadable
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("Failed to read theme {:?}, using built-in theme: {}", path, err);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(theme) => {
                tracing::info!("Loaded theme from {:?}", path);
                theme
            }
            Err(err) => {
                tracing::warn!("Failed to parse theme {:?}, using built-in theme: {}", path, err);
                Self::default()
            }
        }
    }

    /// Parse a theme, substituting built-in values for missing or invalid fields
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let file: ThemeFile = serde_json::from_str(json)?;
        let defaults = Self::default();

        Ok(Self {
            title: text_or(file.title, defaults.title),
            player_label: text_or(file.player_label, defaults.player_label),
            enemy_label: text_or(file.enemy_label, defaults.enemy_label),
            player_color: color_or("player_color", file.player_color, defaults.player_color),
            enemy_color: color_or("enemy_color", file.enemy_color, defaults.enemy_color),
            accent_color: color_or("accent_color", file.accent_color, defaults.accent_color),
            floor_color: color_or("floor_color", file.floor_color, defaults.floor_color),
        })
    }
}

fn text_or(value: Option<String>, fallback: String) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => fallback,
    }
}

fn color_or(field: &str, value: Option<String>, fallback: Color) -> Color {
    let Some(raw) = value else {
        return fallback;
    };

    Color::from_str(&raw).unwrap_or_else(|_| {
        tracing::warn!(field, value = %raw, "unknown color, using built-in");
        fallback
    })
}
