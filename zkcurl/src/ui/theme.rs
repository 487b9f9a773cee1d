//! Colours for zkcurl's stderr messages and section headers.
//!
//! A theme maps each [`ThemeEntry`] to a foreground colour. Users can supply
//! a YAML file via `--theme`; entries it omits keep their default colour.
//!
//! ```yaml
//! warn:
//!   fg: brightyellow
//! error:
//!   fg: magenta
//! ```

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// Styled parts of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    Header,
    Info,
    Warn,
    Error,
}

/// Every accepted colour name with its ANSI colour, lower-case.
const NAMED_COLORS: [(&str, AnsiColors); 16] = [
    ("black", AnsiColors::Black),
    ("red", AnsiColors::Red),
    ("green", AnsiColors::Green),
    ("yellow", AnsiColors::Yellow),
    ("blue", AnsiColors::Blue),
    ("magenta", AnsiColors::Magenta),
    ("cyan", AnsiColors::Cyan),
    ("white", AnsiColors::White),
    ("brightblack", AnsiColors::BrightBlack),
    ("brightred", AnsiColors::BrightRed),
    ("brightgreen", AnsiColors::BrightGreen),
    ("brightyellow", AnsiColors::BrightYellow),
    ("brightblue", AnsiColors::BrightBlue),
    ("brightmagenta", AnsiColors::BrightMagenta),
    ("brightcyan", AnsiColors::BrightCyan),
    ("brightwhite", AnsiColors::BrightWhite),
];

const DEFAULT_COLORS: [(ThemeEntry, &str); 4] = [
    (ThemeEntry::Header, "brightcyan"),
    (ThemeEntry::Info, "white"),
    (ThemeEntry::Warn, "yellow"),
    (ThemeEntry::Error, "red"),
];

/// A colour given by name in a theme file, e.g. `brightgreen`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ThemeColor {
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemeColorError(String);

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names: Vec<&str> = NAMED_COLORS.iter().map(|(name, _)| *name).collect();
        write!(f, "unknown colour '{}'; expected one of: {}", self.0, names.join(", "))
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_lowercase();
        if NAMED_COLORS.iter().any(|(known, _)| *known == name) {
            Ok(ThemeColor::Named(name))
        } else {
            Err(ParseThemeColorError(s.to_string()))
        }
    }
}

impl ThemeColor {
    /// The matching ANSI colour; names that are not recognised render white.
    pub fn to_ansi_color(&self) -> AnsiColors {
        let ThemeColor::Named(name) = self;
        let name = name.to_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, color)| *color)
            .unwrap_or(AnsiColors::White)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    pub fg: Option<ThemeColor>,
}

/// The theme at `theme_path`, or the defaults when no path is given.
pub fn build_theme_map(theme_path: Option<&PathBuf>) -> Result<ThemeMap> {
    match theme_path {
        Some(path) => ThemeStyle::load_from_file(path),
        None => Ok(ThemeStyle::default_theme_map()),
    }
}

/// Resolves the foreground colour for `entry`, falling back to white.
pub fn color_for(entry: ThemeEntry, theme: &ThemeMap) -> AnsiColors {
    theme
        .get(&entry)
        .and_then(|style| style.fg.as_ref())
        .map(ThemeColor::to_ansi_color)
        .unwrap_or(AnsiColors::White)
}

impl ThemeStyle {
    /// Reads a YAML theme and lays it over the defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let custom: ThemeMap = serde_yml::from_str(&text)
            .with_context(|| format!("Invalid theme file {}", path.display()))?;

        for (entry, style) in &custom {
            if let Some(ThemeColor::Named(name)) = &style.fg {
                name.parse::<ThemeColor>()
                    .with_context(|| format!("Invalid colour for '{:?}' in {}", entry, path.display()))?;
            }
        }

        let mut theme = Self::default_theme_map();
        theme.extend(custom);
        Ok(theme)
    }

    pub fn default_theme_map() -> ThemeMap {
        DEFAULT_COLORS
            .iter()
            .map(|(entry, name)| (*entry, ThemeStyle { fg: Some(ThemeColor::Named((*name).to_string())) }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn colour_names_are_case_insensitive() {
        assert_eq!("BrightGreen".parse::<ThemeColor>(), Ok(ThemeColor::Named("brightgreen".into())));
        let err = "mauve".parse::<ThemeColor>().unwrap_err();
        assert!(err.to_string().contains("unknown colour 'mauve'"));
    }

    #[test]
    fn defaults_cover_every_entry() {
        let theme = ThemeStyle::default_theme_map();
        assert_eq!(theme.len(), DEFAULT_COLORS.len());
        assert_eq!(color_for(ThemeEntry::Header, &theme), AnsiColors::BrightCyan);
        assert_eq!(color_for(ThemeEntry::Warn, &theme), AnsiColors::Yellow);
    }

    #[test]
    fn theme_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "error:\n  fg: magenta").unwrap();
        let theme = ThemeStyle::load_from_file(file.path()).unwrap();
        assert_eq!(color_for(ThemeEntry::Error, &theme), AnsiColors::Magenta);
        assert_eq!(color_for(ThemeEntry::Warn, &theme), AnsiColors::Yellow);
    }

    #[test]
    fn theme_file_with_unknown_colour_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "warn:\n  fg: mauve").unwrap();
        assert!(ThemeStyle::load_from_file(file.path()).is_err());
    }
}
