use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::command::DomPatch;

/// Storage key for the persisted theme preference.
pub const STORAGE_KEY: &str = "site-theme";

/// Glyph shown while dark is active: the control offers switching to light.
pub const GLYPH_SUN: char = '☀';
/// Glyph shown while light is active: the control offers switching to dark.
pub const GLYPH_MOON: char = '🌙';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The literal string stored under [`STORAGE_KEY`].
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme {0:?}, expected \"light\" or \"dark\"")]
pub struct ThemeParseError(String);

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeParseError(other.to_owned())),
        }
    }
}

/// Owns the active theme and emits the patches that keep the document in
/// sync with it.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeController {
    active: Theme,
}

impl ThemeController {
    /// Resolve the initial theme: persisted preference first, then the OS
    /// color-scheme hint, then light.
    ///
    /// Emits apply patches but no persist — only an explicit toggle writes
    /// storage, so an OS-derived default keeps tracking the OS until the
    /// user chooses.
    pub fn init(persisted: Option<Theme>, os_prefers_dark: bool) -> (Self, Vec<DomPatch>) {
        let fallback = if os_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        };
        let controller = Self {
            active: persisted.unwrap_or(fallback),
        };
        let patches = controller.apply();
        (controller, patches)
    }

    pub fn active(&self) -> Theme {
        self.active
    }

    /// Flip the active theme, re-apply it, and persist the new value.
    pub fn toggle(&mut self) -> Vec<DomPatch> {
        self.active = self.active.flipped();
        let mut patches = self.apply();
        patches.push(DomPatch::PersistTheme { theme: self.active });
        patches
    }

    /// Patches bringing the document in line with the active theme. Dark
    /// sets the marker attribute; light clears it rather than setting
    /// "light", matching the CSS which only keys off the dark marker.
    fn apply(&self) -> Vec<DomPatch> {
        match self.active {
            Theme::Dark => vec![
                DomPatch::SetThemeAttribute { value: Theme::Dark },
                DomPatch::SetToggleGlyph { glyph: GLYPH_SUN },
            ],
            Theme::Light => vec![
                DomPatch::ClearThemeAttribute,
                DomPatch::SetToggleGlyph { glyph: GLYPH_MOON },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_strings_round_trip() {
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(Theme::Dark.as_str(), "dark");
        assert!("Dark".parse::<Theme>().is_err());
        assert!("".parse::<Theme>().is_err());
    }

    #[test]
    fn theme_serializes_as_storage_literal() {
        let json = serde_json::to_string(&Theme::Dark).expect("serialize");
        assert_eq!(json, "\"dark\"");
    }

    #[test]
    fn persisted_preference_wins_over_os_hint() {
        let (controller, _) = ThemeController::init(Some(Theme::Light), true);
        assert_eq!(controller.active(), Theme::Light);
    }

    #[test]
    fn os_dark_hint_yields_dark_with_sun_glyph() {
        let (controller, patches) = ThemeController::init(None, true);
        assert_eq!(controller.active(), Theme::Dark);
        assert_eq!(
            patches,
            vec![
                DomPatch::SetThemeAttribute { value: Theme::Dark },
                DomPatch::SetToggleGlyph { glyph: GLYPH_SUN },
            ]
        );
    }

    #[test]
    fn no_signal_defaults_to_light_without_persisting() {
        let (controller, patches) = ThemeController::init(None, false);
        assert_eq!(controller.active(), Theme::Light);
        assert!(
            !patches
                .iter()
                .any(|p| matches!(p, DomPatch::PersistTheme { .. })),
            "init must not write storage"
        );
    }

    #[test]
    fn double_toggle_returns_to_light_and_persists_it() {
        let (mut controller, _) = ThemeController::init(None, false);

        let first = controller.toggle();
        assert_eq!(controller.active(), Theme::Dark);
        assert!(first.contains(&DomPatch::PersistTheme { theme: Theme::Dark }));

        let second = controller.toggle();
        assert_eq!(controller.active(), Theme::Light);
        assert_eq!(
            second,
            vec![
                DomPatch::ClearThemeAttribute,
                DomPatch::SetToggleGlyph { glyph: GLYPH_MOON },
                DomPatch::PersistTheme {
                    theme: Theme::Light
                },
            ]
        );
    }
}
