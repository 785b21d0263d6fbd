use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colors as `#rrggbb` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub bg: &'static str,
    pub fg: &'static str,
    pub panel: &'static str,
    pub button: &'static str,
    pub button_hover: &'static str,
}

const DARK: Palette = Palette {
    bg: "#1a1a1a",
    fg: "#f9fafb",
    panel: "#2b2b2b",
    button: "#3a84ff",
    button_hover: "#336fcc",
};

const LIGHT: Palette = Palette {
    bg: "#f9fafb",
    fg: "#111827",
    panel: "#ffffff",
    button: "#007acc",
    button_hover: "#006bb3",
};

impl Theme {
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}
