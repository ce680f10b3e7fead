//! Light/dark theming and weather-dependent color schemes.

use serde::{Deserialize, Serialize};

/// Terminal color as an index into the 256-color ANSI palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ThemeMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(anyhow::anyhow!("Unknown theme '{value}'. Supported themes: light, dark.")),
        }
    }
}

/// Theme state shared by everything that renders.
///
/// Passed explicitly to render functions; only [`ThemeContext::toggle`] and
/// [`ThemeContext::set_mode`] change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeContext {
    mode: ThemeMode,
}

impl ThemeContext {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// Flip light and dark, returning the new mode.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        tracing::debug!(mode = %self.mode, "theme toggled");
        self.mode
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }

    /// Palette for a weather group (`"Clear"`, `"Rain"`, ...); `None` when nothing is loaded.
    pub fn palette_for(&self, group: Option<&str>) -> Palette {
        let scheme = group.map(Scheme::from_group).unwrap_or_default();
        Palette::for_scheme(scheme, self.mode)
    }
}

/// Background scheme chosen from the provider's weather group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    Clear,
    Clouds,
    Rain,
    Thunder,
    Snow,
    Mist,
    #[default]
    Default,
}

impl Scheme {
    /// Case-insensitive substring match; the first matching rule wins.
    pub fn from_group(group: &str) -> Self {
        let group = group.to_lowercase();

        if group.contains("clear") {
            Scheme::Clear
        } else if group.contains("cloud") {
            Scheme::Clouds
        } else if group.contains("rain") || group.contains("drizzle") {
            Scheme::Rain
        } else if group.contains("thunder") {
            Scheme::Thunder
        } else if group.contains("snow") {
            Scheme::Snow
        } else if group.contains("mist") || group.contains("fog") {
            Scheme::Mist
        } else {
            Scheme::Default
        }
    }
}

/// Two-stop background gradient plus the text color drawn over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub top: Color,
    pub bottom: Color,
    pub text: Color,
}

impl Palette {
    const fn new(top: u8, bottom: u8, text: u8) -> Self {
        Self { top: Color(top), bottom: Color(bottom), text: Color(text) }
    }

    pub fn for_scheme(scheme: Scheme, mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => match scheme {
                Scheme::Clear => Palette::new(75, 117, 16),
                Scheme::Clouds => Palette::new(153, 252, 236),
                Scheme::Rain => Palette::new(111, 250, 236),
                Scheme::Thunder => Palette::new(183, 250, 236),
                Scheme::Snow => Palette::new(189, 255, 238),
                Scheme::Mist => Palette::new(252, 250, 238),
                Scheme::Default => Palette::new(189, 231, 238),
            },
            ThemeMode::Dark => match scheme {
                Scheme::Clear => Palette::new(17, 18, 230),
                Scheme::Clouds => Palette::new(235, 236, 252),
                Scheme::Rain => Palette::new(233, 18, 252),
                Scheme::Thunder => Palette::new(233, 53, 252),
                Scheme::Snow => Palette::new(236, 235, 255),
                Scheme::Mist => Palette::new(236, 235, 250),
                Scheme::Default => Palette::new(235, 237, 252),
            },
        }
    }
}
