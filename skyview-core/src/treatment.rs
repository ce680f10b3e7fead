use crate::theme::Color;

/// Visual treatment for a weather category id.
///
/// Ids follow the provider's grouping: 2xx thunderstorm, 3xx drizzle, 5xx rain,
/// 6xx snow, 7xx atmosphere, 800 clear, 80x clouds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Treatment {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
}

impl Treatment {
    pub fn from_category_id(id: u16) -> Self {
        match id {
            200..=299 => Treatment::Thunderstorm,
            300..=399 => Treatment::Drizzle,
            500..=599 => Treatment::Rain,
            600..=699 => Treatment::Snow,
            700..=799 => Treatment::Atmosphere,
            800 => Treatment::Clear,
            801..=899 => Treatment::Clouds,
            _ => Treatment::Clouds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Lightning,
    Drizzle,
    Rain,
    Snow,
    Fog,
    Wind,
    Sun,
    SunBehindCloud,
    Cloud,
}

impl Icon {
    pub fn for_category(id: u16, description: &str) -> Self {
        match Treatment::from_category_id(id) {
            Treatment::Thunderstorm => Icon::Lightning,
            Treatment::Drizzle => Icon::Drizzle,
            Treatment::Rain => Icon::Rain,
            Treatment::Snow => Icon::Snow,
            Treatment::Atmosphere if description.to_lowercase().contains("fog") => Icon::Fog,
            Treatment::Atmosphere => Icon::Wind,
            Treatment::Clear => Icon::Sun,
            Treatment::Clouds if id == 801 => Icon::SunBehindCloud,
            Treatment::Clouds => Icon::Cloud,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Lightning => "⛈",
            Icon::Drizzle => "🌦",
            Icon::Rain => "🌧",
            Icon::Snow => "🌨",
            Icon::Fog => "🌫",
            Icon::Wind => "🌬",
            Icon::Sun => "☀",
            Icon::SunBehindCloud => "⛅",
            Icon::Cloud => "☁",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Icon::Lightning => Color(135),
            Icon::Drizzle => Color(75),
            Icon::Rain => Color(33),
            Icon::Snow => Color(153),
            Icon::Fog => Color(248),
            Icon::Wind | Icon::SunBehindCloud | Icon::Cloud => Color(244),
            Icon::Sun => Color(220),
        }
    }
}
