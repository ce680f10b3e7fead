//! Terminal rendering of the display state.

use std::fmt::Write as _;

use skyview_core::{
    CurrentConditions, DailyForecastEntry, DisplaySession, Icon, Palette, Section, ThemeContext,
    format,
    theme::Color,
};

const RESET: &str = "\x1b[0m";

/// Output options that do not depend on the weather.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub color: bool,
}

impl Style {
    fn fg(&self, color: Color, text: &str) -> String {
        if self.color {
            format!("\x1b[38;5;{}m{text}{RESET}", color.0)
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color { format!("\x1b[1m{text}{RESET}") } else { text.to_string() }
    }

    /// Full-width line on a background color.
    fn band(&self, bg: Color, fg: Color, text: &str, width: usize) -> String {
        let padded = format!("{text:<width$}");
        if self.color {
            format!("\x1b[48;5;{}m\x1b[38;5;{}m{padded}{RESET}", bg.0, fg.0)
        } else {
            padded.trim_end().to_string()
        }
    }
}

const WIDTH: usize = 64;

fn icon_for(conditions: &[skyview_core::WeatherCategory]) -> Icon {
    conditions
        .first()
        .map(|c| Icon::for_category(c.id, &c.description))
        .unwrap_or(Icon::Cloud)
}

fn description(conditions: &[skyview_core::WeatherCategory]) -> String {
    conditions
        .first()
        .map(|c| format::title_case(&c.description))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Whole screen: header, current conditions, details and optionally the forecast.
pub fn render_session(
    session: &DisplaySession,
    theme: &ThemeContext,
    style: Style,
    with_forecast: bool,
) -> String {
    let current = session.current().ready();
    let group = current.and_then(|c| c.primary()).map(|c| c.group.as_str());
    let palette = theme.palette_for(group);

    let mut out = String::new();
    out.push_str(&render_header(current, session.location(), &palette, style));
    out.push('\n');

    match session.current() {
        Section::Idle => {}
        Section::Loading => out.push_str("  Loading weather...\n"),
        Section::Failed(msg) => {
            let _ = writeln!(out, "  {}", style.fg(Color(196), msg));
        }
        Section::Ready(current) => {
            out.push_str(&render_current(current, &palette, style));
            out.push('\n');
            out.push_str(&render_details(current, style));
            if with_forecast {
                out.push('\n');
                out.push_str(&render_forecast_section(session.forecast(), theme, style));
            }
        }
    }

    out
}

fn render_header(
    current: Option<&CurrentConditions>,
    location: Option<&str>,
    palette: &Palette,
    style: Style,
) -> String {
    let place = match (current, location) {
        (Some(c), _) if !c.country.is_empty() => format!("{}, {}", c.location_name, c.country),
        (Some(c), _) => c.location_name.clone(),
        (None, Some(location)) => location.to_string(),
        (None, None) => String::new(),
    };

    let title = format!(" SkyView{place:>width$} ", width = WIDTH - 10);
    format!("{}\n", style.band(palette.top, palette.text, &title, WIDTH))
}

/// Big temperature line with icon and summary on the scheme's lower band.
pub fn render_current(current: &CurrentConditions, palette: &Palette, style: Style) -> String {
    let icon = icon_for(&current.conditions);
    let headline = format!(
        " {}  {}  {}",
        icon.glyph(),
        format::temperature(current.temperature.current_c),
        description(&current.conditions),
    );
    let summary = format!(
        " Feels like: {}   Humidity: {}   Wind: {}",
        format::temperature(current.temperature.feels_like_c),
        format::percent(current.humidity_pct),
        format::wind_speed(current.wind.speed_mps),
    );

    format!(
        "{}\n{}\n",
        style.band(palette.bottom, palette.text, &headline, WIDTH),
        style.band(palette.bottom, palette.text, &summary, WIDTH),
    )
}

pub fn render_details(current: &CurrentConditions, style: Style) -> String {
    let tz = current.timezone_offset_s;
    let cells = [
        ("Feels Like", format::temperature(current.temperature.feels_like_c)),
        ("Humidity", format::percent(current.humidity_pct)),
        ("Wind Speed", format::wind_speed(current.wind.speed_mps)),
        ("Pressure", format::pressure(current.pressure_hpa)),
        ("Visibility", format::visibility(current.visibility_m)),
        ("Min Temp", format::temperature(current.temperature.min_c)),
        ("Max Temp", format::temperature(current.temperature.max_c)),
        ("Sunrise", format::local_time(current.sunrise, tz)),
        ("Sunset", format::local_time(current.sunset, tz)),
    ];

    let mut out = format!("{}\n", style.bold("Weather Details"));
    for row in cells.chunks(3) {
        let line = row
            .iter()
            .map(|(label, value)| format!("{label:<11}{value:<10}"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "  {}", line.trim_end());
    }
    out
}

/// Forecast-only screen: header and forecast, colored from the first day's sky.
pub fn render_forecast_screen(
    session: &DisplaySession,
    theme: &ThemeContext,
    style: Style,
) -> String {
    let days = session.forecast().ready().map(Vec::as_slice);
    let palette = forecast_palette(days, theme);

    let mut out = render_header(None, session.location(), &palette, style);
    out.push('\n');
    out.push_str(&render_forecast_section(session.forecast(), theme, style));
    out
}

fn forecast_palette(days: Option<&[DailyForecastEntry]>, theme: &ThemeContext) -> Palette {
    let group = days
        .and_then(|days| days.first())
        .and_then(|day| day.primary())
        .map(|c| c.group.as_str());
    theme.palette_for(group)
}

fn forecast_heading(palette: &Palette, style: Style) -> String {
    format!("{}\n", style.band(palette.bottom, palette.text, " 5-Day Forecast", WIDTH))
}

fn render_forecast_section(
    forecast: &Section<Vec<DailyForecastEntry>>,
    theme: &ThemeContext,
    style: Style,
) -> String {
    let heading = forecast_heading(&theme.palette_for(None), style);
    match forecast {
        Section::Idle => String::new(),
        Section::Loading => format!("{heading}  Loading forecast...\n"),
        Section::Failed(msg) => format!("{heading}  {}\n", style.fg(Color(196), msg)),
        Section::Ready(days) => render_forecast(days, theme, style),
    }
}

pub fn render_forecast(days: &[DailyForecastEntry], theme: &ThemeContext, style: Style) -> String {
    let mut out = forecast_heading(&forecast_palette(Some(days), theme), style);

    if days.is_empty() {
        out.push_str("  No forecast data available\n");
        return out;
    }

    for day in days {
        let icon = icon_for(&day.conditions);
        let _ = writeln!(
            out,
            "  {:<12}{}  {:<18}{:>6}  {} / {}  rain {}",
            format::forecast_date(day.timestamp),
            style.fg(icon.color(), icon.glyph()),
            description(&day.conditions),
            format::temperature(day.temperature.current_c),
            format::degrees(day.temperature.min_c),
            format::degrees(day.temperature.max_c),
            format::probability(day.precipitation_probability),
        );
    }

    out
}
