use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use inquire::{
    CustomUserError, InquireError, Password, PasswordDisplayMode, Select, Text,
    autocompletion::{Autocomplete, Replacement},
};
use std::io::IsTerminal;

use skyview_core::{
    Config, DataSource, DisplaySession, ThemeContext, ThemeMode, WeatherGateway,
    gateway_from_config, suggest::suggest,
};

use crate::render::{self, Style};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyview", version, about = "Current weather and 5-day forecast in your terminal")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct DisplayArgs {
    /// Color theme; defaults to the configured one.
    #[arg(long, value_parser = parse_theme)]
    theme: Option<ThemeMode>,

    /// Disable colors.
    #[arg(long)]
    plain: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure data source, API key, default city and theme.
    Configure,

    /// Show current conditions and the 5-day forecast for a city.
    Show {
        /// City name; defaults to the configured city.
        city: Option<String>,

        /// Only show current conditions.
        #[arg(long)]
        no_forecast: bool,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Show only the 5-day forecast for a city.
    Forecast {
        /// City name; defaults to the configured city.
        city: Option<String>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Search cities interactively.
    Interactive {
        #[command(flatten)]
        display: DisplayArgs,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, no_forecast, display } => {
                let cfg = Config::load()?;
                let gateway = gateway_from_config(&cfg)?;
                let (theme, style) = display.resolve(&cfg);
                let city = city.unwrap_or_else(|| cfg.default_city.clone());
                let fetch = if no_forecast { Fetch::Current } else { Fetch::All };

                let mut session = DisplaySession::new();
                search(gateway.as_ref(), &mut session, &city, fetch).await;

                print!("{}", render::render_session(&session, &theme, style, !no_forecast));

                if let Some(msg) = session.current().failed() {
                    bail!("Could not show weather for '{city}': {msg}");
                }
                Ok(())
            }
            Command::Forecast { city, display } => {
                let cfg = Config::load()?;
                let gateway = gateway_from_config(&cfg)?;
                let (theme, style) = display.resolve(&cfg);
                let city = city.unwrap_or_else(|| cfg.default_city.clone());

                let mut session = DisplaySession::new();
                search(gateway.as_ref(), &mut session, &city, Fetch::Forecast).await;

                print!("{}", render::render_forecast_screen(&session, &theme, style));

                if let Some(msg) = session.forecast().failed() {
                    bail!("Could not show forecast for '{city}': {msg}");
                }
                Ok(())
            }
            Command::Interactive { display } => {
                let cfg = Config::load()?;
                let gateway = gateway_from_config(&cfg)?;
                let (theme, style) = display.resolve(&cfg);
                interactive(gateway.as_ref(), &cfg.default_city, theme, style).await
            }
        }
    }
}

impl DisplayArgs {
    fn resolve(&self, cfg: &Config) -> (ThemeContext, Style) {
        let theme = ThemeContext::new(self.theme.unwrap_or(cfg.theme));
        let style = Style { color: !self.plain && std::io::stdout().is_terminal() };
        (theme, style)
    }
}

fn parse_theme(value: &str) -> Result<ThemeMode, String> {
    ThemeMode::try_from(value).map_err(|e| e.to_string())
}

/// Which sections a search fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fetch {
    All,
    Current,
    Forecast,
}

/// Fetch the requested sections concurrently into the session.
///
/// Provider errors are logged by the session; only the user-facing text is kept.
async fn search(
    gateway: &dyn WeatherGateway,
    session: &mut DisplaySession,
    city: &str,
    fetch: Fetch,
) {
    let tag = session.begin(city);

    match fetch {
        Fetch::All => {
            let (current, forecast) = tokio::join!(
                gateway.current_conditions(&tag.location),
                gateway.forecast(&tag.location)
            );
            session.apply_current(&tag, current);
            session.apply_forecast(&tag, forecast);
        }
        Fetch::Current => {
            let current = gateway.current_conditions(&tag.location).await;
            session.apply_current(&tag, current);
        }
        Fetch::Forecast => {
            let forecast = gateway.forecast(&tag.location).await;
            session.apply_forecast(&tag, forecast);
        }
    }
}

async fn interactive(
    gateway: &dyn WeatherGateway,
    default_city: &str,
    mut theme: ThemeContext,
    style: Style,
) -> anyhow::Result<()> {
    let mut session = DisplaySession::new();
    search(gateway, &mut session, default_city, Fetch::All).await;
    print!("{}", render::render_session(&session, &theme, style, true));

    loop {
        let answer = Text::new("City:")
            .with_placeholder("Search for a city...")
            .with_help_message(":theme toggles light/dark, :quit exits, empty refreshes")
            .with_autocomplete(CityCompleter)
            .prompt_skippable();

        let input = match answer {
            Ok(Some(input)) => input,
            Ok(None) | Err(InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        match input.trim() {
            ":quit" | ":q" => break,
            ":theme" => {
                let mode = theme.toggle();
                println!("Switched to {mode} mode");
            }
            "" => {
                let city = session.location().unwrap_or(default_city).to_string();
                search(gateway, &mut session, &city, Fetch::All).await;
            }
            city => {
                search(gateway, &mut session, city, Fetch::All).await;
            }
        }

        print!("{}", render::render_session(&session, &theme, style, true));
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let sources = DataSource::all().to_vec();
    let cursor = sources.iter().position(|s| *s == cfg.data_source).unwrap_or(0);
    cfg.data_source = Select::new("Data source:", sources)
        .with_starting_cursor(cursor)
        .with_help_message("auto: live data when an API key is available, sample data otherwise")
        .prompt()?;

    if cfg.data_source != DataSource::Sample {
        let key = Password::new("OpenWeatherMap API key (empty keeps the current one):")
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()?;

        if !key.trim().is_empty() {
            cfg.set_api_key(Some(key));
        }
    }

    let city = Text::new("Default city:")
        .with_default(&cfg.default_city)
        .with_autocomplete(CityCompleter)
        .prompt()?;
    cfg.default_city = city.trim().to_string();

    let modes = vec![ThemeMode::Light, ThemeMode::Dark];
    let cursor = modes.iter().position(|m| *m == cfg.theme).unwrap_or(0);
    cfg.theme = Select::new("Theme:", modes).with_starting_cursor(cursor).prompt()?;

    if cfg.default_city.is_empty() {
        bail!("Default city must not be empty");
    }

    if cfg.data_source == DataSource::Live && cfg.api_key().is_none() {
        println!("Warning: data source is 'live' but no API key is set; `skyview show` will fail.");
    }

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

/// Suggests popular cities while typing.
#[derive(Debug, Clone, Default)]
struct CityCompleter;

impl Autocomplete for CityCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        Ok(suggest(input).into_iter().map(str::to_string).collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}
