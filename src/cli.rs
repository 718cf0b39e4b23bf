//! Command-line interface parsing for SpaceScope
//!
//! This module handles parsing of CLI arguments using clap, including the
//! --view flag for opening directly in a specific view and the --lat flag
//! for setting the observer latitude used by the aurora estimate.

use clap::Parser;
use thiserror::Error;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified view name is not recognized
    #[error("Invalid view: '{0}'. Valid views: events, launches, weather, gallery")]
    InvalidView(String),

    /// The specified observer latitude is out of range
    #[error("Invalid latitude: {0}. Must be between -90 and 90")]
    InvalidLatitude(f64),
}

/// The dashboard views the application can open in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Events,
    Launches,
    Weather,
    Gallery,
}

impl View {
    /// Parses a view name, accepting a few common aliases
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "events" | "sky" => Some(View::Events),
            "launches" | "launch" => Some(View::Launches),
            "weather" | "space-weather" => Some(View::Weather),
            "gallery" | "epic" | "images" => Some(View::Gallery),
            _ => None,
        }
    }
}

/// SpaceScope - Sky events, launches, and space weather in your terminal
#[derive(Parser, Debug)]
#[command(name = "spacescope")]
#[command(about = "Sky events, rocket launches, space weather, and Earth imagery")]
#[command(version)]
pub struct Cli {
    /// Open directly in a specific view
    ///
    /// Examples:
    ///   spacescope --view launches   # Open on the launch manifest
    ///   spacescope --view weather    # Open on space weather
    ///
    /// Valid views: events, launches, weather, gallery
    #[arg(long, value_name = "VIEW")]
    pub view: Option<String>,

    /// Observer latitude in degrees, used for the aurora visibility estimate
    #[arg(long, value_name = "DEGREES", allow_negative_numbers = true)]
    pub lat: Option<f64>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// View to open in once data loads (None means the event list)
    pub initial_view: Option<View>,
    /// Observer latitude for the aurora estimate (if specified)
    pub observer_lat: Option<f64>,
}

/// Parses a view string argument into a View enum.
///
/// # Arguments
/// * `s` - The view string from CLI
///
/// # Returns
/// * `Ok(View)` if the string matches a valid view
/// * `Err(CliError::InvalidView)` if the string doesn't match
pub fn parse_view_arg(s: &str) -> Result<View, CliError> {
    View::from_str(s).ok_or_else(|| CliError::InvalidView(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if an invalid view or latitude was specified
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let initial_view = match &cli.view {
            None => None,
            Some(view_str) => Some(parse_view_arg(view_str)?),
        };

        if let Some(lat) = cli.lat {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(CliError::InvalidLatitude(lat));
            }
        }

        Ok(StartupConfig {
            initial_view,
            observer_lat: cli.lat,
        })
    }
}
