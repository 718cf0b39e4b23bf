//! Space weather client for the NOAA SWPC data feeds
//!
//! Assembles a single snapshot from five independent SWPC feeds: solar wind
//! plasma, interplanetary magnetic field, planetary Kp index, GOES X-ray
//! flux, and the observed solar-cycle indices. Each feed is fetched in
//! parallel and fault-isolated; a failed feed falls back to quiet-sun
//! defaults rather than failing the snapshot. The snapshot is cached for
//! fifteen minutes as a one-element sequence.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::cache::{CacheStore, CachedSource};

use super::{
    AlertScale, FieldStatus, FlareActivity, FlareClass, FluxSample, KpReading, KpStatus,
    MagneticField, SolarWind, SpaceAlert, SpaceWeather,
};

const SWPC_BASE_URL: &str = "https://services.swpc.noaa.gov";

/// Cache key for the space weather snapshot
const WEATHER_CACHE_KEY: &str = "global_readings";

/// Space weather moves fast; refresh every fifteen minutes
const WEATHER_CACHE_TTL_MINUTES: i64 = 15;

// Quiet-sun defaults used when a feed is unavailable
const DEFAULT_DENSITY: f64 = 5.0;
const DEFAULT_SPEED: f64 = 400.0;
const DEFAULT_TEMP: f64 = 100_000.0;
const DEFAULT_BT: f64 = 5.0;
const DEFAULT_BZ: f64 = 0.0;
const DEFAULT_KP: f64 = 2.0;
const DEFAULT_FLUX: f64 = 1e-6;
const DEFAULT_SSN: f64 = 145.0;

/// SWPC "products" feeds: row-oriented tables with a header row, every cell a
/// nullable string
type ProductTable = Vec<Vec<Option<String>>>;

/// Errors that can occur when fetching space weather data
#[derive(Debug, Error)]
pub enum SpaceWeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// API returned a non-success status
    #[error("SWPC API returned status {0}")]
    ApiStatus(u16),
}

/// One GOES X-ray flux sample from the 6-hour feed
#[derive(Debug, Deserialize)]
struct XraySample {
    time_tag: String,
    flux: f64,
    energy: String,
}

/// One row of the observed solar-cycle indices
#[derive(Debug, Deserialize)]
struct SolarCycleIndex {
    ssn: f64,
}

/// Client for assembling space weather snapshots from the SWPC feeds
#[derive(Debug, Clone)]
pub struct SpaceWeatherClient {
    client: Client,
    source: CachedSource<SpaceWeather>,
}

impl SpaceWeatherClient {
    /// Creates a new SpaceWeatherClient backed by the given cache store
    pub fn new(store: Option<CacheStore>) -> Self {
        Self {
            client: Client::new(),
            source: CachedSource::new(
                store,
                WEATHER_CACHE_KEY,
                Duration::minutes(WEATHER_CACHE_TTL_MINUTES),
                mock_weather,
            ),
        }
    }

    /// Returns the current space weather snapshot, served through the cache
    ///
    /// Never fails in practice: snapshot assembly substitutes quiet-sun
    /// defaults per feed, and the fallback chain bottoms out at the mock
    /// snapshot. `None` only occurs for an empty cached record.
    pub async fn fetch_weather(&self) -> Option<SpaceWeather> {
        self.source
            .get(|| async {
                self.assemble_snapshot().await.map(|snapshot| vec![snapshot])
            })
            .await
            .into_iter()
            .next()
    }

    /// Fetches all five feeds in parallel and assembles the snapshot
    ///
    /// Each feed degrades independently: a failure is logged and its readings
    /// fall back to quiet-sun defaults, so one dead feed never blanks the
    /// whole snapshot. Only when every feed is down does assembly fail, so a
    /// stale cached snapshot wins over an all-defaults one.
    async fn assemble_snapshot(&self) -> Result<SpaceWeather, SpaceWeatherError> {
        let (plasma, mag, kp_table, xray, solar_cycle) = tokio::join!(
            self.fetch_json::<ProductTable>("/products/solar-wind/plasma-7-day.json"),
            self.fetch_json::<ProductTable>("/products/solar-wind/mag-7-day.json"),
            self.fetch_json::<ProductTable>("/products/noaa-planetary-k-index.json"),
            self.fetch_json::<Vec<XraySample>>("/json/goes/primary/xrays-6-hour.json"),
            self.fetch_json::<Vec<SolarCycleIndex>>(
                "/json/solar-cycle/observed-solar-cycle-indices.json"
            ),
        );

        let all_down = plasma.is_err()
            && mag.is_err()
            && kp_table.is_err()
            && xray.is_err()
            && solar_cycle.is_err();

        let plasma = match plasma {
            Ok(table) => table,
            Err(error) if all_down => return Err(error),
            Err(error) => {
                warn!(feed = "plasma", %error, "SWPC feed unavailable, using defaults");
                ProductTable::default()
            }
        };
        let mag = feed_or_default("mag", mag);
        let kp_table = feed_or_default("kp", kp_table);
        let xray = feed_or_default("xray", xray);
        let solar_cycle = feed_or_default("solar-cycle", solar_cycle);

        // Plasma columns: time_tag, density, speed, temperature
        let density = last_column_value(&plasma, 1).unwrap_or(DEFAULT_DENSITY);
        let speed = last_column_value(&plasma, 2).unwrap_or(DEFAULT_SPEED);
        let temp = last_column_value(&plasma, 3).unwrap_or(DEFAULT_TEMP);

        // Mag columns: time_tag, bx, by, bz, lon, lat, bt
        let bz = last_column_value(&mag, 3).unwrap_or(DEFAULT_BZ);
        let bt = last_column_value(&mag, 6).unwrap_or(DEFAULT_BT);

        let kp = last_column_value(&kp_table, 1).unwrap_or(DEFAULT_KP);

        let history = flux_history(&xray);
        let flux = history.last().map(|sample| sample.flux).unwrap_or(DEFAULT_FLUX);
        let class = flare_class_for_flux(flux);

        let sunspot_number = solar_cycle
            .last()
            .map(|index| index.ssn)
            .unwrap_or(DEFAULT_SSN);

        Ok(SpaceWeather {
            solar_wind: SolarWind { speed, density, temp },
            magnetic_field: MagneticField {
                bt,
                bz,
                status: field_status_for_bz(bz),
            },
            kp: KpReading {
                value: kp,
                status: kp_status(kp),
            },
            flare: FlareActivity { class, flux, history },
            sunspot_number,
            radiation_scale: radiation_scale_for(class),
            alerts: derive_alerts(kp, class),
            aurora_probability: None,
            updated_at: Utc::now(),
        })
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, SpaceWeatherError> {
        let url = format!("{}{}", SWPC_BASE_URL, path);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SpaceWeatherError::ApiStatus(response.status().as_u16()));
        }

        let text = response.text().await?;
        let value: T = serde_json::from_str(&text)?;
        Ok(value)
    }
}

/// Logs and discards a failed feed, substituting an empty one
fn feed_or_default<T: Default>(feed: &str, result: Result<T, SpaceWeatherError>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            warn!(feed, %error, "SWPC feed unavailable, using defaults");
            T::default()
        }
    }
}

/// Reads the most recent parsable value in a product-table column
///
/// Skips the header row and walks backwards, since the newest rows can hold
/// nulls while the instrument catches up.
fn last_column_value(table: &ProductTable, column: usize) -> Option<f64> {
    table
        .iter()
        .skip(1)
        .rev()
        .find_map(|row| row.get(column)?.as_ref()?.parse::<f64>().ok())
}

/// Extracts the long-wavelength (0.1-0.8 nm) flux history, oldest first
fn flux_history(samples: &[XraySample]) -> Vec<FluxSample> {
    samples
        .iter()
        .filter(|sample| sample.energy == "0.1-0.8nm")
        .filter_map(|sample| {
            Some(FluxSample {
                time: parse_swpc_time(&sample.time_tag)?,
                flux: sample.flux,
            })
        })
        .collect()
}

/// Parses an SWPC timestamp, with or without the RFC 3339 `Z` suffix
fn parse_swpc_time(time_tag: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(time_tag) {
        return Some(time.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(time_tag, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Classifies a GOES X-ray flux (W/m²) by peak-flux decade
pub fn flare_class_for_flux(flux: f64) -> FlareClass {
    if flux < 1e-7 {
        FlareClass::A
    } else if flux < 1e-6 {
        FlareClass::B
    } else if flux < 1e-5 {
        FlareClass::C
    } else if flux < 1e-4 {
        FlareClass::M
    } else {
        FlareClass::X
    }
}

/// Derives field stability from the north-south Bz component
///
/// Strongly southward (negative) Bz couples the solar wind into the
/// magnetosphere.
pub fn field_status_for_bz(bz: f64) -> FieldStatus {
    if bz < -10.0 {
        FieldStatus::Critical
    } else if bz < -5.0 {
        FieldStatus::Unstable
    } else {
        FieldStatus::Stable
    }
}

/// Kp of 5 or above is geomagnetic storm territory (NOAA G1+)
pub fn kp_status(kp: f64) -> KpStatus {
    if kp >= 5.0 {
        KpStatus::Storm
    } else {
        KpStatus::Quiet
    }
}

/// Maps the current flare class to the NOAA radiation storm scale
fn radiation_scale_for(class: FlareClass) -> String {
    match class {
        FlareClass::X => "S3",
        FlareClass::M => "S2",
        _ => "S1",
    }
    .to_string()
}

/// Derives G (geomagnetic) and R (radio blackout) alerts from the readings
fn derive_alerts(kp: f64, class: FlareClass) -> Vec<SpaceAlert> {
    let mut alerts = Vec::new();

    if kp >= 5.0 {
        let level = ((kp - 4.0).floor() as u8).min(5);
        alerts.push(SpaceAlert {
            scale: AlertScale::G,
            level,
            message: format!("G{} geomagnetic storm in progress (Kp {:.1})", level, kp),
        });
    }

    match class {
        FlareClass::M => alerts.push(SpaceAlert {
            scale: AlertScale::R,
            level: 1,
            message: "R1 radio blackout: M-class flare activity".to_string(),
        }),
        FlareClass::X => alerts.push(SpaceAlert {
            scale: AlertScale::R,
            level: 3,
            message: "R3 radio blackout: X-class flare activity".to_string(),
        }),
        _ => {}
    }

    alerts
}

/// Estimates aurora visibility probability (0-100) at an observer latitude
///
/// Below 40° latitude aurora is effectively out of reach. Above that, the Kp
/// required to push the auroral oval overhead falls linearly from 9 at 40° to
/// 3 at 60°; the probability scales with how far the current Kp clears that
/// threshold.
pub fn aurora_probability(lat: f64, kp: f64) -> f64 {
    let abs_lat = lat.abs();
    if abs_lat < 40.0 {
        return 0.0;
    }

    let required_kp = 9.0 - ((abs_lat - 40.0) / 20.0) * 6.0;
    if kp >= required_kp {
        ((kp - required_kp + 1.0) * 30.0).min(100.0)
    } else {
        ((kp - required_kp) * 20.0).max(0.0)
    }
}

/// Quiet-sun fallback snapshot served when the feeds and cache are both empty
pub fn mock_weather() -> Vec<SpaceWeather> {
    let class = flare_class_for_flux(DEFAULT_FLUX);
    vec![SpaceWeather {
        solar_wind: SolarWind {
            speed: DEFAULT_SPEED,
            density: DEFAULT_DENSITY,
            temp: DEFAULT_TEMP,
        },
        magnetic_field: MagneticField {
            bt: DEFAULT_BT,
            bz: DEFAULT_BZ,
            status: field_status_for_bz(DEFAULT_BZ),
        },
        kp: KpReading {
            value: DEFAULT_KP,
            status: kp_status(DEFAULT_KP),
        },
        flare: FlareActivity {
            class,
            flux: DEFAULT_FLUX,
            history: Vec::new(),
        },
        sunspot_number: DEFAULT_SSN,
        radiation_scale: radiation_scale_for(class),
        alerts: Vec::new(),
        aurora_probability: None,
        updated_at: Utc::now(),
    }]
}
