//! Core data models for SpaceScope
//!
//! This module contains all the data types used throughout the application
//! for representing sky events, orbital launches, space weather, and NASA
//! Earth imagery. Every type here is a plain serializable record with a
//! stable identifier; the cache layer stores them as opaque sequences.

pub mod events;
pub mod gallery;
pub mod launches;
pub mod weather;

pub use events::EventsClient;
pub use gallery::{GalleryClient, GalleryError};
pub use launches::{LaunchClient, LaunchError};
#[allow(unused_imports)]
pub use weather::{SpaceWeatherClient, SpaceWeatherError};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A point on the Earth's surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Equatorial sky coordinates as display strings (e.g. "03h 04m" / "+58° 00'")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquatorialCoords {
    pub ra: String,
    pub dec: String,
}

/// Recommended observing site for an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewingSite {
    /// Human-readable site name
    pub city: String,
    /// Site coordinates
    pub coordinates: GeoPoint,
}

/// Ground-coverage ring for globe-style visualization of an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageRing {
    /// Scientific center of the visibility region (region or pole)
    pub center: GeoPoint,
    /// Ring radius in degrees of arc on the surface
    pub radius: f64,
}

/// A single labelled scientific metric attached to an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Telemetry {
    pub label: String,
    pub value: String,
    pub unit: String,
}

/// Local observing conditions at the recommended site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservingConditions {
    /// Seeing as FWHM in arcseconds (e.g. "0.4\"")
    pub seeing: String,
    /// Sky brightness in mag/arcsec²
    pub sky_brightness: String,
    /// Bortle dark-sky class (e.g. "Class 2")
    pub bortle_class: String,
    /// Naked-eye limiting magnitude
    pub limiting_mag: String,
}

/// Categories of astronomical events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Meteor,
    Eclipse,
    Conjunction,
    Comet,
    Planet,
    Satellite,
    Aurora,
    Lunar,
}

/// An astronomical event, curated or adapted from live launch data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkyEvent {
    /// Stable identifier
    pub id: String,
    /// Event title
    pub title: String,
    /// Calendar date of the event
    pub date: NaiveDate,
    /// Event category
    pub kind: EventKind,
    /// Where the event is visible from
    pub visibility: String,
    /// Short description
    pub description: String,
    /// Qualitative viewing quality (e.g. "Excellent")
    pub viewing_quality: String,
    /// Apparent magnitude, if meaningful for this event
    pub magnitude: Option<String>,
    /// Equatorial coordinates of the event
    pub coordinates: EquatorialCoords,
    /// Recommended observing site
    pub best_viewing: ViewingSite,
    /// Visibility coverage ring
    pub coverage: CoverageRing,
    /// Event-specific scientific metrics
    pub telemetry: Vec<Telemetry>,
    /// Observing conditions at the recommended site
    pub conditions: ObservingConditions,
}

/// Launch status as reported by the manifest API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchStatus {
    pub name: String,
    pub abbrev: String,
}

/// Launch service provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchProvider {
    pub name: String,
}

/// Rocket configuration details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocketConfiguration {
    pub name: String,
    pub image_url: Option<String>,
}

/// Rocket for a launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rocket {
    pub configuration: RocketConfiguration,
}

/// Named location of a launch pad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PadLocation {
    pub name: String,
}

/// Launch pad, with coordinates when the API provides them
///
/// The manifest API serves latitude/longitude as strings and omits them for
/// some pads; `LaunchClient::pad_coordinates` resolves missing values by
/// matching the pad and location names against known launch sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pad {
    pub name: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub location: PadLocation,
}

/// Mission details attached to a launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub description: String,
}

/// An orbital launch from the manifest API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Launch {
    /// Stable identifier from the manifest API
    pub id: String,
    /// Full launch name (rocket | payload)
    pub name: String,
    /// Current status
    pub status: LaunchStatus,
    /// No-earlier-than launch time
    pub net: DateTime<Utc>,
    /// Launch service provider
    pub launch_service_provider: LaunchProvider,
    /// Rocket details
    pub rocket: Rocket,
    /// Launch pad
    pub pad: Pad,
    /// Mission details, if published
    pub mission: Option<Mission>,
}

/// GOES X-ray flare classification by peak flux decade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlareClass {
    A,
    B,
    C,
    M,
    X,
}

impl std::fmt::Display for FlareClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            FlareClass::A => "A",
            FlareClass::B => "B",
            FlareClass::C => "C",
            FlareClass::M => "M",
            FlareClass::X => "X",
        };
        write!(f, "{}", letter)
    }
}

/// Geomagnetic activity level derived from the planetary Kp index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KpStatus {
    Quiet,
    Storm,
}

/// Interplanetary magnetic field stability derived from the Bz component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldStatus {
    Stable,
    Unstable,
    /// Strongly southward Bz; geomagnetic storming likely
    Critical,
}

/// Solar wind readings at L1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarWind {
    /// Speed in km/s
    pub speed: f64,
    /// Proton density in p/cm³
    pub density: f64,
    /// Temperature in Kelvin
    pub temp: f64,
}

/// Interplanetary magnetic field readings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagneticField {
    /// Total field strength in nT
    pub bt: f64,
    /// North-south component in nT; negative (southward) couples with Earth
    pub bz: f64,
    /// Derived stability status
    pub status: FieldStatus,
}

/// Planetary Kp index reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpReading {
    pub value: f64,
    pub status: KpStatus,
}

/// One point of the GOES X-ray flux history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluxSample {
    pub time: DateTime<Utc>,
    pub flux: f64,
}

/// Current X-ray flare activity with recent history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlareActivity {
    pub class: FlareClass,
    /// Current flux in W/m²
    pub flux: f64,
    /// Recent flux samples, oldest first
    pub history: Vec<FluxSample>,
}

/// NOAA alert scales: G (geomagnetic), S (radiation), R (radio blackout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertScale {
    G,
    S,
    R,
}

/// A derived space-weather alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceAlert {
    pub scale: AlertScale,
    /// Severity level within the scale (1-5)
    pub level: u8,
    pub message: String,
}

/// A full space-weather snapshot assembled from the NOAA SWPC feeds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceWeather {
    pub solar_wind: SolarWind,
    pub magnetic_field: MagneticField,
    pub kp: KpReading,
    pub flare: FlareActivity,
    /// Smoothed sunspot number from the observed solar-cycle indices
    pub sunspot_number: f64,
    /// Solar radiation storm scale (S1-S5)
    pub radiation_scale: String,
    /// Alerts derived from the readings
    pub alerts: Vec<SpaceAlert>,
    /// Aurora visibility probability (0-100) for the observer latitude;
    /// injected per client after the shared snapshot is loaded, never cached
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub aurora_probability: Option<f64>,
    /// When this snapshot was assembled
    pub updated_at: DateTime<Utc>,
}

/// A single NASA EPIC natural-color Earth image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpicImage {
    /// EPIC frame identifier
    pub id: String,
    /// Capture time
    pub date: DateTime<Utc>,
    /// Full-resolution archive PNG URL
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sky_event_serialization_roundtrip() {
        let event = SkyEvent {
            id: "perseids-2025".to_string(),
            title: "Perseids Meteor Shower".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 8, 12).unwrap(),
            kind: EventKind::Meteor,
            visibility: "Northern Hemisphere".to_string(),
            description: "One of the brightest meteor showers of the year.".to_string(),
            viewing_quality: "Excellent".to_string(),
            magnitude: Some("2.1".to_string()),
            coordinates: EquatorialCoords {
                ra: "03h 04m".to_string(),
                dec: "+58° 00'".to_string(),
            },
            best_viewing: ViewingSite {
                city: "Mauna Kea, Hawaii".to_string(),
                coordinates: GeoPoint { lat: 19.8, lng: -155.4 },
            },
            coverage: CoverageRing {
                center: GeoPoint { lat: 90.0, lng: 0.0 },
                radius: 80.0,
            },
            telemetry: vec![Telemetry {
                label: "Zenith Hourly Rate".to_string(),
                value: "120".to_string(),
                unit: "ZHR".to_string(),
            }],
            conditions: ObservingConditions {
                seeing: "0.4\"".to_string(),
                sky_brightness: "21.9".to_string(),
                bortle_class: "Class 2".to_string(),
                limiting_mag: "7.1".to_string(),
            },
        };

        let json = serde_json::to_string(&event).expect("Failed to serialize SkyEvent");
        let deserialized: SkyEvent =
            serde_json::from_str(&json).expect("Failed to deserialize SkyEvent");

        assert_eq!(deserialized.id, event.id);
        assert_eq!(deserialized.kind, EventKind::Meteor);
        assert_eq!(deserialized.date, event.date);
        assert_eq!(deserialized.telemetry.len(), 1);
        assert_eq!(deserialized.best_viewing.coordinates, event.best_viewing.coordinates);
    }

    #[test]
    fn test_event_kind_serializes_lowercase() {
        let json = serde_json::to_string(&EventKind::Meteor).unwrap();
        assert_eq!(json, "\"meteor\"");
        let json = serde_json::to_string(&EventKind::Eclipse).unwrap();
        assert_eq!(json, "\"eclipse\"");
    }

    #[test]
    fn test_event_kind_variants_are_distinct() {
        let kinds = [
            EventKind::Meteor,
            EventKind::Eclipse,
            EventKind::Conjunction,
            EventKind::Comet,
            EventKind::Planet,
            EventKind::Satellite,
            EventKind::Aurora,
            EventKind::Lunar,
        ];

        for (i, kind1) in kinds.iter().enumerate() {
            for (j, kind2) in kinds.iter().enumerate() {
                if i == j {
                    assert_eq!(kind1, kind2);
                } else {
                    assert_ne!(kind1, kind2);
                }
            }
        }
    }

    #[test]
    fn test_flare_class_display() {
        assert_eq!(FlareClass::A.to_string(), "A");
        assert_eq!(FlareClass::X.to_string(), "X");
    }

    #[test]
    fn test_launch_deserializes_from_manifest_shape() {
        let json = r#"{
            "id": "abc-123",
            "name": "Falcon 9 Block 5 | Starlink Group 12-1",
            "status": { "name": "Go for Launch", "abbrev": "Go" },
            "net": "2025-06-15T12:00:00Z",
            "launch_service_provider": { "name": "SpaceX" },
            "rocket": { "configuration": { "name": "Falcon 9", "image_url": null } },
            "pad": {
                "name": "SLC-40",
                "latitude": "28.56",
                "longitude": "-80.58",
                "location": { "name": "Cape Canaveral SFS, FL, USA" }
            },
            "mission": { "description": "Starlink batch." }
        }"#;

        let launch: Launch = serde_json::from_str(json).expect("Failed to deserialize Launch");
        assert_eq!(launch.id, "abc-123");
        assert_eq!(launch.status.abbrev, "Go");
        assert_eq!(launch.pad.latitude.as_deref(), Some("28.56"));
        assert!(launch.mission.is_some());
    }

    #[test]
    fn test_launch_tolerates_null_mission() {
        let json = r#"{
            "id": "abc-124",
            "name": "Electron | Classified",
            "status": { "name": "TBD", "abbrev": "TBD" },
            "net": "2025-07-01T00:00:00Z",
            "launch_service_provider": { "name": "Rocket Lab" },
            "rocket": { "configuration": { "name": "Electron", "image_url": null } },
            "pad": {
                "name": "LC-1A",
                "latitude": null,
                "longitude": null,
                "location": { "name": "Mahia Peninsula, NZ" }
            },
            "mission": null
        }"#;

        let launch: Launch = serde_json::from_str(json).expect("Failed to deserialize Launch");
        assert!(launch.mission.is_none());
        assert!(launch.pad.latitude.is_none());
    }

    #[test]
    fn test_space_weather_serialization_roundtrip() {
        let weather = SpaceWeather {
            solar_wind: SolarWind {
                speed: 540.0,
                density: 7.2,
                temp: 150000.0,
            },
            magnetic_field: MagneticField {
                bt: 12.0,
                bz: -11.5,
                status: FieldStatus::Critical,
            },
            kp: KpReading {
                value: 7.2,
                status: KpStatus::Storm,
            },
            flare: FlareActivity {
                class: FlareClass::M,
                flux: 2.1e-5,
                history: vec![FluxSample {
                    time: Utc::now(),
                    flux: 1.5e-5,
                }],
            },
            sunspot_number: 145.0,
            radiation_scale: "S1".to_string(),
            alerts: vec![SpaceAlert {
                scale: AlertScale::G,
                level: 3,
                message: "Strong geomagnetic storm in progress".to_string(),
            }],
            aurora_probability: Some(66.0),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&weather).expect("Failed to serialize SpaceWeather");
        let deserialized: SpaceWeather =
            serde_json::from_str(&json).expect("Failed to deserialize SpaceWeather");

        assert_eq!(deserialized.kp.status, KpStatus::Storm);
        assert_eq!(deserialized.magnetic_field.status, FieldStatus::Critical);
        assert_eq!(deserialized.flare.class, FlareClass::M);
        assert_eq!(deserialized.alerts.len(), 1);
        assert_eq!(deserialized.aurora_probability, Some(66.0));
    }

    #[test]
    fn test_space_weather_aurora_probability_defaults_to_none() {
        // Cached snapshots predate the observer; the field must deserialize
        // as None when missing.
        let weather = SpaceWeather {
            solar_wind: SolarWind {
                speed: 400.0,
                density: 5.0,
                temp: 100000.0,
            },
            magnetic_field: MagneticField {
                bt: 5.0,
                bz: 0.0,
                status: FieldStatus::Stable,
            },
            kp: KpReading {
                value: 2.0,
                status: KpStatus::Quiet,
            },
            flare: FlareActivity {
                class: FlareClass::B,
                flux: 1e-6,
                history: Vec::new(),
            },
            sunspot_number: 145.0,
            radiation_scale: "S1".to_string(),
            alerts: Vec::new(),
            aurora_probability: None,
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&weather).unwrap();
        assert!(!json.contains("aurora_probability"));
        let deserialized: SpaceWeather = serde_json::from_str(&json).unwrap();
        assert!(deserialized.aurora_probability.is_none());
    }

    #[test]
    fn test_epic_image_roundtrip() {
        let image = EpicImage {
            id: "20250822003633".to_string(),
            date: Utc::now(),
            image_url: "https://epic.gsfc.nasa.gov/archive/natural/2025/08/22/png/epic_1b_20250822003633.png".to_string(),
        };

        let json = serde_json::to_string(&image).expect("Failed to serialize EpicImage");
        let deserialized: EpicImage =
            serde_json::from_str(&json).expect("Failed to deserialize EpicImage");

        assert_eq!(deserialized.id, image.id);
        assert_eq!(deserialized.image_url, image.image_url);
    }
}
