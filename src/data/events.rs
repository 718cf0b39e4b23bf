//! Sky event catalog combining curated events with live launch data
//!
//! Serves a merged, date-sorted catalog of astronomical events. The curated
//! entries are a fixed editorial dataset; on top of those, every launch from
//! the current manifest is adapted into a `[LIVE]` satellite event centered on
//! its pad. The merged catalog is cached for a day; the curated entries alone
//! double as the fallback dataset.

use chrono::{Duration, NaiveDate};
use std::convert::Infallible;

use crate::cache::{CacheStore, CachedSource};

use super::launches::{pad_coordinates, LaunchClient};
use super::{
    CoverageRing, EquatorialCoords, EventKind, GeoPoint, Launch, ObservingConditions, SkyEvent,
    Telemetry, ViewingSite,
};

/// Cache key for the merged event catalog
const EVENTS_CACHE_KEY: &str = "global_sky_events";

/// Curated entries change rarely; one refresh per day is plenty
const EVENTS_CACHE_TTL_HOURS: i64 = 24;

/// Coverage ring radius for a launch viewed from its pad, in degrees
const LAUNCH_RING_RADIUS: f64 = 10.0;

/// Client for the merged sky event catalog
#[derive(Debug, Clone)]
pub struct EventsClient {
    launches: LaunchClient,
    source: CachedSource<SkyEvent>,
}

impl EventsClient {
    /// Creates a new EventsClient backed by the given cache store
    ///
    /// The embedded launch client shares the same store, so assembling the
    /// catalog reuses a fresh launch manifest instead of refetching it.
    pub fn new(store: Option<CacheStore>) -> Self {
        Self {
            launches: LaunchClient::new(store.clone()),
            source: CachedSource::new(
                store,
                EVENTS_CACHE_KEY,
                Duration::hours(EVENTS_CACHE_TTL_HOURS),
                curated_events,
            ),
        }
    }

    /// Returns the merged event catalog, sorted by date
    ///
    /// Never fails: the launch manifest itself degrades internally, and the
    /// curated catalog is always available as the final fallback.
    pub async fn fetch_events(&self) -> Vec<SkyEvent> {
        self.source
            .get(|| async { Ok::<_, Infallible>(self.assemble_catalog().await) })
            .await
    }

    /// Builds the merged catalog: curated entries plus live launch events
    async fn assemble_catalog(&self) -> Vec<SkyEvent> {
        let launches = self.launches.fetch_launches().await;
        merge_catalog(&launches)
    }
}

/// Merges the curated catalog with launch-derived events, sorted by date
fn merge_catalog(launches: &[Launch]) -> Vec<SkyEvent> {
    let mut events = curated_events();
    events.extend(launches.iter().map(launch_event));
    events.sort_by_key(|event| event.date);
    events
}

/// Adapts one launch into a `[LIVE]` satellite event centered on its pad
fn launch_event(launch: &Launch) -> SkyEvent {
    let pad_point = pad_coordinates(&launch.pad);
    let description = launch
        .mission
        .as_ref()
        .map(|mission| mission.description.clone())
        .unwrap_or_else(|| "Orbital launch; mission details not yet published.".to_string());

    SkyEvent {
        id: format!("launch-{}", launch.id),
        title: format!("[LIVE] {}", launch.name),
        date: launch.net.date_naive(),
        kind: EventKind::Satellite,
        visibility: format!("Near {}", launch.pad.location.name),
        description,
        viewing_quality: viewing_quality_for_status(&launch.status.abbrev),
        magnitude: None,
        coordinates: EquatorialCoords {
            ra: "--h --m".to_string(),
            dec: "--° --'".to_string(),
        },
        best_viewing: ViewingSite {
            city: launch.pad.location.name.clone(),
            coordinates: pad_point,
        },
        coverage: CoverageRing {
            center: pad_point,
            radius: LAUNCH_RING_RADIUS,
        },
        telemetry: vec![
            Telemetry {
                label: "Provider".to_string(),
                value: launch.launch_service_provider.name.clone(),
                unit: String::new(),
            },
            Telemetry {
                label: "Rocket".to_string(),
                value: launch.rocket.configuration.name.clone(),
                unit: String::new(),
            },
            Telemetry {
                label: "Status".to_string(),
                value: launch.status.name.clone(),
                unit: String::new(),
            },
            Telemetry {
                label: "Window".to_string(),
                value: launch.net.format("%Y-%m-%d %H:%M").to_string(),
                unit: "UTC".to_string(),
            },
        ],
        // Launch sites sit near populated coastlines, suburban skies
        conditions: conditions_for_bortle(5),
    }
}

/// Maps a launch status abbreviation to a viewing quality label
fn viewing_quality_for_status(abbrev: &str) -> String {
    match abbrev {
        "Go" => "Good",
        "TBC" | "TBD" => "Uncertain",
        "Success" => "Concluded",
        _ => "Fair",
    }
    .to_string()
}

/// Deterministic observing conditions for a Bortle dark-sky class
///
/// Real per-site seeing is out of reach without a weather feed, so conditions
/// are derived from how dark the recommended site is.
fn conditions_for_bortle(class: u8) -> ObservingConditions {
    let (seeing, sky_brightness, limiting_mag) = match class {
        1 => ("0.4\"", "21.9", "7.6"),
        2 => ("0.5\"", "21.7", "7.1"),
        3 => ("0.7\"", "21.4", "6.6"),
        4 => ("0.9\"", "20.8", "6.1"),
        5 => ("1.2\"", "19.8", "5.6"),
        _ => ("1.5\"", "18.8", "5.0"),
    };

    ObservingConditions {
        seeing: seeing.to_string(),
        sky_brightness: sky_brightness.to_string(),
        bortle_class: format!("Class {}", class),
        limiting_mag: limiting_mag.to_string(),
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Curated astronomical events, also the fallback dataset
pub fn curated_events() -> Vec<SkyEvent> {
    vec![
        SkyEvent {
            id: "comet-tsuchinshan-atlas".to_string(),
            title: "Comet C/2023 A3 (Tsuchinshan-ATLAS)".to_string(),
            date: date(2024, 10, 12),
            kind: EventKind::Comet,
            visibility: "Both Hemispheres".to_string(),
            description: "Closest approach to Earth; potentially visible to the naked eye in evening twilight.".to_string(),
            viewing_quality: "Good".to_string(),
            magnitude: Some("0.5".to_string()),
            coordinates: EquatorialCoords {
                ra: "13h 25m".to_string(),
                dec: "-11° 10'".to_string(),
            },
            best_viewing: ViewingSite {
                city: "Atacama Desert, Chile".to_string(),
                coordinates: GeoPoint { lat: -24.5, lng: -69.25 },
            },
            coverage: CoverageRing {
                center: GeoPoint { lat: 0.0, lng: -60.0 },
                radius: 70.0,
            },
            telemetry: vec![
                Telemetry {
                    label: "Perihelion Distance".to_string(),
                    value: "0.39".to_string(),
                    unit: "AU".to_string(),
                },
                Telemetry {
                    label: "Tail Length".to_string(),
                    value: "15".to_string(),
                    unit: "deg".to_string(),
                },
            ],
            conditions: conditions_for_bortle(1),
        },
        SkyEvent {
            id: "aurora-equinox-2025".to_string(),
            title: "Equinox Aurora Season Peak".to_string(),
            date: date(2025, 3, 20),
            kind: EventKind::Aurora,
            visibility: "High Latitudes".to_string(),
            description: "The Russell-McPherron effect favors geomagnetic storms around the equinoxes, near solar maximum.".to_string(),
            viewing_quality: "Good".to_string(),
            magnitude: None,
            coordinates: EquatorialCoords {
                ra: "--h --m".to_string(),
                dec: "--° --'".to_string(),
            },
            best_viewing: ViewingSite {
                city: "Tromsø, Norway".to_string(),
                coordinates: GeoPoint { lat: 69.65, lng: 18.96 },
            },
            coverage: CoverageRing {
                center: GeoPoint { lat: 90.0, lng: 0.0 },
                radius: 30.0,
            },
            telemetry: vec![Telemetry {
                label: "Typical Kp".to_string(),
                value: "5+".to_string(),
                unit: "Kp".to_string(),
            }],
            conditions: conditions_for_bortle(2),
        },
        SkyEvent {
            id: "perseids-2025".to_string(),
            title: "Perseids Meteor Shower".to_string(),
            date: date(2025, 8, 12),
            kind: EventKind::Meteor,
            visibility: "Northern Hemisphere".to_string(),
            description: "Debris from comet Swift-Tuttle produces one of the year's most reliable showers.".to_string(),
            viewing_quality: "Excellent".to_string(),
            magnitude: Some("2.1".to_string()),
            coordinates: EquatorialCoords {
                ra: "03h 04m".to_string(),
                dec: "+58° 00'".to_string(),
            },
            best_viewing: ViewingSite {
                city: "Mauna Kea, Hawaii".to_string(),
                coordinates: GeoPoint { lat: 19.82, lng: -155.47 },
            },
            coverage: CoverageRing {
                center: GeoPoint { lat: 90.0, lng: 0.0 },
                radius: 80.0,
            },
            telemetry: vec![
                Telemetry {
                    label: "Zenith Hourly Rate".to_string(),
                    value: "100".to_string(),
                    unit: "ZHR".to_string(),
                },
                Telemetry {
                    label: "Entry Velocity".to_string(),
                    value: "59".to_string(),
                    unit: "km/s".to_string(),
                },
            ],
            conditions: conditions_for_bortle(1),
        },
        SkyEvent {
            id: "saturn-opposition-2025".to_string(),
            title: "Saturn at Opposition".to_string(),
            date: date(2025, 9, 21),
            kind: EventKind::Planet,
            visibility: "Both Hemispheres".to_string(),
            description: "Saturn rises at sunset at its closest and brightest, with the rings nearly edge-on.".to_string(),
            viewing_quality: "Good".to_string(),
            magnitude: Some("0.6".to_string()),
            coordinates: EquatorialCoords {
                ra: "23h 58m".to_string(),
                dec: "-02° 30'".to_string(),
            },
            best_viewing: ViewingSite {
                city: "La Palma, Canary Islands".to_string(),
                coordinates: GeoPoint { lat: 28.76, lng: -17.89 },
            },
            coverage: CoverageRing {
                center: GeoPoint { lat: -2.5, lng: 0.0 },
                radius: 85.0,
            },
            telemetry: vec![
                Telemetry {
                    label: "Distance".to_string(),
                    value: "8.55".to_string(),
                    unit: "AU".to_string(),
                },
                Telemetry {
                    label: "Ring Tilt".to_string(),
                    value: "1.8".to_string(),
                    unit: "deg".to_string(),
                },
            ],
            conditions: conditions_for_bortle(2),
        },
        SkyEvent {
            id: "geminids-2025".to_string(),
            title: "Geminids Meteor Shower".to_string(),
            date: date(2025, 12, 14),
            kind: EventKind::Meteor,
            visibility: "Both Hemispheres".to_string(),
            description: "The strongest annual shower, fed by asteroid 3200 Phaethon rather than a comet.".to_string(),
            viewing_quality: "Excellent".to_string(),
            magnitude: Some("1.8".to_string()),
            coordinates: EquatorialCoords {
                ra: "07h 28m".to_string(),
                dec: "+32° 00'".to_string(),
            },
            best_viewing: ViewingSite {
                city: "NamibRand, Namibia".to_string(),
                coordinates: GeoPoint { lat: -25.0, lng: 16.0 },
            },
            coverage: CoverageRing {
                center: GeoPoint { lat: 32.0, lng: 0.0 },
                radius: 85.0,
            },
            telemetry: vec![
                Telemetry {
                    label: "Zenith Hourly Rate".to_string(),
                    value: "150".to_string(),
                    unit: "ZHR".to_string(),
                },
                Telemetry {
                    label: "Entry Velocity".to_string(),
                    value: "35".to_string(),
                    unit: "km/s".to_string(),
                },
            ],
            conditions: conditions_for_bortle(1),
        },
        SkyEvent {
            id: "quadrantids-2026".to_string(),
            title: "Quadrantids Meteor Shower".to_string(),
            date: date(2026, 1, 3),
            kind: EventKind::Meteor,
            visibility: "Northern Hemisphere".to_string(),
            description: "A sharp six-hour peak that can briefly rival the Geminids.".to_string(),
            viewing_quality: "Fair".to_string(),
            magnitude: Some("2.5".to_string()),
            coordinates: EquatorialCoords {
                ra: "15h 18m".to_string(),
                dec: "+49° 30'".to_string(),
            },
            best_viewing: ViewingSite {
                city: "Jasper, Canada".to_string(),
                coordinates: GeoPoint { lat: 52.87, lng: -118.08 },
            },
            coverage: CoverageRing {
                center: GeoPoint { lat: 90.0, lng: 0.0 },
                radius: 60.0,
            },
            telemetry: vec![Telemetry {
                label: "Zenith Hourly Rate".to_string(),
                value: "120".to_string(),
                unit: "ZHR".to_string(),
            }],
            conditions: conditions_for_bortle(2),
        },
        SkyEvent {
            id: "lunar-eclipse-2026".to_string(),
            title: "Total Lunar Eclipse".to_string(),
            date: date(2026, 3, 3),
            kind: EventKind::Lunar,
            visibility: "Pacific, Americas, East Asia".to_string(),
            description: "The Moon passes through Earth's umbra for nearly an hour of totality.".to_string(),
            viewing_quality: "Excellent".to_string(),
            magnitude: Some("-12.0".to_string()),
            coordinates: EquatorialCoords {
                ra: "11h 10m".to_string(),
                dec: "+07° 00'".to_string(),
            },
            best_viewing: ViewingSite {
                city: "Honolulu, Hawaii".to_string(),
                coordinates: GeoPoint { lat: 21.31, lng: -157.86 },
            },
            coverage: CoverageRing {
                center: GeoPoint { lat: 10.0, lng: -160.0 },
                radius: 75.0,
            },
            telemetry: vec![
                Telemetry {
                    label: "Totality Duration".to_string(),
                    value: "58".to_string(),
                    unit: "min".to_string(),
                },
                Telemetry {
                    label: "Umbral Magnitude".to_string(),
                    value: "1.15".to_string(),
                    unit: String::new(),
                },
            ],
            conditions: conditions_for_bortle(4),
        },
        SkyEvent {
            id: "solar-eclipse-2026".to_string(),
            title: "Total Solar Eclipse".to_string(),
            date: date(2026, 8, 12),
            kind: EventKind::Eclipse,
            visibility: "Greenland, Iceland, Spain".to_string(),
            description: "The first total solar eclipse over mainland Europe since 1999; totality crosses northern Spain at sunset.".to_string(),
            viewing_quality: "Excellent".to_string(),
            magnitude: None,
            coordinates: EquatorialCoords {
                ra: "09h 30m".to_string(),
                dec: "+15° 00'".to_string(),
            },
            best_viewing: ViewingSite {
                city: "Burgos, Spain".to_string(),
                coordinates: GeoPoint { lat: 42.34, lng: -3.70 },
            },
            coverage: CoverageRing {
                center: GeoPoint { lat: 55.0, lng: -20.0 },
                radius: 25.0,
            },
            telemetry: vec![
                Telemetry {
                    label: "Totality Duration".to_string(),
                    value: "2:18".to_string(),
                    unit: "min".to_string(),
                },
                Telemetry {
                    label: "Path Width".to_string(),
                    value: "294".to_string(),
                    unit: "km".to_string(),
                },
            ],
            conditions: conditions_for_bortle(4),
        },
        SkyEvent {
            id: "mars-opposition-2027".to_string(),
            title: "Mars at Opposition".to_string(),
            date: date(2027, 2, 19),
            kind: EventKind::Planet,
            visibility: "Both Hemispheres".to_string(),
            description: "Mars at its brightest for the 2027 apparition, high in the northern winter sky.".to_string(),
            viewing_quality: "Good".to_string(),
            magnitude: Some("-1.2".to_string()),
            coordinates: EquatorialCoords {
                ra: "10h 18m".to_string(),
                dec: "+15° 30'".to_string(),
            },
            best_viewing: ViewingSite {
                city: "Pic du Midi, France".to_string(),
                coordinates: GeoPoint { lat: 42.94, lng: 0.14 },
            },
            coverage: CoverageRing {
                center: GeoPoint { lat: 15.5, lng: 0.0 },
                radius: 85.0,
            },
            telemetry: vec![
                Telemetry {
                    label: "Distance".to_string(),
                    value: "0.68".to_string(),
                    unit: "AU".to_string(),
                },
                Telemetry {
                    label: "Apparent Diameter".to_string(),
                    value: "13.8".to_string(),
                    unit: "arcsec".to_string(),
                },
            ],
            conditions: conditions_for_bortle(2),
        },
        SkyEvent {
            id: "solar-eclipse-2027".to_string(),
            title: "Total Solar Eclipse".to_string(),
            date: date(2027, 8, 2),
            kind: EventKind::Eclipse,
            visibility: "North Africa, Middle East".to_string(),
            description: "An exceptionally long totality, over six minutes near Luxor, along a path hugging the Mediterranean.".to_string(),
            viewing_quality: "Excellent".to_string(),
            magnitude: None,
            coordinates: EquatorialCoords {
                ra: "08h 52m".to_string(),
                dec: "+17° 45'".to_string(),
            },
            best_viewing: ViewingSite {
                city: "Luxor, Egypt".to_string(),
                coordinates: GeoPoint { lat: 25.69, lng: 32.64 },
            },
            coverage: CoverageRing {
                center: GeoPoint { lat: 25.0, lng: 20.0 },
                radius: 22.0,
            },
            telemetry: vec![
                Telemetry {
                    label: "Totality Duration".to_string(),
                    value: "6:23".to_string(),
                    unit: "min".to_string(),
                },
                Telemetry {
                    label: "Path Width".to_string(),
                    value: "258".to_string(),
                    unit: "km".to_string(),
                },
            ],
            conditions: conditions_for_bortle(3),
        },
        SkyEvent {
            id: "venus-jupiter-2027".to_string(),
            title: "Venus-Jupiter Conjunction".to_string(),
            date: date(2027, 11, 9),
            kind: EventKind::Conjunction,
            visibility: "Both Hemispheres".to_string(),
            description: "The two brightest planets pass within half a degree in the dawn sky.".to_string(),
            viewing_quality: "Good".to_string(),
            magnitude: Some("-4.2".to_string()),
            coordinates: EquatorialCoords {
                ra: "14h 40m".to_string(),
                dec: "-14° 20'".to_string(),
            },
            best_viewing: ViewingSite {
                city: "Tenerife, Canary Islands".to_string(),
                coordinates: GeoPoint { lat: 28.29, lng: -16.51 },
            },
            coverage: CoverageRing {
                center: GeoPoint { lat: -14.0, lng: 0.0 },
                radius: 80.0,
            },
            telemetry: vec![Telemetry {
                label: "Separation".to_string(),
                value: "0.5".to_string(),
                unit: "deg".to_string(),
            }],
            conditions: conditions_for_bortle(3),
        },
        SkyEvent {
            id: "halley-2061".to_string(),
            title: "Halley's Comet Returns".to_string(),
            date: date(2061, 7, 28),
            kind: EventKind::Comet,
            visibility: "Both Hemispheres".to_string(),
            description: "Perihelion of the most famous periodic comet, far better placed than in 1986.".to_string(),
            viewing_quality: "Excellent".to_string(),
            magnitude: Some("-0.3".to_string()),
            coordinates: EquatorialCoords {
                ra: "06h 10m".to_string(),
                dec: "+22° 00'".to_string(),
            },
            best_viewing: ViewingSite {
                city: "Atacama Desert, Chile".to_string(),
                coordinates: GeoPoint { lat: -24.5, lng: -69.25 },
            },
            coverage: CoverageRing {
                center: GeoPoint { lat: 20.0, lng: 0.0 },
                radius: 85.0,
            },
            telemetry: vec![
                Telemetry {
                    label: "Perihelion Distance".to_string(),
                    value: "0.59".to_string(),
                    unit: "AU".to_string(),
                },
                Telemetry {
                    label: "Orbital Period".to_string(),
                    value: "75.3".to_string(),
                    unit: "yr".to_string(),
                },
            ],
            conditions: conditions_for_bortle(1),
        },
    ]
}
