//! Launch manifest client for the Launch Library 2 API
//!
//! Fetches upcoming and recent launches from the Launch Library development
//! endpoint, deduplicates overlapping results, and caches the merged manifest
//! for one hour. Falls back to a small hard-coded manifest when the API and
//! the cache are both unavailable.

use chrono::{Duration, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::cache::{CacheStore, CachedSource};

use super::{
    GeoPoint, Launch, LaunchProvider, LaunchStatus, Mission, Pad, PadLocation, Rocket,
    RocketConfiguration,
};

/// Base URL for the Launch Library 2 development API
const LAUNCH_LIBRARY_BASE_URL: &str = "https://lldev.thespacedevs.com/2.2.0/launch";

/// How many launches to request per manifest page
const MANIFEST_PAGE_LIMIT: u32 = 10;

/// Cache key for the merged launch manifest
const LAUNCHES_CACHE_KEY: &str = "global_launches";

/// Launch manifests churn quickly; keep them for one hour only
const LAUNCHES_CACHE_TTL_HOURS: i64 = 1;

/// Errors that can occur when fetching launch data
#[derive(Debug, Error)]
pub enum LaunchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// API returned a non-success status
    #[error("Launch API returned status {0}")]
    ApiStatus(u16),
}

/// Client for fetching the global launch manifest
#[derive(Debug, Clone)]
pub struct LaunchClient {
    client: Client,
    source: CachedSource<Launch>,
}

impl LaunchClient {
    /// Creates a new LaunchClient backed by the given cache store
    pub fn new(store: Option<CacheStore>) -> Self {
        Self {
            client: Client::new(),
            source: CachedSource::new(
                store,
                LAUNCHES_CACHE_KEY,
                Duration::hours(LAUNCHES_CACHE_TTL_HOURS),
                mock_launches,
            ),
        }
    }

    /// Creates a new LaunchClient with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(client: Client, store: Option<CacheStore>) -> Self {
        Self {
            client,
            source: CachedSource::new(
                store,
                LAUNCHES_CACHE_KEY,
                Duration::hours(LAUNCHES_CACHE_TTL_HOURS),
                mock_launches,
            ),
        }
    }

    /// Returns the merged launch manifest, served through the cache
    ///
    /// Never fails: on a fetch failure this degrades to a stale manifest if
    /// one is cached, then to the hard-coded mock manifest.
    pub async fn fetch_launches(&self) -> Vec<Launch> {
        self.source.get(|| self.fetch_manifest()).await
    }

    /// Fetches upcoming and previous launches in parallel and merges them
    async fn fetch_manifest(&self) -> Result<Vec<Launch>, LaunchError> {
        let (upcoming, previous) = tokio::join!(
            self.fetch_manifest_page("upcoming"),
            self.fetch_manifest_page("previous"),
        );

        let mut raw = upcoming?.results;
        raw.extend(previous?.results);

        Ok(dedupe_by_id(raw))
    }

    /// Fetches one manifest page (`upcoming` or `previous`)
    async fn fetch_manifest_page(&self, page: &str) -> Result<ManifestResponse, LaunchError> {
        let url = format!(
            "{}/{}/?limit={}",
            LAUNCH_LIBRARY_BASE_URL, page, MANIFEST_PAGE_LIMIT
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LaunchError::ApiStatus(response.status().as_u16()));
        }

        let text = response.text().await?;
        let manifest: ManifestResponse = serde_json::from_str(&text)?;
        Ok(manifest)
    }
}

/// Removes duplicate launches, keeping the first occurrence of each id
///
/// The upcoming and previous pages can overlap when a launch window sits
/// close to the request time.
fn dedupe_by_id(launches: Vec<Launch>) -> Vec<Launch> {
    let mut seen = std::collections::HashSet::new();
    launches
        .into_iter()
        .filter(|launch| seen.insert(launch.id.clone()))
        .collect()
}

/// Resolves the ground coordinates of a launch pad
///
/// Prefers the coordinates the API provides; otherwise geocodes by matching
/// the pad and location names against known launch sites. Unknown sites
/// resolve to Null Island.
pub fn pad_coordinates(pad: &Pad) -> GeoPoint {
    if let (Some(lat), Some(lng)) = (&pad.latitude, &pad.longitude) {
        if let (Ok(lat), Ok(lng)) = (lat.parse::<f64>(), lng.parse::<f64>()) {
            return GeoPoint { lat, lng };
        }
    }

    let loc = format!("{} {}", pad.location.name, pad.name).to_lowercase();

    let known_sites: &[(&[&str], GeoPoint)] = &[
        (&["sriharikota", "india", "satish"], GeoPoint { lat: 13.72, lng: 80.23 }),
        (&["kennedy", "cape canaveral", "florida"], GeoPoint { lat: 28.57, lng: -80.64 }),
        (&["vandenberg", "california"], GeoPoint { lat: 34.63, lng: -120.61 }),
        (&["boca chica", "starbase"], GeoPoint { lat: 25.99, lng: -97.15 }),
        (&["baikonur", "kazakhstan"], GeoPoint { lat: 45.96, lng: 63.30 }),
        (&["plesetsk", "russia"], GeoPoint { lat: 62.92, lng: 40.57 }),
        (&["french guiana", "kourou"], GeoPoint { lat: 5.23, lng: -52.77 }),
        (&["jiuquan", "china"], GeoPoint { lat: 40.96, lng: 100.29 }),
        (&["xichang"], GeoPoint { lat: 28.24, lng: 102.02 }),
        (&["wenchang"], GeoPoint { lat: 19.61, lng: 110.95 }),
        (&["tanegashima", "japan"], GeoPoint { lat: 30.40, lng: 130.97 }),
        (&["mahia", "new zealand"], GeoPoint { lat: -39.26, lng: 177.86 }),
    ];

    for (needles, point) in known_sites {
        if needles.iter().any(|needle| loc.contains(needle)) {
            return *point;
        }
    }

    GeoPoint { lat: 0.0, lng: 0.0 }
}

/// Hard-coded fallback manifest served when the API and cache are both empty
pub fn mock_launches() -> Vec<Launch> {
    vec![
        Launch {
            id: "mock-starship-7".to_string(),
            name: "Starship Flight 7".to_string(),
            status: LaunchStatus {
                name: "Go for Launch".to_string(),
                abbrev: "Go".to_string(),
            },
            net: Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0)
                .single()
                .unwrap_or_else(Utc::now),
            launch_service_provider: LaunchProvider {
                name: "SpaceX".to_string(),
            },
            rocket: Rocket {
                configuration: RocketConfiguration {
                    name: "Starship".to_string(),
                    image_url: None,
                },
            },
            pad: Pad {
                name: "Orbital Launch Mount A".to_string(),
                latitude: None,
                longitude: None,
                location: PadLocation {
                    name: "Starbase, TX".to_string(),
                },
            },
            mission: Some(Mission {
                description: "Orbital test flight of Starship launch vehicle attempting tower catch."
                    .to_string(),
            }),
        },
        Launch {
            id: "mock-artemis-3".to_string(),
            name: "Artemis III".to_string(),
            status: LaunchStatus {
                name: "TBC".to_string(),
                abbrev: "TBC".to_string(),
            },
            net: Utc.with_ymd_and_hms(2026, 9, 1, 14, 30, 0)
                .single()
                .unwrap_or_else(Utc::now),
            launch_service_provider: LaunchProvider {
                name: "NASA".to_string(),
            },
            rocket: Rocket {
                configuration: RocketConfiguration {
                    name: "SLS Block 1B".to_string(),
                    image_url: None,
                },
            },
            pad: Pad {
                name: "LC-39B".to_string(),
                latitude: None,
                longitude: None,
                location: PadLocation {
                    name: "Kennedy Space Center, FL".to_string(),
                },
            },
            mission: Some(Mission {
                description: "First crewed lunar landing since Apollo 17.".to_string(),
            }),
        },
        Launch {
            id: "mock-electron-lafi".to_string(),
            name: "Electron | 'Love At First Insight'".to_string(),
            status: LaunchStatus {
                name: "Scheduled".to_string(),
                abbrev: "Go".to_string(),
            },
            net: Utc.with_ymd_and_hms(2025, 5, 20, 9, 15, 0)
                .single()
                .unwrap_or_else(Utc::now),
            launch_service_provider: LaunchProvider {
                name: "Rocket Lab".to_string(),
            },
            rocket: Rocket {
                configuration: RocketConfiguration {
                    name: "Electron".to_string(),
                    image_url: None,
                },
            },
            pad: Pad {
                name: "LC-1A".to_string(),
                latitude: None,
                longitude: None,
                location: PadLocation {
                    name: "Mahia Peninsula, NZ".to_string(),
                },
            },
            mission: Some(Mission {
                description: "Deployment of Earth observation satellites for BlackSky.".to_string(),
            }),
        },
    ]
}

/// Launch Library manifest response wrapper
#[derive(Debug, Deserialize)]
struct ManifestResponse {
    results: Vec<Launch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad_named(location: &str, pad: &str) -> Pad {
        Pad {
            name: pad.to_string(),
            latitude: None,
            longitude: None,
            location: PadLocation {
                name: location.to_string(),
            },
        }
    }

    /// Sample manifest page trimmed to the fields we deserialize
    const VALID_MANIFEST: &str = r#"{
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {
                "id": "launch-1",
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
            },
            {
                "id": "launch-2",
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
            }
        ]
    }"#;

    #[test]
    fn test_parse_valid_manifest() {
        let manifest: ManifestResponse =
            serde_json::from_str(VALID_MANIFEST).expect("Failed to parse manifest");

        assert_eq!(manifest.results.len(), 2);
        assert_eq!(manifest.results[0].launch_service_provider.name, "SpaceX");
        assert!(manifest.results[1].mission.is_none());
    }

    #[test]
    fn test_parse_malformed_manifest() {
        let result: Result<ManifestResponse, _> = serde_json::from_str("{ not json }");
        assert!(result.is_err());
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let manifest: ManifestResponse = serde_json::from_str(VALID_MANIFEST).unwrap();
        let mut launches = manifest.results.clone();
        let mut duplicate = manifest.results[0].clone();
        duplicate.name = "Renamed duplicate".to_string();
        launches.push(duplicate);

        let deduped = dedupe_by_id(launches);

        assert_eq!(deduped.len(), 2);
        assert_eq!(
            deduped[0].name, "Falcon 9 Block 5 | Starlink Group 12-1",
            "First occurrence should win"
        );
    }

    #[test]
    fn test_dedupe_preserves_order() {
        let manifest: ManifestResponse = serde_json::from_str(VALID_MANIFEST).unwrap();
        let deduped = dedupe_by_id(manifest.results);

        assert_eq!(deduped[0].id, "launch-1");
        assert_eq!(deduped[1].id, "launch-2");
    }

    #[test]
    fn test_pad_coordinates_prefers_api_values() {
        let pad = Pad {
            name: "SLC-40".to_string(),
            latitude: Some("28.56".to_string()),
            longitude: Some("-80.58".to_string()),
            location: PadLocation {
                name: "Cape Canaveral SFS, FL, USA".to_string(),
            },
        };

        let point = pad_coordinates(&pad);
        assert!((point.lat - 28.56).abs() < 0.001);
        assert!((point.lng - (-80.58)).abs() < 0.001);
    }

    #[test]
    fn test_pad_coordinates_geocodes_by_name() {
        let point = pad_coordinates(&pad_named("Mahia Peninsula, NZ", "LC-1A"));
        assert!((point.lat - (-39.26)).abs() < 0.001);

        let point = pad_coordinates(&pad_named("Starbase, TX", "Orbital Launch Mount A"));
        assert!((point.lat - 25.99).abs() < 0.001);

        let point = pad_coordinates(&pad_named("Kennedy Space Center, FL", "LC-39B"));
        assert!((point.lat - 28.57).abs() < 0.001);
    }

    #[test]
    fn test_pad_coordinates_falls_back_on_unparsable_values() {
        let pad = Pad {
            name: "LC-39B".to_string(),
            latitude: Some("not-a-number".to_string()),
            longitude: Some("-80.58".to_string()),
            location: PadLocation {
                name: "Kennedy Space Center, FL".to_string(),
            },
        };

        let point = pad_coordinates(&pad);
        assert!((point.lat - 28.57).abs() < 0.001, "Should geocode by name instead");
    }

    #[test]
    fn test_pad_coordinates_unknown_site_is_null_island() {
        let point = pad_coordinates(&pad_named("Somewhere Unrecognized", "Pad 1"));
        assert_eq!(point.lat, 0.0);
        assert_eq!(point.lng, 0.0);
    }

    #[test]
    fn test_mock_launches_is_non_empty_and_unique() {
        let launches = mock_launches();
        assert_eq!(launches.len(), 3);

        let deduped = dedupe_by_id(launches.clone());
        assert_eq!(deduped.len(), launches.len(), "Mock ids should be unique");
    }
}
