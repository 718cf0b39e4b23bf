//! NASA EPIC Earth imagery client
//!
//! Fetches the most recent natural-color frames from the DSCOVR EPIC camera
//! and resolves each to its full-resolution archive PNG URL. Cached for a
//! day. There is no meaningful mock imagery, so the fallback chain ends at
//! an empty gallery.

use chrono::{Duration, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::cache::{CacheStore, CachedSource};

use super::EpicImage;

const EPIC_API_URL: &str = "https://epic.gsfc.nasa.gov/api/natural";
const EPIC_ARCHIVE_URL: &str = "https://epic.gsfc.nasa.gov/archive/natural";

/// Cache key for the EPIC gallery
const GALLERY_CACHE_KEY: &str = "epic";

/// EPIC publishes roughly one batch per day
const GALLERY_CACHE_TTL_HOURS: i64 = 24;

/// How many frames to keep from the latest batch
const GALLERY_LIMIT: usize = 8;

/// Errors that can occur when fetching EPIC imagery
#[derive(Debug, Error)]
pub enum GalleryError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// API returned a non-success status
    #[error("EPIC API returned status {0}")]
    ApiStatus(u16),
}

/// One frame as reported by the EPIC API
#[derive(Debug, Deserialize)]
struct EpicApiFrame {
    identifier: String,
    image: String,
    date: String,
}

/// Client for fetching NASA EPIC Earth imagery
#[derive(Debug, Clone)]
pub struct GalleryClient {
    client: Client,
    source: CachedSource<EpicImage>,
}

impl GalleryClient {
    /// Creates a new GalleryClient backed by the given cache store
    pub fn new(store: Option<CacheStore>) -> Self {
        Self {
            client: Client::new(),
            source: CachedSource::new(
                store,
                GALLERY_CACHE_KEY,
                Duration::hours(GALLERY_CACHE_TTL_HOURS),
                Vec::new,
            ),
        }
    }

    /// Returns the latest EPIC frames, served through the cache
    ///
    /// Degrades to a stale gallery on fetch failure, then to empty; the
    /// gallery view renders an unavailable notice for an empty result.
    pub async fn fetch_gallery(&self) -> Vec<EpicImage> {
        self.source.get(|| self.fetch_frames()).await
    }

    async fn fetch_frames(&self) -> Result<Vec<EpicImage>, GalleryError> {
        let response = self.client.get(EPIC_API_URL).send().await?;
        if !response.status().is_success() {
            return Err(GalleryError::ApiStatus(response.status().as_u16()));
        }

        let text = response.text().await?;
        let frames: Vec<EpicApiFrame> = serde_json::from_str(&text)?;

        Ok(frames
            .iter()
            .take(GALLERY_LIMIT)
            .filter_map(frame_to_image)
            .collect())
    }
}

/// Resolves an API frame to its archive PNG URL
///
/// The archive is laid out by capture date: `natural/YYYY/MM/DD/png/<image>.png`.
/// Frames with an unparsable date are dropped.
fn frame_to_image(frame: &EpicApiFrame) -> Option<EpicImage> {
    let captured = NaiveDateTime::parse_from_str(&frame.date, "%Y-%m-%d %H:%M:%S").ok()?;
    let date_path = captured.format("%Y/%m/%d");

    Some(EpicImage {
        id: frame.identifier.clone(),
        date: captured.and_utc(),
        image_url: format!("{}/{}/png/{}.png", EPIC_ARCHIVE_URL, date_path, frame.image),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const SAMPLE_FRAMES: &str = r#"[
        {
            "identifier": "20250822003633",
            "caption": "This image was taken by NASA's EPIC camera onboard the NOAA DSCOVR spacecraft",
            "image": "epic_1b_20250822003633",
            "version": "03",
            "date": "2025-08-22 00:36:33"
        },
        {
            "identifier": "20250822022212",
            "caption": "This image was taken by NASA's EPIC camera onboard the NOAA DSCOVR spacecraft",
            "image": "epic_1b_20250822022212",
            "version": "03",
            "date": "2025-08-22 02:22:12"
        }
    ]"#;

    #[test]
    fn test_frame_resolves_to_archive_url() {
        let frames: Vec<EpicApiFrame> =
            serde_json::from_str(SAMPLE_FRAMES).expect("Failed to parse frames");

        let image = frame_to_image(&frames[0]).expect("Frame should resolve");
        assert_eq!(image.id, "20250822003633");
        assert_eq!(
            image.image_url,
            "https://epic.gsfc.nasa.gov/archive/natural/2025/08/22/png/epic_1b_20250822003633.png"
        );
        assert_eq!(image.date.year(), 2025);
        assert_eq!(image.date.hour(), 0);
    }

    #[test]
    fn test_frame_with_unparsable_date_is_dropped() {
        let frame = EpicApiFrame {
            identifier: "bad".to_string(),
            image: "epic_1b_bad".to_string(),
            date: "not a date".to_string(),
        };

        assert!(frame_to_image(&frame).is_none());
    }

    #[test]
    fn test_archive_path_zero_pads_month_and_day() {
        let frame = EpicApiFrame {
            identifier: "20250101000000".to_string(),
            image: "epic_1b_20250101000000".to_string(),
            date: "2025-01-01 00:00:00".to_string(),
        };

        let image = frame_to_image(&frame).expect("Frame should resolve");
        assert!(image.image_url.contains("/2025/01/01/png/"));
    }

    #[test]
    fn test_gallery_limit_takes_first_frames() {
        let frames: Vec<EpicApiFrame> = (0..12)
            .map(|i| EpicApiFrame {
                identifier: format!("frame-{}", i),
                image: format!("epic_1b_{}", i),
                date: "2025-08-22 00:36:33".to_string(),
            })
            .collect();

        let images: Vec<EpicImage> = frames
            .iter()
            .take(GALLERY_LIMIT)
            .filter_map(frame_to_image)
            .collect();

        assert_eq!(images.len(), GALLERY_LIMIT);
        assert_eq!(images[0].id, "frame-0");
    }
}
