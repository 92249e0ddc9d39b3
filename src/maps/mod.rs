// src/maps/mod.rs
use async_trait::async_trait;

use crate::models::{GeoPoint, PlaceDetails, PlaceSummary, Result};

pub mod google;
pub mod types;

pub use google::GoogleMapsClient;

/// Seam in front of the upstream mapping service. The pipeline only talks to
/// this trait, so searches can run against a stub backend in tests.
#[async_trait]
pub trait PlacesBackend: Send + Sync {
    /// Resolves a free-text place name to coordinates. A non-OK upstream
    /// status becomes an error whose message is the literal status string.
    async fn geocode(&self, city: &str) -> Result<GeoPoint>;

    /// Single page of nearby results, no continuation tokens.
    async fn nearby_search(
        &self,
        location: GeoPoint,
        radius_meters: u32,
        keyword: &str,
    ) -> Result<Vec<PlaceSummary>>;

    /// One detail fetch per summary, invoked sequentially by the caller.
    async fn place_details(&self, place: &PlaceSummary) -> Result<PlaceDetails>;

    /// URL for the photo endpoint; the browser fetches the bytes itself.
    fn photo_url(&self, photo_reference: &str) -> String;
}
