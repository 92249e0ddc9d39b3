use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::harvester::EmailFinder;
use crate::maps::PlacesBackend;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub const MIN_RADIUS_METERS: u32 = 100;
pub const MAX_RADIUS_METERS: u32 = 5000;

/// A single search invocation as entered by the operator. The radius is
/// clamped to the accepted range at construction, never rejected later.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub city: String,
    pub business_keyword: String,
    pub radius_meters: u32,
}

impl SearchQuery {
    pub fn new(city: impl Into<String>, business_keyword: impl Into<String>, radius_meters: u32) -> Self {
        Self {
            city: city.into(),
            business_keyword: business_keyword.into(),
            radius_meters: radius_meters.clamp(MIN_RADIUS_METERS, MAX_RADIUS_METERS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Transient key returned by the nearby search, only used to fetch details.
#[derive(Debug, Clone)]
pub struct PlaceSummary {
    pub place_id: String,
}

#[derive(Debug, Clone)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub website_url: Option<String>,
    pub location: GeoPoint,
    pub photo_reference: Option<String>,
}

impl PlaceDetails {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Negocio sin nombre")
    }
}

pub type EmailSet = HashSet<String>;

/// Per-listing harvest result. `FetchFailed` and an empty `Found` set render
/// identically to the operator ("Ninguno"); the distinction only reaches the
/// logs.
#[derive(Debug, Clone, PartialEq)]
pub enum HarvestOutcome {
    NoWebsite,
    FetchFailed,
    Found(EmailSet),
}

pub struct CliApp {
    pub config: Config,
    pub backend: Arc<dyn PlacesBackend>,
    pub finder: Arc<dyn EmailFinder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_clamped_into_accepted_range() {
        assert_eq!(SearchQuery::new("Barcelona", "Restaurante", 50).radius_meters, 100);
        assert_eq!(SearchQuery::new("Barcelona", "Restaurante", 9000).radius_meters, 5000);
        assert_eq!(SearchQuery::new("Barcelona", "Restaurante", 500).radius_meters, 500);
        assert_eq!(SearchQuery::new("Barcelona", "Restaurante", 100).radius_meters, 100);
        assert_eq!(SearchQuery::new("Barcelona", "Restaurante", 5000).radius_meters, 5000);
    }

    #[test]
    fn display_name_falls_back_to_placeholder() {
        let details = PlaceDetails {
            name: None,
            address: None,
            rating: None,
            website_url: None,
            location: GeoPoint { latitude: 0.0, longitude: 0.0 },
            photo_reference: None,
        };
        assert_eq!(details.display_name(), "Negocio sin nombre");
    }
}
