// src/maps/types.rs - Wire types mirroring the upstream JSON payloads
use serde::Deserialize;

use crate::models::GeoPoint;

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for GeoPoint {
    fn from(value: LatLng) -> Self {
        GeoPoint {
            latitude: value.lat,
            longitude: value.lng,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NearbyResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
pub struct NearbyResult {
    pub place_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    pub result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResult {
    pub name: Option<String>,
    pub vicinity: Option<String>,
    pub rating: Option<f64>,
    pub website: Option<String>,
    pub geometry: Geometry,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoRef {
    pub photo_reference: String,
}
