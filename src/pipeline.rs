// src/pipeline.rs - One search invocation, strictly sequential
use tracing::{info, warn};
use uuid::Uuid;

use crate::harvester::EmailFinder;
use crate::maps::PlacesBackend;
use crate::models::{GeoPoint, HarvestOutcome, PlaceDetails, SearchQuery};

/// One detailed place plus whatever the harvest turned up for it.
#[derive(Debug)]
pub struct Listing {
    pub details: PlaceDetails,
    pub harvest: HarvestOutcome,
    pub photo_url: Option<String>,
}

/// Everything one invocation produced. This is the whole request-scoped
/// state: it is built up here and handed to the renderer, nothing ambient.
#[derive(Debug)]
pub struct SearchReport {
    pub request_id: String,
    pub query: SearchQuery,
    pub center: GeoPoint,
    pub listings: Vec<Listing>,
    pub generated_at: String,
}

#[derive(Debug)]
pub enum SearchOutcome {
    Failed { query: SearchQuery, message: String },
    Rendered(SearchReport),
}

/// Geocode, nearby search, then one detail fetch and one harvest per place,
/// in order. A place whose detail fetch fails is skipped without surfacing
/// anything to the operator; the skip only reaches the logs.
pub async fn run_search(
    query: SearchQuery,
    backend: &dyn PlacesBackend,
    finder: &dyn EmailFinder,
) -> SearchOutcome {
    let request_id = Uuid::new_v4().to_string();
    info!(
        "[{}] Buscando '{}' en {} (radio {}m)",
        request_id, query.business_keyword, query.city, query.radius_meters
    );

    let center = match backend.geocode(&query.city).await {
        Ok(point) => point,
        Err(e) => {
            return SearchOutcome::Failed {
                message: format!("Ciudad no encontrada. Status: {}", e),
                query,
            };
        }
    };

    let summaries = match backend
        .nearby_search(center, query.radius_meters, &query.business_keyword)
        .await
    {
        Ok(summaries) => summaries,
        Err(e) => {
            warn!("[{}] Nearby search failed: {}", request_id, e);
            return SearchOutcome::Failed {
                message: "No se encontraron resultados.".to_string(),
                query,
            };
        }
    };

    info!("[{}] {} lugares encontrados", request_id, summaries.len());

    let mut listings = Vec::new();
    for summary in &summaries {
        let details = match backend.place_details(summary).await {
            Ok(details) => details,
            Err(e) => {
                // skipped silently, the operator never sees this place
                warn!(
                    "[{}] Detalle de {} omitido: {}",
                    request_id, summary.place_id, e
                );
                continue;
            }
        };

        let harvest = match details.website_url.as_deref() {
            Some(url) => finder.harvest(url).await,
            None => HarvestOutcome::NoWebsite,
        };

        let photo_url = details
            .photo_reference
            .as_deref()
            .map(|reference| backend.photo_url(reference));

        listings.push(Listing {
            details,
            harvest,
            photo_url,
        });
    }

    info!(
        "[{}] Informe listo: {} negocios detallados",
        request_id,
        listings.len()
    );

    SearchOutcome::Rendered(SearchReport {
        request_id,
        query,
        center,
        listings,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmailSet, PlaceSummary, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubBackend {
        geocode_status: Option<&'static str>,
        places: Vec<PlaceDetails>,
        nearby_calls: AtomicUsize,
        details_calls: AtomicUsize,
    }

    impl StubBackend {
        fn ok(places: Vec<PlaceDetails>) -> Self {
            Self {
                geocode_status: None,
                places,
                nearby_calls: AtomicUsize::new(0),
                details_calls: AtomicUsize::new(0),
            }
        }

        fn failing_geocode(status: &'static str) -> Self {
            Self {
                geocode_status: Some(status),
                places: Vec::new(),
                nearby_calls: AtomicUsize::new(0),
                details_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PlacesBackend for StubBackend {
        async fn geocode(&self, _city: &str) -> Result<GeoPoint> {
            match self.geocode_status {
                Some(status) => Err(status.into()),
                None => Ok(GeoPoint {
                    latitude: 41.38,
                    longitude: 2.17,
                }),
            }
        }

        async fn nearby_search(
            &self,
            _location: GeoPoint,
            _radius_meters: u32,
            _keyword: &str,
        ) -> Result<Vec<PlaceSummary>> {
            self.nearby_calls.fetch_add(1, Ordering::SeqCst);
            Ok((0..self.places.len())
                .map(|i| PlaceSummary {
                    place_id: format!("place-{}", i),
                })
                .collect())
        }

        async fn place_details(&self, place: &PlaceSummary) -> Result<PlaceDetails> {
            self.details_calls.fetch_add(1, Ordering::SeqCst);
            let index: usize = place
                .place_id
                .trim_start_matches("place-")
                .parse()
                .unwrap();
            Ok(self.places[index].clone())
        }

        fn photo_url(&self, photo_reference: &str) -> String {
            format!("https://fotos.test/{}", photo_reference)
        }
    }

    struct StubFinder {
        emails: Vec<&'static str>,
    }

    #[async_trait]
    impl EmailFinder for StubFinder {
        async fn harvest(&self, _website_url: &str) -> HarvestOutcome {
            HarvestOutcome::Found(self.emails.iter().map(|e| e.to_string()).collect())
        }
    }

    fn bistro(website: Option<&str>) -> PlaceDetails {
        PlaceDetails {
            name: Some("Test Bistro".to_string()),
            address: Some("Calle Mayor 1".to_string()),
            rating: Some(4.5),
            website_url: website.map(String::from),
            location: GeoPoint {
                latitude: 41.38,
                longitude: 2.17,
            },
            photo_reference: None,
        }
    }

    fn query() -> SearchQuery {
        SearchQuery::new("Barcelona", "Restaurante", 500)
    }

    #[tokio::test]
    async fn search_renders_listing_with_harvested_email() {
        let backend = StubBackend::ok(vec![bistro(Some("http://example.test"))]);
        let finder = StubFinder {
            emails: vec!["contact@example.test"],
        };

        let outcome = run_search(query(), &backend, &finder).await;
        let report = match outcome {
            SearchOutcome::Rendered(report) => report,
            SearchOutcome::Failed { message, .. } => panic!("unexpected failure: {}", message),
        };

        assert_eq!(report.center.latitude, 41.38);
        assert_eq!(report.center.longitude, 2.17);
        assert_eq!(report.listings.len(), 1);

        let listing = &report.listings[0];
        assert_eq!(listing.details.display_name(), "Test Bistro");
        let emails: EmailSet = ["contact@example.test".to_string()].into_iter().collect();
        assert_eq!(listing.harvest, HarvestOutcome::Found(emails));

        let html = crate::render::search_page(&SearchOutcome::Rendered(report));
        assert!(html.contains("L.marker([41.38, 2.17])"));
        assert!(html.contains("<summary>Test Bistro</summary>"));
        assert!(html.contains("<strong>Correos encontrados:</strong> contact@example.test"));
    }

    #[tokio::test]
    async fn place_without_website_is_never_harvested() {
        let backend = StubBackend::ok(vec![bistro(None)]);
        struct PanickyFinder;
        #[async_trait]
        impl EmailFinder for PanickyFinder {
            async fn harvest(&self, _website_url: &str) -> HarvestOutcome {
                panic!("harvest must not run without a website");
            }
        }

        let outcome = run_search(query(), &backend, &PanickyFinder).await;
        let report = match outcome {
            SearchOutcome::Rendered(report) => report,
            SearchOutcome::Failed { message, .. } => panic!("unexpected failure: {}", message),
        };

        assert_eq!(report.listings[0].harvest, HarvestOutcome::NoWebsite);

        let html = crate::render::search_page(&SearchOutcome::Rendered(report));
        assert!(html.contains("No se pudo buscar (sitio web no disponible)"));
    }

    #[tokio::test]
    async fn non_ok_geocode_aborts_before_any_nearby_call() {
        let backend = StubBackend::failing_geocode("ZERO_RESULTS");
        let finder = StubFinder { emails: vec![] };

        let outcome = run_search(query(), &backend, &finder).await;
        let message = match &outcome {
            SearchOutcome::Failed { message, .. } => message.clone(),
            SearchOutcome::Rendered(_) => panic!("expected failure"),
        };

        assert!(message.contains("ZERO_RESULTS"));
        assert_eq!(backend.nearby_calls.load(Ordering::SeqCst), 0);
        assert_eq!(backend.details_calls.load(Ordering::SeqCst), 0);

        let html = crate::render::search_page(&outcome);
        assert!(html.contains("ZERO_RESULTS"));
        assert!(!html.contains("L.map"));
    }

    #[tokio::test]
    async fn failed_detail_fetch_skips_the_place_silently() {
        struct SkippingBackend;
        #[async_trait]
        impl PlacesBackend for SkippingBackend {
            async fn geocode(&self, _city: &str) -> Result<GeoPoint> {
                Ok(GeoPoint {
                    latitude: 41.38,
                    longitude: 2.17,
                })
            }

            async fn nearby_search(
                &self,
                _location: GeoPoint,
                _radius_meters: u32,
                _keyword: &str,
            ) -> Result<Vec<PlaceSummary>> {
                Ok(vec![
                    PlaceSummary {
                        place_id: "broken".to_string(),
                    },
                    PlaceSummary {
                        place_id: "fine".to_string(),
                    },
                ])
            }

            async fn place_details(&self, place: &PlaceSummary) -> Result<PlaceDetails> {
                if place.place_id == "broken" {
                    return Err("NOT_FOUND".into());
                }
                Ok(PlaceDetails {
                    name: Some("Sobrevive".to_string()),
                    address: None,
                    rating: None,
                    website_url: None,
                    location: GeoPoint {
                        latitude: 41.39,
                        longitude: 2.18,
                    },
                    photo_reference: None,
                })
            }

            fn photo_url(&self, _photo_reference: &str) -> String {
                String::new()
            }
        }

        let finder = StubFinder { emails: vec![] };
        let outcome = run_search(query(), &SkippingBackend, &finder).await;

        let report = match outcome {
            SearchOutcome::Rendered(report) => report,
            SearchOutcome::Failed { message, .. } => panic!("unexpected failure: {}", message),
        };

        // the broken place vanishes, the rest of the loop continues
        assert_eq!(report.listings.len(), 1);
        assert_eq!(report.listings[0].details.display_name(), "Sobrevive");
    }

    #[tokio::test]
    async fn failed_nearby_search_reports_no_results() {
        struct NoResultsBackend;
        #[async_trait]
        impl PlacesBackend for NoResultsBackend {
            async fn geocode(&self, _city: &str) -> Result<GeoPoint> {
                Ok(GeoPoint {
                    latitude: 0.0,
                    longitude: 0.0,
                })
            }

            async fn nearby_search(
                &self,
                _location: GeoPoint,
                _radius_meters: u32,
                _keyword: &str,
            ) -> Result<Vec<PlaceSummary>> {
                Err("ZERO_RESULTS".into())
            }

            async fn place_details(&self, _place: &PlaceSummary) -> Result<PlaceDetails> {
                unreachable!("details must not be fetched after a failed search")
            }

            fn photo_url(&self, _photo_reference: &str) -> String {
                String::new()
            }
        }

        let finder = StubFinder { emails: vec![] };
        let outcome = run_search(query(), &NoResultsBackend, &finder).await;

        match outcome {
            SearchOutcome::Failed { message, .. } => {
                assert_eq!(message, "No se encontraron resultados.");
            }
            SearchOutcome::Rendered(_) => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn photo_reference_becomes_a_photo_url() {
        let mut place = bistro(None);
        place.photo_reference = Some("ref-1".to_string());
        let backend = StubBackend::ok(vec![place]);
        let finder = StubFinder { emails: vec![] };

        let outcome = run_search(query(), &backend, &finder).await;
        let report = match outcome {
            SearchOutcome::Rendered(report) => report,
            SearchOutcome::Failed { message, .. } => panic!("unexpected failure: {}", message),
        };

        assert_eq!(
            report.listings[0].photo_url.as_deref(),
            Some("https://fotos.test/ref-1")
        );
    }
}
