use dialoguer::{theme::ColorfulTheme, Input};
use tracing::info;

use crate::cli::cli::Result;
use crate::models::{CliApp, HarvestOutcome, SearchQuery, MAX_RADIUS_METERS, MIN_RADIUS_METERS};
use crate::pipeline::{self, SearchOutcome};
use crate::render;

impl CliApp {
    /// Terminal flavour of one search session: prompts, sequential pipeline,
    /// per-place summary on stdout and the rendered map written to the
    /// output directory.
    pub async fn run_search(&self) -> Result<()> {
        let theme = ColorfulTheme::default();
        let search = &self.config.search;

        let city: String = Input::with_theme(&theme)
            .with_prompt("Ciudad")
            .default(search.default_city.clone())
            .interact_text()?;

        let business: String = Input::with_theme(&theme)
            .with_prompt("Tipo de Negocio")
            .default(search.default_business.clone())
            .interact_text()?;

        if business.trim().is_empty() {
            println!("⚠️  Por favor, ingrese un tipo de negocio.");
            return Ok(());
        }

        let radius: u32 = Input::with_theme(&theme)
            .with_prompt("Radio (metros)")
            .default(search.default_radius_meters)
            .validate_with(|input: &u32| {
                if (MIN_RADIUS_METERS..=MAX_RADIUS_METERS).contains(input) {
                    Ok(())
                } else {
                    Err("El radio debe estar entre 100 y 5000 metros")
                }
            })
            .interact_text()?;

        let query = SearchQuery::new(city, business, radius);
        let outcome =
            pipeline::run_search(query, self.backend.as_ref(), self.finder.as_ref()).await;

        let report = match &outcome {
            SearchOutcome::Failed { message, .. } => {
                println!("❌ {}", message);
                return Ok(());
            }
            SearchOutcome::Rendered(report) => report,
        };

        for listing in &report.listings {
            println!("\n🏪 {}", listing.details.display_name());
            println!(
                "   Dirección: {}",
                listing.details.address.as_deref().unwrap_or("N/A")
            );
            println!(
                "   Sitio Web: {}",
                listing.details.website_url.as_deref().unwrap_or("N/A")
            );
            match &listing.harvest {
                HarvestOutcome::NoWebsite => {
                    println!("   Correos encontrados: No se pudo buscar (sitio web no disponible)");
                }
                HarvestOutcome::FetchFailed => println!("   Correos encontrados: Ninguno"),
                HarvestOutcome::Found(emails) if emails.is_empty() => {
                    println!("   Correos encontrados: Ninguno");
                }
                HarvestOutcome::Found(emails) => {
                    let mut sorted: Vec<_> = emails.iter().cloned().collect();
                    sorted.sort();
                    println!("   Correos encontrados: {}", sorted.join(", "));
                }
            }
        }

        let filename = format!(
            "{}/reporte-{}.html",
            self.config.output.directory, report.request_id
        );
        tokio::fs::write(&filename, render::search_page(&outcome)).await?;
        info!("Informe HTML guardado en {}", filename);
        println!("\n🗺️  Informe guardado en {}", filename);

        Ok(())
    }
}
