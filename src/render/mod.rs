// src/render/mod.rs
use crate::config::SearchConfig;
use crate::models::{HarvestOutcome, MAX_RADIUS_METERS, MIN_RADIUS_METERS};
use crate::pipeline::{Listing, SearchOutcome, SearchReport};

pub mod map;

const NOT_AVAILABLE: &str = "N/A";

// Font block carried over from the original session styling
const PAGE_CSS: &str = r#"
@import url('https://fonts.googleapis.com/css2?family=Saira:wght@100;300;400;500;600;700&family=Ubuntu:wght@300;400;500;700&display=swap');

body { font-family: 'Ubuntu', sans-serif; font-weight: 400; font-size: 16px; margin: 2rem; }
h1 { font-family: 'Saira', sans-serif; font-weight: 400; font-size: 36px; }
h2 { font-family: 'Saira', sans-serif; font-weight: 400; font-size: 26px; }
h3 { font-family: 'Saira', sans-serif; font-weight: 400; font-size: 22px; }
#mapa { height: 420px; margin: 1rem 0; }
details.negocio { border: 1px solid #ddd; border-radius: 4px; padding: 0.5rem 1rem; margin: 0.5rem 0; }
details.negocio summary { font-family: 'Saira', sans-serif; font-size: 18px; cursor: pointer; }
details.negocio img { float: right; margin-left: 1rem; }
.formulario label { display: inline-block; margin-right: 1.5rem; }
.error { background: #fdecea; border: 1px solid #f5c6cb; padding: 0.75rem 1rem; border-radius: 4px; }
.aviso { background: #fff8e1; border: 1px solid #ffe082; padding: 0.75rem 1rem; border-radius: 4px; }
"#;

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn page(body: &str, with_map: bool) -> String {
    let leaflet = if with_map {
        "<link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.css\">\n\
         <script src=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.js\"></script>\n"
    } else {
        ""
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Extractor de Información de Negocios</title>\n\
         {leaflet}<style>{PAGE_CSS}</style>\n</head>\n<body>\n\
         <h1>Extractor de Información de Negocios</h1>\n{body}\n</body>\n</html>\n"
    )
}

fn form(city: &str, business: &str, radius: u32) -> String {
    format!(
        "<form class=\"formulario\" action=\"/buscar\" method=\"get\">\n\
         <label>Ciudad: <input type=\"text\" name=\"ciudad\" value=\"{}\"></label>\n\
         <label>Tipo de Negocio: <input type=\"text\" name=\"tipo\" value=\"{}\"></label>\n\
         <label>Radio (metros): <input type=\"number\" name=\"radio\" value=\"{}\" min=\"{}\" max=\"{}\"></label>\n\
         <button type=\"submit\">Buscar</button>\n\
         <a href=\"/limpiar\"><button type=\"button\">Limpiar Resultados</button></a>\n\
         </form>\n",
        escape_html(city),
        escape_html(business),
        radius,
        MIN_RADIUS_METERS,
        MAX_RADIUS_METERS
    )
}

fn harvest_line(listing: &Listing) -> String {
    match &listing.harvest {
        HarvestOutcome::NoWebsite => {
            "No se pudo buscar (sitio web no disponible)".to_string()
        }
        HarvestOutcome::FetchFailed => "Ninguno".to_string(),
        HarvestOutcome::Found(emails) if emails.is_empty() => "Ninguno".to_string(),
        HarvestOutcome::Found(emails) => {
            let mut sorted: Vec<_> = emails.iter().map(|e| escape_html(e)).collect();
            sorted.sort();
            sorted.join(", ")
        }
    }
}

fn listing_panel(listing: &Listing) -> String {
    let details = &listing.details;

    let address = details.address.as_deref().unwrap_or(NOT_AVAILABLE);
    let rating = details
        .rating
        .map(|r| r.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let website = details.website_url.as_deref().unwrap_or(NOT_AVAILABLE);

    let photo = listing
        .photo_url
        .as_deref()
        .map(|url| {
            format!(
                "<img src=\"{}\" width=\"150\" alt=\"Foto del negocio\">\n",
                escape_html(url)
            )
        })
        .unwrap_or_default();

    format!(
        "<details class=\"negocio\">\n<summary>{}</summary>\n{photo}\
         <p><strong>Dirección:</strong> {}</p>\n\
         <p><strong>Valoración:</strong> {}</p>\n\
         <p><strong>Sitio Web:</strong> {}</p>\n\
         <p><strong>Correos encontrados:</strong> {}</p>\n\
         </details>\n",
        escape_html(details.display_name()),
        escape_html(address),
        escape_html(&rating),
        escape_html(website),
        harvest_line(listing)
    )
}

fn report_section(report: &SearchReport) -> String {
    let markers: Vec<_> = report
        .listings
        .iter()
        .map(|listing| (listing.details.location, listing.details.display_name().to_string()))
        .collect();

    let mut section = map::leaflet_map(report.center, &markers);
    for listing in &report.listings {
        section.push_str(&listing_panel(listing));
    }
    section
}

pub fn error_box(message: &str) -> String {
    format!("<div class=\"error\">{}</div>\n", escape_html(message))
}

pub fn warning_box(message: &str) -> String {
    format!("<div class=\"aviso\">{}</div>\n", escape_html(message))
}

/// The landing page: just the form with the configured defaults.
pub fn index_page(search: &SearchConfig) -> String {
    let body = form(
        &search.default_city,
        &search.default_business,
        search.default_radius_meters,
    );
    page(&body, false)
}

pub fn warning_page(search: &SearchConfig, message: &str) -> String {
    let body = format!(
        "{}{}",
        form(
            &search.default_city,
            &search.default_business,
            search.default_radius_meters
        ),
        warning_box(message)
    );
    page(&body, false)
}

/// Outcome page for one search invocation: form pre-filled with what was
/// asked, then either the inline error or the map plus panels. A failed
/// search renders no map markup at all.
pub fn search_page(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Failed { query, message } => {
            let body = format!(
                "{}{}",
                form(&query.city, &query.business_keyword, query.radius_meters),
                error_box(message)
            );
            page(&body, false)
        }
        SearchOutcome::Rendered(report) => {
            let body = format!(
                "{}{}",
                form(
                    &report.query.city,
                    &report.query.business_keyword,
                    report.query.radius_meters
                ),
                report_section(report)
            );
            page(&body, true)
        }
    }
}
