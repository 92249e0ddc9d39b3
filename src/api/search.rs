// src/api/search.rs - Operator-facing pages
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::{get, uri, State};

use crate::models::SearchQuery;
use crate::pipeline;
use crate::render;
use crate::server::ServerState;

#[get("/")]
pub async fn index(state: &State<ServerState>) -> RawHtml<String> {
    RawHtml(render::index_page(&state.config.search))
}

/// Runs the whole pipeline inline: the request blocks until every detail
/// fetch and harvest of the invocation has finished.
#[get("/buscar?<ciudad>&<tipo>&<radio>")]
pub async fn buscar(
    state: &State<ServerState>,
    ciudad: Option<String>,
    tipo: Option<String>,
    radio: Option<u32>,
) -> RawHtml<String> {
    let search = &state.config.search;

    let city = ciudad
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| search.default_city.clone());

    let business = tipo.unwrap_or_default();
    if business.trim().is_empty() {
        return RawHtml(render::warning_page(
            search,
            "Por favor, ingrese un tipo de negocio.",
        ));
    }

    let radius = radio.unwrap_or(search.default_radius_meters);
    let query = SearchQuery::new(city, business, radius);

    let outcome = pipeline::run_search(query, state.backend.as_ref(), state.finder.as_ref()).await;
    RawHtml(render::search_page(&outcome))
}

#[get("/limpiar")]
pub fn limpiar() -> Redirect {
    Redirect::to(uri!(index))
}
