// src/server/mod.rs
use std::sync::Arc;

use rocket::{routes, Build, Rocket};

use crate::api::search;
use crate::config::Config;
use crate::harvester::EmailFinder;
use crate::maps::PlacesBackend;

pub mod routes;

pub struct ServerState {
    pub config: Config,
    pub backend: Arc<dyn PlacesBackend>,
    pub finder: Arc<dyn EmailFinder>,
}

pub fn build_rocket(state: ServerState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount(
            "/",
            routes![search::index, search::buscar, search::limpiar],
        )
        .mount(
            "/api",
            routes![routes::health::health_check, routes::health::index],
        )
}
