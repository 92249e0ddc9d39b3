use std::sync::Arc;

use crate::config::Config;
use crate::harvester::EmailHarvester;
use crate::maps::GoogleMapsClient;
use crate::models::CliApp;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone)]
pub enum MenuAction {
    SearchBusinesses,
    StartServer,
    Exit,
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuAction::SearchBusinesses => {
                write!(f, "🔎 Buscar negocios y extraer correos")
            }
            MenuAction::StartServer => write!(f, "🌐 Iniciar servidor web"),
            MenuAction::Exit => write!(f, "🚪 Salir"),
        }
    }
}

impl CliApp {
    pub async fn new(config: Config, api_key: String) -> Result<Self> {
        let backend = GoogleMapsClient::new(api_key, config.search.photo_max_width)?;
        let finder = EmailHarvester::new(&config.harvest)?;

        Ok(Self {
            config,
            backend: Arc::new(backend),
            finder: Arc::new(finder),
        })
    }
}
