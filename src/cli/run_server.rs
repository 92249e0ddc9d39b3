use crate::cli::cli::Result;
use crate::models::CliApp;
use crate::server::{build_rocket, ServerState};

impl CliApp {
    pub async fn run_server(&self) -> Result<()> {
        let state = ServerState {
            config: self.config.clone(),
            backend: self.backend.clone(),
            finder: self.finder.clone(),
        };

        println!("🌐 Servidor disponible en http://127.0.0.1:8000 (Ctrl+C para detener)");
        let _rocket = build_rocket(state).launch().await?;

        Ok(())
    }
}
