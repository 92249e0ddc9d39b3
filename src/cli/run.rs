use dialoguer::{theme::ColorfulTheme, Select};

use crate::cli::cli::{MenuAction, Result};
use crate::models::CliApp;
use tracing::error;

impl CliApp {
    pub async fn run(&self) -> Result<()> {
        println!("\n🏢 Extractor de Información de Negocios");
        println!("═══════════════════════════════════════");

        loop {
            let actions = vec![
                MenuAction::SearchBusinesses,
                MenuAction::StartServer,
                MenuAction::Exit,
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("\nSelecciona una acción")
                .default(0)
                .items(&actions)
                .interact()?;

            match &actions[selection] {
                MenuAction::SearchBusinesses => {
                    if let Err(e) = self.run_search().await {
                        error!("La búsqueda falló: {}", e);
                    }
                }
                MenuAction::StartServer => {
                    if let Err(e) = self.run_server().await {
                        error!("El servidor falló: {}", e);
                    }
                }
                MenuAction::Exit => {
                    println!("\n👋 ¡Hasta pronto!");
                    break;
                }
            }
        }

        Ok(())
    }
}
