// src/server/routes.rs
pub mod health {
    use rocket::{get, serde::json::Json};
    use serde_json::{json, Value};

    #[get("/health")]
    pub async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "service": "business-extractor"
        }))
    }

    #[get("/")]
    pub async fn index() -> Json<Value> {
        Json(json!({
            "name": "Extractor de Información de Negocios",
            "version": "0.1.0",
            "description": "Búsqueda de negocios cercanos con extracción de correos de contacto",
            "endpoints": {
                "health": "/api/health",
                "buscar": "/buscar?ciudad=&tipo=&radio=",
                "limpiar": "/limpiar"
            }
        }))
    }
}
