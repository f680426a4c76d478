use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod api;
pub mod config;
pub mod documents;
pub mod state;

pub use crate::config::EngineConfig;
pub use crate::state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::generate_documents,
        crate::api::handlers::list_contract_types,
        crate::api::handlers::health
    ),
    components(
        schemas(
            api::handlers::GenerateDocumentsRequest,
            api::handlers::ContractTypeInfo,
            api::handlers::HealthResponse,
            documents::OutputMode,
            documents::BundlePayload,
            documents::DocumentPayload,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Contract Documents", description = "Rental contract document generation.")
    )
)]
pub struct ApiDoc;

/// Register every route of the service on an `App`.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").configure(api::config))
        .service(web::resource("/health").route(web::get().to(api::handlers::health)));
}

pub async fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EngineConfig::from_env().context("Invalid engine configuration")?;
    let app_state = web::Data::new(AppState::from_config(&config));
    log::info!(
        "Using {} rendering backend ({} x {} mm pages)",
        app_state.bundler.backend_name(),
        config.page.width_mm,
        config.page.height_mm
    );

    let prometheus = PrometheusMetricsBuilder::new("mietvertrag_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create Prometheus metrics middleware: {}", e))?;

    let bind_addr = (config.bind_addr.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind_addr.0, bind_addr.1);

    let allowed_origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![header::CONTENT_DISPOSITION])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .configure(configure_app)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(bind_addr)
    .context("Failed to bind server address")?
    .run()
    .await
    .context("Server terminated with an error")
}
