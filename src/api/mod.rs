//! HTTP surface of the document engine.

pub mod handlers;

use actix_web::web;

pub use handlers::{ContractTypeInfo, GenerateDocumentsRequest, HealthResponse};

/// Register the `/api` routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handlers::json_error_handler))
        .service(
            web::resource("/contracts/types").route(web::get().to(handlers::list_contract_types)),
        )
        .service(
            web::resource("/contracts/{contract_type}/documents")
                .route(web::post().to(handlers::generate_documents)),
        );
}
