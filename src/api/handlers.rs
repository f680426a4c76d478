use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::documents::{Bundle, BundlePayload, ContractRecord, ContractType, GeneratorError, OutputMode};
use crate::state::AppState;
use crate::ErrorResponse;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GenerateDocumentsRequest {
    /// Flat form data; every field is optional.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub record: ContractRecord,
    /// Selected add-on keys, e.g. `["protocol"]`.
    #[serde(default)]
    pub addons: Vec<String>,
    /// `combined` (default) or `separate`, case-insensitive.
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractTypeInfo {
    pub id: String,
    pub name: String,
    pub addons: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
}

#[utoipa::path(
    context_path = "/api",
    tag = "Contract Documents",
    post,
    path = "/contracts/{contract_type}/documents",
    request_body = GenerateDocumentsRequest,
    params(
        ("contract_type" = String, Path, description = "full-sublease, room-sublease or garage-lease")
    ),
    responses(
        (status = 200, description = "Combined PDF (application/pdf) or separate documents", body = BundlePayload),
        (status = 400, description = "Unknown contract type, unknown mode or malformed body", body = ErrorResponse),
        (status = 502, description = "Rendering backend failed", body = ErrorResponse)
    )
)]
pub async fn generate_documents(
    path: web::Path<String>,
    req: web::Json<GenerateDocumentsRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let contract_type = path.into_inner();
    let req = req.into_inner();

    let mode = match req.mode.as_deref().map(str::parse::<OutputMode>).transpose() {
        Ok(mode) => mode.unwrap_or_default(),
        Err(e) => return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e.to_string())),
    };

    match state
        .bundler
        .bundle(&contract_type, &req.record, &req.addons, mode)
        .await
    {
        Ok(Bundle::Combined(document)) => HttpResponse::Ok()
            .content_type(document.content_type)
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(document.filename.clone())],
            })
            .body(document.pdf),
        Ok(bundle) => HttpResponse::Ok().json(bundle.into_payload()),
        Err(e) if e.is_invalid_input() => {
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e.to_string()))
        }
        Err(e @ GeneratorError::Render { .. }) => {
            HttpResponse::BadGateway().json(ErrorResponse::new("RenderFailed", &e.to_string()))
        }
        Err(e) => HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string())),
    }
}

/// Malformed request bodies answer with the JSON error shape instead of
/// actix's plain-text default.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected request body: {}", err);
    let response = HttpResponse::BadRequest().json(ErrorResponse::bad_request(&err.to_string()));
    InternalError::from_response(err, response).into()
}

#[utoipa::path(
    context_path = "/api",
    tag = "Contract Documents",
    get,
    path = "/contracts/types",
    responses(
        (status = 200, description = "Supported contract types", body = [ContractTypeInfo])
    )
)]
pub async fn list_contract_types() -> impl Responder {
    let types: Vec<ContractTypeInfo> = ContractType::ALL
        .iter()
        .map(|contract_type| ContractTypeInfo {
            id: contract_type.id().to_string(),
            name: contract_type.display_name().to_string(),
            addons: contract_type
                .supported_addons()
                .iter()
                .map(|addon| addon.key().to_string())
                .collect(),
        })
        .collect();
    HttpResponse::Ok().json(types)
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Contract Documents",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        backend: state.bundler.backend_name().to_string(),
    })
}
