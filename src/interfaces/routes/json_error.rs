use actix_web::{
    web,
    http::StatusCode,
    ResponseError,
    HttpResponse,
    error::{JsonPayloadError, PathError, QueryPayloadError},
};
use serde_json::json;

/// Turns extractor failures (malformed body, non-numeric id, bad query string)
/// into the same `{"error": ...}` shape the handlers use.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ExtractError::from(err).into()
    }));
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        ExtractError::from(err).into()
    }));
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ExtractError::from(err).into()
    }));
}

#[derive(Debug)]
pub struct ExtractError {
    message: String,
    status: StatusCode
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for ExtractError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status).json(json!({ "error": self.message }))
    }
}

impl From<JsonPayloadError> for ExtractError {
    fn from(err: JsonPayloadError) -> Self {
        let status = match err {
            JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        ExtractError {
            message: format!("JSON payload error: {}", err),
            status,
        }
    }
}

impl From<PathError> for ExtractError {
    fn from(err: PathError) -> Self {
        ExtractError {
            message: format!("Invalid path parameter: {}", err),
            status: StatusCode::BAD_REQUEST,
        }
    }
}

impl From<QueryPayloadError> for ExtractError {
    fn from(err: QueryPayloadError) -> Self {
        ExtractError {
            message: format!("Invalid query string: {}", err),
            status: StatusCode::BAD_REQUEST,
        }
    }
}
