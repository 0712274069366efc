use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;

use super::error::{AppError, Res};

pub struct Success;
impl Success {
    pub fn ok<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Ok().json(body))
    }
    /// `200 {"message": ...}`
    pub fn message(message: &str) -> Res<impl Responder> {
        Self::ok(serde_json::json!({ "message": message }))
    }
}

/// JSON extractor config that reports malformed bodies as `{"error": ...}` with 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request body: {}", err)).into()
    })
}
