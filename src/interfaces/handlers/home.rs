use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "School registry API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "resources": ["/api/v1/students", "/api/v1/teachers"],
        "health": "/health"
    }))
}
