use actix_web::HttpResponse;
use serde_json::json;

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Todo API is running" }))
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
