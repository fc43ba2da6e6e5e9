/// Route table
use actix_middleware::JwtAuthMiddleware;
use actix_web::{error::InternalError, web, HttpRequest, HttpResponse, ResponseError};
use crypto_core::TokenService;
use std::sync::Arc;

use crate::error::AppError;
use crate::handlers;

/// Register every route. `/tasks` sits behind the bearer token gate.
pub fn configure(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| payload_error(err, req)))
        .app_data(web::FormConfig::default().error_handler(|err, req| payload_error(err, req)))
        .route("/", web::get().to(handlers::root))
        .route("/health", web::get().to(handlers::health))
        .service(
            web::scope("/auth")
                .route("/signup", web::post().to(handlers::signup))
                .route("/login", web::post().to(handlers::login)),
        )
        .service(
            web::scope("/tasks")
                .wrap(JwtAuthMiddleware::new(tokens))
                .route("", web::post().to(handlers::create_task))
                .route("", web::get().to(handlers::list_tasks))
                .route("/{task_id}", web::get().to(handlers::get_task))
                .route("/{task_id}", web::put().to(handlers::update_task))
                .route("/{task_id}", web::patch().to(handlers::patch_task))
                .route("/{task_id}", web::delete().to(handlers::delete_task)),
        );
}

/// Malformed bodies get the same JSON error shape as everything else
fn payload_error<E: std::fmt::Display>(err: E, _req: &HttpRequest) -> actix_web::Error {
    let app_error = AppError::Validation(err.to_string());
    let response: HttpResponse = app_error.error_response();
    InternalError::from_response(err.to_string(), response).into()
}
