//! HTTP handlers and route configuration.

mod blog;
mod health;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Extractor failures are client errors carrying the parser message
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );

    cfg.service(web::scope("/api").route("/health", web::get().to(health::health_check)))
        .service(
            web::scope("/blog")
                .route("", web::post().to(blog::create))
                .route("/", web::post().to(blog::create))
                .route("", web::get().to(blog::get_all))
                .route("/", web::get().to(blog::get_all))
                // Must precede `/{id}`
                .route("/search", web::get().to(blog::find))
                .route("/{id}", web::get().to(blog::get_by_id))
                .route("/{id}", web::put().to(blog::update))
                .route("/{id}", web::delete().to(blog::delete)),
        );
}
