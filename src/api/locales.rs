//! Static locale files under `/locales`.

use std::path::Path;

use actix_files::Files;
use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;
use actix_web::web;

/// `Cache-Control` value for every locale file.
pub const LOCALE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Serve `dir` under `/locales` with long-lived cache headers.
pub fn configure_routes(cfg: &mut web::ServiceConfig, dir: &Path) {
    cfg.service(
        web::scope("/locales")
            .wrap(DefaultHeaders::new().add((header::CACHE_CONTROL, LOCALE_CACHE_CONTROL)))
            .service(Files::new("", dir).use_etag(true).use_last_modified(true)),
    );
}
