//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod auth;
pub mod books;
pub mod error;
pub mod health;
pub mod schemas;
pub mod search;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

use crate::domain::Error;

pub use error::ApiResult;

/// JSON body settings that turn unreadable payloads into `400` domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| {
            Error::invalid_request(format!("malformed JSON body: {err}")).into()
        })
}

/// Query string settings that turn undecodable queries into `400` domain errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed query string: {err}")).into()
    })
}

/// Register every `/api` route on `cfg`.
///
/// Callers provide [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use bookshelf::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::scope("/auth")
                .service(accounts::register)
                .service(accounts::login),
        )
        .service(search::search_books)
        .service(books::list_saved_books)
        .service(books::save_book)
        .service(books::book_details)
        .service(books::delete_saved_book);
}
