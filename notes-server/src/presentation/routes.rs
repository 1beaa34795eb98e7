use actix_web::web;
use site_core::presentation::handlers::auth;
use site_core::presentation::server::health;

use crate::presentation::handlers::notes;

/// Every notes-site route, auth pages included.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(auth::scope())
        .service(notes::home)
        .service(notes::list)
        .service(notes::add_page)
        .service(notes::add)
        .service(notes::success)
        .service(notes::detail)
        .service(notes::edit_page)
        .service(notes::edit)
        .service(notes::delete_page)
        .service(notes::delete);
}
