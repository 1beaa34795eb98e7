use actix_web::web;
use site_core::presentation::handlers::auth;
use site_core::presentation::server::health;

use crate::presentation::handlers::{comments, news};

/// Every news-site route, auth pages included.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(auth::scope())
        .service(news::home)
        .service(news::detail)
        .service(news::create_comment)
        .service(comments::edit_page)
        .service(comments::edit)
        .service(comments::delete_page)
        .service(comments::delete);
}
