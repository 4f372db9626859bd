pub mod auth;

use actix_web::web;

pub use auth::{index, login, login_form, logout, register, register_form, welcome};

/// Registers every route of the login flow.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(register_form)
        .service(register)
        .service(login_form)
        .service(login)
        .service(welcome)
        .service(logout);
}
