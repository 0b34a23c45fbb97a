use actix_web::web;

use crate::{constants::API_PREFIX, handlers::{home::home, system::health_check}, Store};

mod json_error;
mod students;
mod teachers;

pub fn configure_routes<R: Store>(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.route("/health", web::get().to(health_check::<R>));

    cfg.service(
        web::scope(API_PREFIX)
            .configure(students::config_routes::<R>)
            .configure(teachers::config_routes::<R>)
    );

    cfg.configure(json_error::config_routes);
}
