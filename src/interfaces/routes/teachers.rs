use actix_web::web;

use crate::{handlers::teachers, Store};

pub fn config_routes<R: Store>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/teachers")
            .service(
                web::resource("")
                    .route(web::post().to(teachers::create_teacher::<R>))
                    .route(web::get().to(teachers::get_all_teachers::<R>))
            )
            .service(
                web::resource("/name/{name}")
                    .route(web::get().to(teachers::get_teacher_by_name::<R>))
            )
            .service(
                web::resource("/{teacher_id}")
                    .route(web::get().to(teachers::get_teacher_by_id::<R>))
                    .route(web::put().to(teachers::update_teacher::<R>))
                    .route(web::delete().to(teachers::delete_teacher::<R>))
            )
            .service(
                web::resource("/{teacher_id}/students")
                    .route(web::get().to(teachers::get_teacher_students::<R>))
            )
    );
}
