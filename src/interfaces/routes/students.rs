use actix_web::web;

use crate::{handlers::students, Store};

pub fn config_routes<R: Store>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/students")
            .service(
                web::resource("")
                    .route(web::post().to(students::create_student::<R>))
                    .route(web::get().to(students::get_all_students::<R>))
            )
            .service(
                web::resource("/by-teacher")
                    .route(web::get().to(students::get_students_by_teacher_name::<R>))
            )
            .service(
                web::resource("/name/{name}")
                    .route(web::get().to(students::get_student_by_name::<R>))
            )
            .service(
                web::resource("/{student_id}")
                    .route(web::get().to(students::get_student_by_id::<R>))
                    .route(web::put().to(students::update_student::<R>))
                    .route(web::delete().to(students::delete_student::<R>))
            )
            .service(
                web::resource("/{student_id}/teachers")
                    .route(web::get().to(students::get_student_teachers::<R>))
            )
    );
}
