mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{association, derivation, entities, kind, use_cases, validation};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, telemetry};

use kind::TeacherKind;
use repositories::{
    person::{HealthRepository, PersonRepository, StudentRepository},
    sqlx_repo::SqlxPersonRepo,
};
use use_cases::person::{StudentHandler, TeacherHandler};

/// A store able to back every route: both kinds of person plus a health probe.
pub trait Store:
    StudentRepository + PersonRepository<TeacherKind> + HealthRepository + Clone + 'static
{
}

impl<T> Store for T where
    T: StudentRepository + PersonRepository<TeacherKind> + HealthRepository + Clone + 'static
{
}

pub struct AppState<R: Store = SqlxPersonRepo> {
    pub student_handler: StudentHandler<R>,
    pub teacher_handler: TeacherHandler<R>,
    pub store: R,
}

impl<R: Store> AppState<R> {
    pub fn new(store: R) -> Self {
        AppState {
            student_handler: StudentHandler::new(store.clone()),
            teacher_handler: TeacherHandler::new(store.clone()),
            store,
        }
    }
}

impl AppState {
    pub fn from_pool(pool: sqlx::PgPool) -> Self {
        AppState::new(SqlxPersonRepo::new(pool))
    }
}
