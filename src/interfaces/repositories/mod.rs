pub mod person;
pub mod sqlx_repo;
