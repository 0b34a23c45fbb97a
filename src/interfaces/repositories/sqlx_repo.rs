use sqlx::PgPool;

/// PostgreSQL-backed store for both kinds of person and their links.
#[derive(Clone)]
pub struct SqlxPersonRepo {
    pub pool: PgPool,
}

impl SqlxPersonRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxPersonRepo { pool }
    }
}
