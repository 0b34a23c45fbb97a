use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

/// Prefix shared by every resource route.
pub const API_PREFIX: &str = "/api/v1";

/// Process start, fixed the first time it is read. Forced in `main` before serving.
pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);
