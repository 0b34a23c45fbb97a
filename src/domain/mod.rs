pub mod association;
pub mod derivation;
pub mod entities;
pub mod kind;
pub mod use_cases;
pub mod validation;
