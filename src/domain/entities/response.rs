use serde::Serialize;

use crate::entities::person::PersonId;

/// Why a mutating operation did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Invalid,
    NotFound,
}

/// Outcome of create/update/delete. Failures that are part of the normal
/// contract (invalid input, missing target) come back as this value with
/// `success == false` rather than as an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PersonId>,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl GeneralResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        GeneralResponse {
            success: true,
            message: message.into(),
            id: None,
            failure: None,
        }
    }

    pub fn created(id: PersonId, message: impl Into<String>) -> Self {
        GeneralResponse {
            id: Some(id),
            ..GeneralResponse::ok(message)
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        GeneralResponse {
            success: false,
            message: message.into(),
            id: None,
            failure: Some(FailureKind::Invalid),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        GeneralResponse {
            failure: Some(FailureKind::NotFound),
            ..GeneralResponse::invalid(message)
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.failure == Some(FailureKind::NotFound)
    }
}
