use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum DatabaseError {
    /// A unique index rejected the write. `detail` carries the store's message
    /// and detail text, which name the offending column.
    #[error("Unique constraint violated: {detail}")]
    UniqueViolation { detail: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    Unauthorized(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl DatabaseError {
    /// True when the violated index is on `column`, matched by the `Key (column)=`
    /// token or a `<table>_<column>_key` constraint name. Values quoted in the
    /// detail never count.
    pub fn is_unique_violation_on(&self, column: &str) -> bool {
        match self {
            DatabaseError::UniqueViolation { detail } => {
                detail.contains(&format!("({})=", column))
                    || detail.contains(&format!("_{}_key\"", column))
            }
            _ => false,
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        AppError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(detail: &str) -> DatabaseError {
        DatabaseError::UniqueViolation { detail: detail.to_string() }
    }

    #[test]
    fn test_unique_violation_matches_key_token() {
        let err = violation("Key (crm)=(53455) already exists.");
        assert!(err.is_unique_violation_on("crm"));
        assert!(!err.is_unique_violation_on("email"));
    }

    #[test]
    fn test_unique_violation_matches_constraint_name() {
        let err = violation("duplicate key value violates unique constraint \"doctors_email_key\"");
        assert!(err.is_unique_violation_on("email"));
        assert!(!err.is_unique_violation_on("crm"));
    }

    #[test]
    fn test_unique_violation_ignores_column_name_inside_value() {
        let err = violation(
            "duplicate key value violates unique constraint \"doctors_email_key\" \
             Key (email)=(crm.office@voll.med) already exists.",
        );
        assert!(!err.is_unique_violation_on("crm"));
        assert!(err.is_unique_violation_on("email"));
    }

    #[test]
    fn test_other_errors_are_not_unique_violations() {
        assert!(!DatabaseError::NotFound("doctor 1".to_string()).is_unique_violation_on("crm"));
    }
}
