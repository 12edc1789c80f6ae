use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum ShortlyError {
    Validation(String),
    NotFound(String),
    CodeCollision(String),
    CodeSpaceExhausted(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
}

impl ShortlyError {
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortlyError::Validation(_) => "Validation Error",
            ShortlyError::NotFound(_) => "Resource Not Found",
            ShortlyError::CodeCollision(_) => "Short Code Collision",
            ShortlyError::CodeSpaceExhausted(_) => "Short Code Allocation Failed",
            ShortlyError::DatabaseConfig(_) => "Database Configuration Error",
            ShortlyError::DatabaseConnection(_) => "Database Connection Error",
            ShortlyError::DatabaseOperation(_) => "Database Operation Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ShortlyError::Validation(msg) => msg,
            ShortlyError::NotFound(msg) => msg,
            ShortlyError::CodeCollision(msg) => msg,
            ShortlyError::CodeSpaceExhausted(msg) => msg,
            ShortlyError::DatabaseConfig(msg) => msg,
            ShortlyError::DatabaseConnection(msg) => msg,
            ShortlyError::DatabaseOperation(msg) => msg,
        }
    }

    /// HTTP status this error maps to at the API boundary.
    ///
    /// `CodeCollision` is an internal signal consumed by the service's
    /// retry loop; it only reaches the boundary if a caller bypasses
    /// the service, in which case it reads as a conflict.
    pub fn http_status(&self) -> StatusCode {
        match self {
            ShortlyError::Validation(_) => StatusCode::BAD_REQUEST,
            ShortlyError::NotFound(_) => StatusCode::NOT_FOUND,
            ShortlyError::CodeCollision(_) => StatusCode::CONFLICT,
            ShortlyError::CodeSpaceExhausted(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ShortlyError::DatabaseConfig(_)
            | ShortlyError::DatabaseConnection(_)
            | ShortlyError::DatabaseOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ShortlyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for ShortlyError {}

impl ShortlyError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortlyError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortlyError::NotFound(msg.into())
    }

    pub fn code_collision<T: Into<String>>(msg: T) -> Self {
        ShortlyError::CodeCollision(msg.into())
    }

    pub fn code_space_exhausted<T: Into<String>>(msg: T) -> Self {
        ShortlyError::CodeSpaceExhausted(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ShortlyError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ShortlyError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ShortlyError::DatabaseOperation(msg.into())
    }
}

impl From<sea_orm::DbErr> for ShortlyError {
    fn from(err: sea_orm::DbErr) -> Self {
        ShortlyError::DatabaseOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortlyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            ShortlyError::validation("bad url").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ShortlyError::not_found("missing").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ShortlyError::code_collision("dup").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ShortlyError::code_space_exhausted("gave up").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ShortlyError::database_operation("boom").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_includes_type_and_message() {
        let err = ShortlyError::validation("URL cannot be empty");
        assert_eq!(err.to_string(), "Validation Error: URL cannot be empty");
    }

    #[test]
    fn test_from_db_err() {
        let err: ShortlyError = sea_orm::DbErr::Custom("oops".to_string()).into();
        assert!(matches!(err, ShortlyError::DatabaseOperation(_)));
    }
}
