use crate::domain::errors::DomainError;

const CHECK_VIOLATION: &str = "275";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some(CHECK_VIOLATION) {
                return DomainError::Validation("check constraint violated".into());
            }
            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
