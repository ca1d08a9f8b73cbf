//! Error types for the importer

use np_common::NpError;
use np_server::db::DbError;
use np_server::ingest::IngestError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Database error: {0}. Check DATABASE_URL and that the database is running.")]
    Database(#[from] DbError),

    #[error(transparent)]
    Species(#[from] NpError),

    #[error("No database configured. Pass --database-url or set DATABASE_URL.")]
    MissingDatabaseUrl,

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<sqlx::Error> for ImportError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(DbError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_error_names_short_name() {
        let err = ImportError::from(NpError::UnknownSpecies("eco".to_string()));
        assert!(err.to_string().contains("eco"));
    }

    #[test]
    fn test_missing_database_url_mentions_flag() {
        assert!(ImportError::MissingDatabaseUrl
            .to_string()
            .contains("--database-url"));
    }
}
