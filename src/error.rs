/// Error Types Module
///
/// Failure taxonomy for the ETL stages. Each stage owns one error kind;
/// every kind is fatal to the run and propagates to the caller unretried.
use thiserror::Error;

/// Failure while fetching match history from the remote API.
#[derive(Debug, Error)]
pub enum RemoteFetchError {
    #[error("match history request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("match history endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("match history response was not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),
}

/// The raw payload did not have the expected shape.
#[derive(Debug, Error)]
pub enum MalformedPayloadError {
    #[error("expected a JSON array of match ids, got {got}")]
    NotAnArray { got: &'static str },
    #[error("match id at index {index} is not a string")]
    NonStringId { index: usize },
}

/// Failure during the full-table replace.
///
/// The replace runs in one transaction, so whichever phase failed, the
/// table is left in its pre-run state.
#[derive(Debug, Error)]
#[error("match table replace failed during {phase}: {source}")]
pub struct LoadError {
    pub phase: LoadPhase,
    #[source]
    pub source: sqlx::Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Begin,
    Clear,
    Insert,
    Commit,
}

impl std::fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadPhase::Begin => write!(f, "begin"),
            LoadPhase::Clear => write!(f, "clear"),
            LoadPhase::Insert => write!(f, "insert"),
            LoadPhase::Commit => write!(f, "commit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_payload_messages() {
        let err = MalformedPayloadError::NotAnArray { got: "object" };
        assert_eq!(err.to_string(), "expected a JSON array of match ids, got object");

        let err = MalformedPayloadError::NonStringId { index: 3 };
        assert_eq!(err.to_string(), "match id at index 3 is not a string");
    }

    #[test]
    fn test_load_error_names_the_phase() {
        let err = LoadError { phase: LoadPhase::Clear, source: sqlx::Error::PoolClosed };
        assert!(err.to_string().contains("during clear"));
    }
}
