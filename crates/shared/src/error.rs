#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("catalog has no meals to pick from")]
    EmptyCatalog,

    #[error("No day labels found in header row")]
    NoDayLabelsFound,

    #[error("row {row}: {reason}")]
    MalformedImportRow { row: usize, reason: String },

    #[error("meal {meal} references unknown side {side}")]
    UnresolvedSideReference { meal: String, side: String },

    #[error("cannot {action} a slot that is {state}")]
    InvalidTransition { state: String, action: String },

    #[error("side {side} is not compatible with meal {meal}")]
    SideNotCompatible { meal: String, side: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<chrono::ParseError> for Error {
    fn from(value: chrono::ParseError) -> Self {
        Self::Unknown(value.into())
    }
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Server(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Server(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Server(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(id: &str) -> Result<()> {
        bail!("slot {id} was not created");
    }

    #[test]
    fn test_bail_returns_server_error() {
        match create("01K") {
            Err(Error::Server(message)) => assert_eq!(message, "slot 01K was not created"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
