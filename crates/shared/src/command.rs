#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} not found")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! not_found {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::NotFound(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::NotFound(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(dir: &str) -> Result<()> {
        not_found!("meals.json in {}", dir);
    }

    #[test]
    fn not_found_formats_subject() {
        let err = missing("data").unwrap_err();
        assert_eq!(err.to_string(), "meals.json in data not found");
    }

    #[test]
    fn json_errors_convert() {
        let err: Error = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }
}
