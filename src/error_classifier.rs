use crate::backend::error::BackendError;
use log::LevelFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_backend_error(&self, error: &BackendError) -> LogLevel {
        match error {
            // Needs the operator to fix the configuration
            BackendError::Config(_) => LogLevel::Error,

            // Temporary server issues
            BackendError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,
            BackendError::Http { status, .. } if *status == 429 => LogLevel::Warn,

            // Wrong endpoint, wrong payload or a backend we do not understand
            BackendError::Http { .. } => LogLevel::Error,
            BackendError::Decode(_) => LogLevel::Error,
            BackendError::Rejected(_) => LogLevel::Error,

            // Network issues - usually temporary
            BackendError::Reqwest(_) => LogLevel::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::AddressError;

    fn http(status: u16) -> BackendError {
        BackendError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_classify_backend_error() {
        let classifier = ErrorClassifier::new();
        assert_eq!(
            classifier.classify_backend_error(&BackendError::Config(AddressError::Missing)),
            LogLevel::Error
        );
        assert_eq!(classifier.classify_backend_error(&http(502)), LogLevel::Warn);
        assert_eq!(classifier.classify_backend_error(&http(429)), LogLevel::Warn);
        assert_eq!(classifier.classify_backend_error(&http(404)), LogLevel::Error);
        assert_eq!(
            classifier.classify_backend_error(&BackendError::Decode("bad".into())),
            LogLevel::Error
        );
    }
}
