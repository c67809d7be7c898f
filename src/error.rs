use crate::{circuit::{CircuitError, SenseAmpConfigBuilderError}, tech::TechError};

#[derive(Debug, thiserror::Error)]
pub enum MlSenseError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Circuit(#[from] CircuitError),

    #[error(transparent)]
    Tech(#[from] TechError),

    #[error(transparent)]
    Config(#[from] SenseAmpConfigBuilderError),

    #[error("{0}")]
    Message(String),

    #[error("{msg} >> {err}")]
    Context { msg: String, err: Box<dyn std::error::Error + Send + Sync> }
}

impl MlSenseError {
    /// Whether the error stands for a contract violation the caller is expected to abort on
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Circuit(e) => e.is_fatal(),
            _ => false,
        }
    }
}

pub type MlSenseResult<T> = Result<T, MlSenseError>;

pub trait ErrorContext<T> {
    fn context<S: Into<String>>(self, msg: S) -> MlSenseResult<T>;
    fn with_context<S: Into<String>>(self, f: impl Fn() -> S) -> MlSenseResult<T>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ErrorContext<T> for Result<T, E> {
    fn context<S: Into<String>>(self, msg: S) -> MlSenseResult<T> {
        self.map_err(|e| MlSenseError::Context { msg: msg.into(), err: Box::new(e) })
    }

    fn with_context<S: Into<String>>(self, f: impl Fn() -> S) -> MlSenseResult<T> {
        let msg = f();
        self.context(msg)
    }
}
