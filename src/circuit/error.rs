#[derive(Debug, thiserror::Error)]
pub enum CircuitError {
    #[error("'{0}' requires initialization first")]
    NotInitialized(&'static str),

    #[error("no width or height assigned for '{0}'")]
    MissingAreaConstraint(&'static str),

    #[error("circuit arguments invalid: {0}")]
    InvalidArguments(String),
}

impl CircuitError {
    pub fn invalid_arg<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Misuse after which the geometry of the circuit is meaningless
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingAreaConstraint(_))
    }
}

#[macro_export]
macro_rules! invalid_arg {
    ($msg:literal $(,)?) => {
        Err($crate::circuit::CircuitError::InvalidArguments(format!($msg).into()))?
    };
    ($err:expr $(,)?) => {
        Err($crate::circuit::CircuitError::InvalidArguments(format!($err).into()))?
    };
    ($fmt:expr, $($arg:tt)*) => {
        Err($crate::circuit::CircuitError::InvalidArguments(format!($fmt, $($arg)*).into()))?
    };
}
