use std::error::Error;
use std::fmt::{Display, Formatter};

/// What went wrong, coarse enough for the surrounding firmware to pick a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A vector slot was addressed outside of its arity.
    IndexOutOfRange,
    /// A state change was requested without what it requires (ie. arming without home).
    InvalidPrecondition,
    /// Internal state holds a value it can never legally reach. Not recoverable.
    InternalInconsistency,
    /// Parameters could not be read or did not validate.
    Config,
    Io,
    Other,
}

/// Common Helm error type.
#[derive(Debug)]
pub struct HelmError {
    kind: ErrorKind,
    message: String,
    context: Option<String>,
}

impl Display for HelmError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let context_str = match &self.context {
            Some(c) => c.as_str(),
            None => "None",
        };
        write!(
            f,
            "{:?}: {}\n   context:{}",
            self.kind, self.message, context_str
        )
    }
}

impl Error for HelmError {}

impl From<&str> for HelmError {
    fn from(s: &str) -> HelmError {
        HelmError::new(ErrorKind::Other, s)
    }
}

impl From<String> for HelmError {
    fn from(s: String) -> HelmError {
        HelmError::new(ErrorKind::Other, s)
    }
}

impl From<std::io::Error> for HelmError {
    fn from(e: std::io::Error) -> HelmError {
        HelmError::new(ErrorKind::Io, e.to_string())
    }
}

impl HelmError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        HelmError {
            kind,
            message: message.into(),
            context: None,
        }
    }

    pub fn index_out_of_range(index: usize, count: usize) -> Self {
        HelmError::new(
            ErrorKind::IndexOutOfRange,
            format!("index must be < {} but it was {}", count, index),
        )
    }

    pub fn add_context(mut self, context: &str) -> HelmError {
        self.context = Some(context.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// The control loop must not keep ticking past a fatal error.
    pub fn is_fatal(&self) -> bool {
        self.kind == ErrorKind::InternalInconsistency
    }
}

// Generic Result type for helm.
pub type HelmResult<T> = Result<T, HelmError>;

/// Board side of the RC receiver.
/// Angular channels read in [-1, 1], throttle in [0, 1], switches on their own scale.
pub trait InputPins {
    fn read_channel(&self, channel: u16) -> f32;
}

/// Best effort text channel toward the ground station or a console.
/// Callers on the control path ignore the result; implementations must not block.
pub trait CommLink {
    fn log(&self, line: &str) -> HelmResult<()>;
}

impl<P: InputPins + ?Sized> InputPins for &P {
    fn read_channel(&self, channel: u16) -> f32 {
        (**self).read_channel(channel)
    }
}

impl<L: CommLink + ?Sized> CommLink for &L {
    fn log(&self, line: &str) -> HelmResult<()> {
        (**self).log(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_context() {
        let err = HelmError::new(ErrorKind::Config, "bad tolerance");
        assert_eq!(err.to_string(), "Config: bad tolerance\n   context:None");
    }

    #[test]
    fn test_add_context() {
        let err = HelmError::from("boom").add_context("while reading params.ron");
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(err.context(), Some("while reading params.ron"));
        assert!(err.to_string().ends_with("context:while reading params.ron"));
    }

    #[test]
    fn test_index_out_of_range() {
        let err = HelmError::index_out_of_range(4, 4);
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(err.message(), "index must be < 4 but it was 4");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_only_inconsistency_is_fatal() {
        assert!(HelmError::new(ErrorKind::InternalInconsistency, "x").is_fatal());
        assert!(!HelmError::new(ErrorKind::InvalidPrecondition, "x").is_fatal());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: HelmError = io.into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
