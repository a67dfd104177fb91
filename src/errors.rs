/// The error type for archive writing operations.
///
/// Boxed internally so that `Result<T, Error>` stays a single pointer wide on
/// the happy path.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    /// Returns the kind of error that occurred.
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Consumes the error and returns its kind.
    #[inline]
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub(crate) fn duplicate_name(name: &str) -> Self {
        Error::from(ErrorKind::DuplicateName {
            name: name.to_string(),
        })
    }

    pub(crate) fn invalid_state(msg: &'static str) -> Self {
        Error::from(ErrorKind::InvalidState { msg })
    }

    pub(crate) fn oversized_field(field: &'static str, value: u64, max: u64) -> Self {
        Error::from(ErrorKind::OversizedField { field, value, max })
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(Box::new(kind))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error(Box::new(ErrorKind::Io(err)))
    }
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        match *err.0 {
            ErrorKind::Io(err) => err,
            kind => std::io::Error::new(std::io::ErrorKind::Other, Error::from(kind)),
        }
    }
}

/// The specific kind of error that occurred.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An entry with the same name has already been written to the archive.
    ///
    /// Names are compared byte for byte, case sensitively, after
    /// normalization. Permitting duplicates would keep the bytes
    /// deterministic but make the archive's contents path-ambiguous, so they
    /// are rejected before any bytes for the entry are emitted.
    #[error("duplicate entry name: {name:?}")]
    DuplicateName { name: String },

    /// An operation violated the writer's state machine, e.g. adding an
    /// entry after the archive was finalized, finalizing twice, or
    /// finalizing while an entry stream was abandoned mid-write.
    #[error("invalid writer state: {msg}")]
    InvalidState { msg: &'static str },

    /// The underlying compression codec signaled a fault. The operation is
    /// not retried; the archive must be discarded and rebuilt.
    #[error("compression codec fault: {msg}")]
    Codec { msg: String },

    /// A value does not fit the format field that must hold it, e.g. an
    /// entry name longer than 65,535 bytes.
    #[error("{field} of {value} exceeds the format maximum of {max}")]
    OversizedField {
        field: &'static str,
        value: u64,
        max: u64,
    },

    /// An I/O error from the output sink, propagated unchanged. The archive
    /// may already contain partial bytes for the failing entry and is
    /// unconditionally invalid.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
