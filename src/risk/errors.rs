use thiserror::Error;

/// Failures of the one legitimately fallible settlement step: the
/// outbound processor call. Rate and IP lookup failures never surface as
/// errors; they degrade to fallback values inside their services.
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// The processor answered and said no. Carries its reason verbatim.
    #[error("payment declined: {reason}")]
    Declined { reason: String },

    /// The processor could not be reached or answered with garbage.
    /// Treated like a decline for attempt accounting, with a distinct
    /// message for display.
    #[error("payment processor unreachable: {message}")]
    Unreachable { message: String },
}
