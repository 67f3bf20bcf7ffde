use thiserror::Error;

/// Errors raised while interpreting strings and indices handed over by the host.
///
/// The per-frame pass never produces these; they only surface at the boundary
/// where host data is converted into the core's types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown handedness: '{0}'")]
    UnknownHandedness(String),

    #[error("unknown controller event: '{0}'")]
    UnknownEvent(String),

    #[error("no controller at index {0}")]
    UnknownController(usize),
}
