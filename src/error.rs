use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("tick rate {0} is outside of the supported range [15, 120]")]
    InvalidTickRate(f32),
    #[error("a car with id {0} is already in the arena")]
    DuplicateCar(u64),
    #[error("no car with id {0} exists")]
    InvalidCarId(u64),
    #[error("no arena geometry is available for {0}")]
    MissingGeometry(&'static str),
    #[error("invalid {what} value {value} in stream")]
    InvalidData { what: &'static str, value: u64 },
    #[error("expected state for {expected} boost pads, got {actual}")]
    BoostPadMismatch { expected: usize, actual: usize },
    #[error("expected state for {expected} dropshot tiles per team, got {actual}")]
    TileStateMismatch { expected: usize, actual: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Report a broken arena invariant
///
/// Logs the error and evaluates to `Err`, or panics when built with the `strict` feature
macro_rules! invariant_violation {
    ($err:expr) => {{
        let err: $crate::ArenaError = $err;
        if cfg!(feature = "strict") {
            panic!("{err}");
        }

        log::error!("{err}");
        Err(err)
    }};
}

pub(crate) use invariant_violation;
