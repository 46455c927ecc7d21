use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModemError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid input size: {0}")]
    InvalidInputSize(String),

    #[error("under-determined least-squares system ({rows} rows for {cols} unknowns)")]
    Underdetermined { rows: usize, cols: usize },

    #[error("singular least-squares system")]
    SingularSystem,

    #[error("waveform peak {0} exceeds the unit amplitude bound")]
    AmplitudeOverflow(f64),

    #[error("channel estimate diverged: {0}")]
    EstimateDiverged(String),
}

pub type Result<T> = std::result::Result<T, ModemError>;
