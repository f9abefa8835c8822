//! Core types for NeoIWL

mod band;
mod factor;
mod result;
mod error;
mod state;
mod reason;
mod output;

pub use band::WeightBand;
pub use factor::{
    Applicability, EnvironmentalFactor, FactorKind, FactorSelection,
    FEVER, HUMIDIFIED_ENV, PHOTOTHERAPY, RADIANT_WARMER,
};
pub use result::{CalculationResult, TraceStep};
pub use error::{ControllerError, TableError, ValidationError};
pub use state::ControllerPhase;
pub use reason::ReasonCode;
pub use output::Snapshot;
