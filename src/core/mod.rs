//! Core modules for NeoIWL

pub mod baseline;
pub mod catalog;
pub mod validator;
pub mod engine;
pub mod controller;
pub mod debounce;
pub mod logging;

pub use baseline::BaselineTable;
pub use catalog::FactorCatalog;
pub use validator::Validator;
pub use engine::{CalculationEngine, round2};
pub use controller::{
    ControllerConfig, ControllerEvent, DebounceRequest, DebounceToken, Outcome,
    ReactiveController, Transition,
};
pub use debounce::run_session;
pub use logging::init_logging;
