//! Headless converter state for a front end to drive

pub mod state;

pub use state::ConverterState;
