// core.rs splits the engine into the chain itself and its validation rules.
pub mod chain;
pub mod validation;

pub use chain::*;
pub use validation::*;
