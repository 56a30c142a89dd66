//! Simulator errors.

use thiserror::Error;

/// A caller violated a simulator precondition. The tick was not applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("input tick went backwards: last accepted {last}, got {got}")]
    TickRegression { last: u64, got: u64 },

    #[error("non-finite value in input field `{field}`")]
    NonFinite { field: &'static str },
}
