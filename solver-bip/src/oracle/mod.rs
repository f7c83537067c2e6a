//! LP relaxation oracle: the contract the search needs and a `microlp` backend.

mod backend;
mod microlp_backend;
mod relaxation;

pub use backend::{RelaxationOracle, RelaxationResult, RelaxationStatus};
pub use microlp_backend::MicrolpOracle;
pub use relaxation::{LpRelaxation, LpRow};
