pub mod aircraft;
pub mod snapshot;
pub mod state_vector;
