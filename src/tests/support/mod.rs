// Shared test support code.

pub mod hashers;

pub use hashers::{hash_landing_on, ClusterState, FixedState};
