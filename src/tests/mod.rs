//! Cross-container tests.
//!
//! These cases exercise the shared map contract through every container at
//! once: equality, content hashing and rendering must agree between them.


pub mod support;
