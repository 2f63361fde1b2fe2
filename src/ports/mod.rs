//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and the persistence backend.

mod store;

pub use store::{KeyValueStore, KEY_LAST_AQI, KEY_LAST_SYMPTOMS, KEY_SELECTED_CITY};
