//! Domain Layer
//!
//! Pure deployment logic without direct I/O.
//!
//! ## Structure
//!
//! - `entities/` - Task definitions, sites and their decorators
//! - `value_objects/` - Immutable value types (publish context, options, hashes)
//! - `services/` - Domain services (tree synchronization)
//! - `ports/` - Interface definitions for infrastructure
//!
//! All I/O goes through the traits in `ports/`.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
