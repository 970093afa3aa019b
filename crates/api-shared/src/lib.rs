//! # API Shared
//!
//! Shared definitions for the Carefinder HTTP surface.
//!
//! Contains:
//! - Request/response bodies (`dto` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Domain records (`Hospital`, `RankedFacility`, `MessageAnnotation`) are serialised as-is
//! from `carefinder-core`; this crate only adds the envelopes around them.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
