//! # Carefinder Core
//!
//! Core logic for the Carefinder hospital finder and triage assistant:
//! - Great-circle distance and nearby-facility ranking ([`geo`])
//! - Keyword-based critical-symptom classification ([`symptoms`]) and per-message chat
//!   annotation ([`chat`])
//! - The hospital registry and the medical service catalogue it validates against
//!
//! **No API concerns**: HTTP servers, upstream map providers and request handling belong in
//! `api-rest` and `carefinder-providers`.

pub mod chat;
pub mod config;
pub mod constants;
pub mod error;
pub mod facility;
pub mod geo;
pub mod registry;
pub mod services;
pub mod symptoms;
pub mod validation;

pub use carefinder_types::NonEmptyText;
pub use chat::{annotate, ChatMessage, MessageAnnotation, Role};
pub use config::CoreConfig;
pub use constants::DEFAULT_RADIUS_KM;
pub use error::{CoreError, CoreResult};
pub use facility::{Facility, OpenStatus, RankedFacility};
pub use geo::{distance_km, haversine_km, rank_nearby, rank_nearby_raw, Coordinate};
pub use registry::{Hospital, HospitalRegistry, HospitalType, NewHospital};
pub use symptoms::{advice_for, classify, is_emergency, is_urgent, Classification, Severity};
