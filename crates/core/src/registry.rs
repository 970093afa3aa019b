//! Registry of self-registered hospitals.
//!
//! Hospitals sign up with their contact details, GPS position and the services they offer.
//! The registry keeps them in insertion order in memory and can optionally mirror its contents
//! to a JSON file so a restart does not lose registrations.
//!
//! ## Pure Data Operations
//!
//! This module contains **only** data operations. Locking, HTTP status mapping and deciding
//! when to persist belong to the callers in `api-rest` and the CLI.

use crate::constants::{
    MIN_ESTABLISHED_YEAR, PHONE_DIGITS, PINCODE_DIGITS, TAG_AMBULANCE, TAG_EMERGENCY,
};
use crate::facility::{Facility, OpenStatus, RankedFacility};
use crate::geo::{rank_nearby, Coordinate};
use crate::services::service_by_id;
use crate::{CoreError, CoreResult};
use carefinder_types::{exact_digits, EmailAddress, NonEmptyText, TextError};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum HospitalType {
    Government,
    Private,
    #[serde(rename = "Semi-Government")]
    SemiGovernment,
    Trust,
}

/// Registration payload, as submitted by a hospital administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewHospital {
    pub hospital_name: String,
    pub registration_number: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub latitude: f64,
    pub longitude: f64,
    pub established_year: i32,
    pub hospital_type: HospitalType,
    pub total_beds: u32,
    pub specializations: String,
    #[serde(default)]
    pub emergency_available: bool,
    #[serde(default)]
    pub ambulance_available: bool,
    #[serde(default)]
    pub available_services: Vec<String>,
    pub admin_name: String,
    pub admin_position: String,
}

/// A registered hospital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: Uuid,
    pub hospital_name: String,
    pub registration_number: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub established_year: i32,
    pub hospital_type: HospitalType,
    pub total_beds: u32,
    pub specializations: String,
    pub emergency_available: bool,
    pub ambulance_available: bool,
    pub available_services: Vec<String>,
    pub admin_name: String,
    pub admin_position: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hospital {
    /// Single-line postal address: street, city, state and pincode.
    pub fn full_address(&self) -> String {
        [
            self.address.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.pincode.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Projects the registry record into the facility shape the ranker works on.
    pub fn to_facility(&self) -> Facility {
        let mut facility = Facility::new(
            self.id.to_string(),
            self.hospital_name.clone(),
            self.full_address(),
            self.coordinate,
        );

        facility.phone = Some(self.phone.clone());
        facility.emergency = self.emergency_available;
        facility.open_status = if self.emergency_available {
            OpenStatus::Open
        } else {
            OpenStatus::Unknown
        };

        if self.emergency_available {
            facility.tags.push(TAG_EMERGENCY.to_string());
        }
        if self.ambulance_available {
            facility.tags.push(TAG_AMBULANCE.to_string());
        }
        facility.tags.extend(
            self.available_services
                .iter()
                .filter_map(|id| service_by_id(id))
                .map(|service| service.name.to_string()),
        );

        facility
    }
}

#[derive(Debug, Default, Clone)]
pub struct HospitalRegistry {
    hospitals: Vec<Hospital>,
}

impl HospitalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a registry previously written by [`save_to_path`](Self::save_to_path).
    ///
    /// A missing file yields an empty registry; the file is created on the first save.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::FileRead` if the file exists but cannot be read and
    /// `CoreError::Deserialization` if its contents are not a valid hospital list.
    pub fn load_from_path(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            tracing::info!(
                "registry file {} does not exist yet, starting empty",
                path.display()
            );
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path).map_err(CoreError::FileRead)?;
        let hospitals: Vec<Hospital> =
            serde_json::from_str(&contents).map_err(CoreError::Deserialization)?;

        tracing::info!(
            "loaded {} hospitals from {}",
            hospitals.len(),
            path.display()
        );
        Ok(Self { hospitals })
    }

    /// Writes the registry as pretty-printed JSON.
    ///
    /// The data is written to a sibling temporary file first and then renamed over `path`, so
    /// readers never observe a half-written file.
    pub fn save_to_path(&self, path: &Path) -> CoreResult<()> {
        let json =
            serde_json::to_string_pretty(&self.hospitals).map_err(CoreError::Serialization)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(CoreError::FileWrite)?;
        }

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(CoreError::FileWrite)?;
        fs::rename(&tmp, path).map_err(CoreError::FileWrite)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.hospitals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
    }

    /// All registered hospitals, in registration order.
    pub fn list(&self) -> &[Hospital] {
        &self.hospitals
    }

    pub fn get(&self, id: Uuid) -> CoreResult<&Hospital> {
        self.hospitals
            .iter()
            .find(|h| h.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("hospital {id}")))
    }

    /// Looks up a hospital by the textual form of its id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` for a malformed id and `CoreError::NotFound` when no
    /// hospital has it.
    pub fn get_by_str(&self, id: &str) -> CoreResult<&Hospital> {
        self.get(parse_id(id)?)
    }

    /// Validates and stores a new hospital.
    ///
    /// # Errors
    ///
    /// - `CoreError::Validation` listing every field problem found.
    /// - `CoreError::Duplicate` if another hospital already uses the email, registration
    ///   number or name.
    pub fn register(&mut self, new: NewHospital) -> CoreResult<Hospital> {
        let hospital = validate_new_hospital(new, Utc::now())?;

        if let Some(message) = self.duplicate_message(&hospital) {
            return Err(CoreError::Duplicate(message));
        }

        tracing::info!(
            id = %hospital.id,
            name = %hospital.hospital_name,
            "hospital registered"
        );
        self.hospitals.push(hospital.clone());
        Ok(hospital)
    }

    /// Activates or deactivates a hospital. Inactive hospitals are left out of nearby searches.
    pub fn set_active(&mut self, id: Uuid, active: bool) -> CoreResult<&Hospital> {
        let hospital = self
            .hospitals
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("hospital {id}")))?;

        hospital.is_active = active;
        hospital.updated_at = Utc::now();
        tracing::info!(id = %hospital.id, active, "hospital activation changed");
        Ok(hospital)
    }

    /// [`set_active`](Self::set_active) for an id still in its textual form.
    ///
    /// # Errors
    ///
    /// Same as [`get_by_str`](Self::get_by_str).
    pub fn set_active_by_str(&mut self, id: &str, active: bool) -> CoreResult<&Hospital> {
        self.set_active(parse_id(id)?, active)
    }

    /// Active hospitals within `radius_km` of `origin`, nearest first.
    pub fn nearby(&self, origin: Coordinate, radius_km: f64) -> CoreResult<Vec<RankedFacility>> {
        let candidates = self
            .hospitals
            .iter()
            .filter(|h| h.is_active)
            .map(Hospital::to_facility);
        rank_nearby(origin, candidates, radius_km)
    }

    // When one existing record clashes on several fields, the name clash is reported.
    fn duplicate_message(&self, candidate: &Hospital) -> Option<String> {
        let existing = self.hospitals.iter().find(|h| {
            h.email == candidate.email
                || h.registration_number == candidate.registration_number
                || h.hospital_name == candidate.hospital_name
        })?;

        let mut message = "Hospital already registered";
        if existing.email == candidate.email {
            message = "Email already registered";
        }
        if existing.registration_number == candidate.registration_number {
            message = "Registration number already exists";
        }
        if existing.hospital_name == candidate.hospital_name {
            message = "Hospital name already exists";
        }
        Some(message.to_string())
    }
}

fn parse_id(id: &str) -> CoreResult<Uuid> {
    Uuid::parse_str(id.trim())
        .map_err(|e| CoreError::InvalidInput(format!("invalid hospital id: {e}")))
}

fn required(value: &str, message: &str, errors: &mut Vec<String>) -> String {
    match NonEmptyText::new(value) {
        Ok(text) => text.into_inner(),
        Err(_) => {
            errors.push(message.to_string());
            String::new()
        }
    }
}

fn validate_new_hospital(new: NewHospital, now: DateTime<Utc>) -> CoreResult<Hospital> {
    let mut errors = Vec::new();

    let hospital_name = required(&new.hospital_name, "Hospital name is required", &mut errors);
    let registration_number = required(
        &new.registration_number,
        "Registration number is required",
        &mut errors,
    );

    let current_year = now.year();
    if !(MIN_ESTABLISHED_YEAR..=current_year).contains(&new.established_year) {
        errors.push(format!(
            "Established year must be between {MIN_ESTABLISHED_YEAR} and {current_year}"
        ));
    }

    let email = match EmailAddress::new(&new.email) {
        Ok(email) => email.as_str().to_string(),
        Err(TextError::Empty) => {
            errors.push("Email is required".into());
            String::new()
        }
        Err(e) => {
            errors.push(e.to_string());
            String::new()
        }
    };

    let phone = exact_digits(&new.phone, PHONE_DIGITS).unwrap_or_else(|_| {
        errors.push(format!(
            "Please enter a valid {PHONE_DIGITS}-digit phone number"
        ));
        String::new()
    });

    let address = required(&new.address, "Address is required", &mut errors);
    let city = required(&new.city, "City is required", &mut errors);
    let state = required(&new.state, "State is required", &mut errors);

    let pincode = exact_digits(&new.pincode, PINCODE_DIGITS).unwrap_or_else(|_| {
        errors.push(format!("Please enter a valid {PINCODE_DIGITS}-digit pincode"));
        String::new()
    });

    let coordinate = match Coordinate::new(new.latitude, new.longitude) {
        Ok(coordinate) => Some(coordinate),
        Err(_) => {
            errors.push(
                "Latitude and longitude must be valid coordinates for location services".into(),
            );
            None
        }
    };

    if new.total_beds < 1 {
        errors.push("Total beds must be at least 1".into());
    }

    let specializations = required(
        &new.specializations,
        "Specializations are required",
        &mut errors,
    );

    let mut available_services: Vec<String> = Vec::with_capacity(new.available_services.len());
    for id in new.available_services {
        let id = id.trim().to_string();
        if service_by_id(&id).is_none() {
            errors.push(format!("Unknown medical service: {id}"));
        } else if !available_services.contains(&id) {
            available_services.push(id);
        }
    }

    let admin_name = required(&new.admin_name, "Admin name is required", &mut errors);
    let admin_position = required(&new.admin_position, "Admin position is required", &mut errors);

    let Some(coordinate) = coordinate.filter(|_| errors.is_empty()) else {
        return Err(CoreError::Validation(errors));
    };

    Ok(Hospital {
        id: Uuid::new_v4(),
        hospital_name,
        registration_number,
        email,
        phone,
        address,
        city,
        state,
        pincode,
        coordinate,
        established_year: new.established_year,
        hospital_type: new.hospital_type,
        total_beds: new.total_beds,
        specializations,
        emergency_available: new.emergency_available,
        ambulance_available: new.ambulance_available,
        available_services,
        admin_name,
        admin_position,
        is_active: true,
        is_verified: false,
        created_at: now,
        updated_at: now,
    })
}
