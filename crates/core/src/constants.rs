//! Constants used throughout the Carefinder core crate.

/// Mean Earth radius used by the Haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Decimal places kept on computed distances.
pub const DISTANCE_DECIMALS: i32 = 2;

/// Search radius used when a caller does not supply one (5000 m).
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Upper bound accepted by the HTTP surface unless overridden.
pub const DEFAULT_MAX_RADIUS_KM: f64 = 50.0;

/// Earliest accepted `established_year` for a registered hospital.
pub const MIN_ESTABLISHED_YEAR: i32 = 1800;

/// Digits in a registered hospital's phone number.
pub const PHONE_DIGITS: usize = 10;

/// Digits in a registered hospital's postal code.
pub const PINCODE_DIGITS: usize = 6;

/// Placeholder address shown when a source has no usable address.
pub const ADDRESS_UNAVAILABLE: &str = "Address not available";

/// Content of the system message the chat UI inserts to show the hospital finder.
pub const HOSPITAL_FINDER_MARKER: &str = "hospital-finder-prompt";

/// Facility tag for sites offering emergency care.
pub const TAG_EMERGENCY: &str = "Emergency Services";

/// Facility tag for registry hospitals running an ambulance service.
pub const TAG_AMBULANCE: &str = "Ambulance Available";
