//! Global office model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An AssetMagnets office location shown on the about/contact pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalOffice {
    /// Unique identifier
    pub id: i64,
    /// City name
    pub city: String,
    /// Country name
    pub country: String,
    /// Street address
    pub address: String,
    /// Postal code (optional)
    pub postal_code: Option<String>,
    /// Office phone (optional)
    pub phone: Option<String>,
    /// Office email (optional)
    pub email: Option<String>,
    /// Map latitude (optional)
    pub latitude: Option<f64>,
    /// Map longitude (optional)
    pub longitude: Option<f64>,
    /// Whether this office is the headquarters
    pub is_headquarters: bool,
    /// Whether the office is shown
    pub active: bool,
    /// Free-form working hours text
    pub working_hours: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl GlobalOffice {
    /// Create a new GlobalOffice; the ID is assigned by the database.
    pub fn new(input: CreateGlobalOfficeInput) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            city: input.city,
            country: input.country,
            address: input.address,
            postal_code: input.postal_code,
            phone: input.phone,
            email: input.email,
            latitude: input.latitude,
            longitude: input.longitude,
            is_headquarters: input.is_headquarters.unwrap_or(false),
            active: input.active.unwrap_or(true),
            working_hours: input.working_hours,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the office has map coordinates
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Input for creating a global office
#[derive(Debug, Clone)]
pub struct CreateGlobalOfficeInput {
    pub city: String,
    pub country: String,
    pub address: String,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_headquarters: Option<bool>,
    pub active: Option<bool>,
    pub working_hours: Option<String>,
}

/// Input for updating a global office
#[derive(Debug, Clone, Default)]
pub struct UpdateGlobalOfficeInput {
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub latitude: Option<Option<f64>>,
    pub longitude: Option<Option<f64>>,
    pub is_headquarters: Option<bool>,
    pub active: Option<bool>,
    pub working_hours: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_office_defaults() {
        let office = GlobalOffice::new(CreateGlobalOfficeInput {
            city: "Berlin".to_string(),
            country: "Germany".to_string(),
            address: "Torstrasse 1".to_string(),
            postal_code: Some("10119".to_string()),
            phone: None,
            email: None,
            latitude: None,
            longitude: None,
            is_headquarters: None,
            active: None,
            working_hours: None,
        });

        assert!(!office.is_headquarters);
        assert!(office.active);
        assert!(!office.has_coordinates());
    }

    #[test]
    fn test_has_coordinates_requires_both() {
        let mut office = GlobalOffice::new(CreateGlobalOfficeInput {
            city: "Tokyo".to_string(),
            country: "Japan".to_string(),
            address: "Shibuya 1-1".to_string(),
            postal_code: None,
            phone: None,
            email: None,
            latitude: Some(35.66),
            longitude: None,
            is_headquarters: Some(true),
            active: Some(true),
            working_hours: None,
        });

        assert!(!office.has_coordinates());
        office.longitude = Some(139.7);
        assert!(office.has_coordinates());
    }
}
