//! Legacy wire shape translation
//!
//! The admin frontend predates this service and consumes a fixed "legacy"
//! shape: lowercase enum values, RFC 3339 date strings, and service prices
//! nested under a single `price` object. Storage uses uppercase enum values
//! and three flat price columns.
//!
//! Everything here is pure and synchronous. This layer performs no
//! validation: missing or malformed values fall back to defaults (0, empty
//! string, `None`) rather than erroring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Service;

/// Nested price tiers as the frontend sees them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PriceTiers {
    #[serde(default)]
    pub basic: f64,
    #[serde(default)]
    pub premium: f64,
    #[serde(default)]
    pub enterprise: f64,
}

impl PriceTiers {
    /// Flatten into the storage columns (basic, premium, enterprise)
    pub fn flatten(&self) -> (f64, f64, f64) {
        (self.basic, self.premium, self.enterprise)
    }

    /// Nest the storage columns back into the wire object
    pub fn from_flat(basic: f64, premium: f64, enterprise: f64) -> Self {
        Self {
            basic,
            premium,
            enterprise,
        }
    }
}

/// Service in its legacy wire shape
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServiceWire {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub category: String,
    /// Lowercase status label ("active" / "inactive" / "draft")
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub price: PriceTiers,
    #[serde(default)]
    pub popularity: i64,
    #[serde(default)]
    pub clients: i64,
    #[serde(default)]
    pub rating: f64,
    /// RFC 3339 timestamp string
    #[serde(default)]
    pub created_at: String,
    /// RFC 3339 timestamp string
    #[serde(default)]
    pub updated_at: String,
}

/// Convert a storage record into the legacy wire shape.
pub fn service_to_legacy(service: &Service) -> ServiceWire {
    ServiceWire {
        id: service.id,
        title: service.title.clone(),
        description: service.description.clone(),
        long_description: service.long_description.clone(),
        icon: service.icon.clone(),
        features: service.features.clone(),
        category: service.category.clone(),
        status: service.status.to_string(),
        price: PriceTiers::from_flat(
            service.basic_price,
            service.premium_price,
            service.enterprise_price,
        ),
        popularity: service.popularity,
        clients: service.clients,
        rating: service.rating,
        created_at: to_wire_date(service.created_at),
        updated_at: to_wire_date(service.updated_at),
    }
}

/// Convert a legacy wire shape back into a storage record.
///
/// Unrecognized status labels fall back to the default rather than erroring;
/// unparseable dates become "now".
pub fn service_from_legacy(wire: &ServiceWire) -> Service {
    let (basic_price, premium_price, enterprise_price) = wire.price.flatten();
    Service {
        id: wire.id,
        title: wire.title.clone(),
        description: wire.description.clone(),
        long_description: wire.long_description.clone(),
        icon: wire.icon.clone(),
        features: wire.features.clone(),
        category: wire.category.clone(),
        status: wire.status.parse().unwrap_or_default(),
        basic_price,
        premium_price,
        enterprise_price,
        popularity: wire.popularity,
        clients: wire.clients,
        rating: wire.rating,
        created_at: parse_wire_date(&wire.created_at),
        updated_at: parse_wire_date(&wire.updated_at),
    }
}

/// Format a timestamp for the wire (RFC 3339)
pub fn to_wire_date(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Parse a wire timestamp, falling back to "now" for malformed input
pub fn parse_wire_date(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateServiceInput, ServiceStatus};

    fn sample_service() -> Service {
        Service::new(CreateServiceInput {
            title: "AI Audits".to_string(),
            description: "Model risk reviews".to_string(),
            long_description: None,
            icon: Some("shield".to_string()),
            features: vec!["Report".to_string()],
            category: "consulting".to_string(),
            status: Some(ServiceStatus::Active),
            basic_price: 5000.0,
            premium_price: 15000.0,
            enterprise_price: 50000.0,
        })
    }

    #[test]
    fn test_status_round_trip_is_identity() {
        for status in ["active", "inactive", "draft"] {
            let parsed: ServiceStatus = status.parse().unwrap();
            assert_eq!(parsed.to_string(), status);
        }
    }

    #[test]
    fn test_price_round_trip_is_identity() {
        let price = PriceTiers::from_flat(5000.0, 15000.0, 50000.0);
        let (b, p, e) = price.flatten();
        assert_eq!(PriceTiers::from_flat(b, p, e), price);
    }

    #[test]
    fn test_service_round_trip_preserves_fields() {
        let mut service = sample_service();
        service.id = 7;

        let wire = service_to_legacy(&service);
        assert_eq!(wire.status, "active");
        assert_eq!(wire.price.basic, 5000.0);
        assert_eq!(wire.price.enterprise, 50000.0);

        let back = service_from_legacy(&wire);
        assert_eq!(back.id, 7);
        assert_eq!(back.status, ServiceStatus::Active);
        assert_eq!(back.basic_price, 5000.0);
        assert_eq!(back.premium_price, 15000.0);
        assert_eq!(back.created_at, service.created_at);
    }

    #[test]
    fn test_malformed_input_falls_back_to_defaults() {
        let wire = ServiceWire {
            status: "published".to_string(),
            created_at: "yesterday-ish".to_string(),
            ..Default::default()
        };

        let service = service_from_legacy(&wire);
        assert_eq!(service.status, ServiceStatus::Draft);
        assert_eq!(service.basic_price, 0.0);
        assert_eq!(service.title, "");
    }

    #[test]
    fn test_wire_shape_serializes_nested_price() {
        let wire = service_to_legacy(&sample_service());
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(value["price"]["basic"], 5000.0);
        assert_eq!(value["status"], "active");
    }

    #[test]
    fn test_wire_shape_tolerates_missing_fields() {
        let wire: ServiceWire = serde_json::from_str(r#"{"title":"Bare"}"#).unwrap();
        assert_eq!(wire.title, "Bare");
        assert_eq!(wire.price, PriceTiers::default());
        assert_eq!(wire.status, "");
    }
}
