//! Service model
//!
//! This module defines the Service entity: an offering shown on the public
//! services page and managed from the admin screens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Service entity representing an AI-services offering.
///
/// Prices are stored as three flat tier columns; the wire shape nests them
/// under a single `price` object (see the `shape` module).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    /// Unique identifier
    pub id: i64,
    /// Display title
    pub title: String,
    /// Short description shown in listings
    pub description: String,
    /// Long description shown on the detail page
    pub long_description: String,
    /// Icon identifier used by the frontend
    pub icon: String,
    /// Feature bullet points
    pub features: Vec<String>,
    /// Category label
    pub category: String,
    /// Publication status
    pub status: ServiceStatus,
    /// Basic tier price (non-negative)
    pub basic_price: f64,
    /// Premium tier price (non-negative)
    pub premium_price: f64,
    /// Enterprise tier price (non-negative)
    pub enterprise_price: f64,
    /// Popularity score
    pub popularity: i64,
    /// Number of clients using the service
    pub clients: i64,
    /// Average rating
    pub rating: f64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Service {
    /// Create a new Service from creation input.
    ///
    /// The ID will be set to 0 and should be assigned by the database.
    pub fn new(input: CreateServiceInput) -> Self {
        let now = Utc::now();
        Self {
            id: 0, // Will be set by the database
            title: input.title,
            description: input.description,
            long_description: input.long_description.unwrap_or_default(),
            icon: input.icon.unwrap_or_default(),
            features: input.features,
            category: input.category,
            status: input.status.unwrap_or_default(),
            basic_price: input.basic_price,
            premium_price: input.premium_price,
            enterprise_price: input.enterprise_price,
            popularity: 0,
            clients: 0,
            rating: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the service is visible on the public site
    pub fn is_active(&self) -> bool {
        self.status == ServiceStatus::Active
    }
}

/// Service publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Visible on the public site
    Active,
    /// Hidden from the public site
    Inactive,
    /// Work in progress, admin-only
    #[default]
    Draft,
}

impl ServiceStatus {
    /// Storage vocabulary (uppercase) written to the database
    pub fn as_db_str(&self) -> &'static str {
        match self {
            ServiceStatus::Active => "ACTIVE",
            ServiceStatus::Inactive => "INACTIVE",
            ServiceStatus::Draft => "DRAFT",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceStatus::Active => write!(f, "active"),
            ServiceStatus::Inactive => write!(f, "inactive"),
            ServiceStatus::Draft => write!(f, "draft"),
        }
    }
}

impl FromStr for ServiceStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ServiceStatus::Active),
            "inactive" => Ok(ServiceStatus::Inactive),
            "draft" => Ok(ServiceStatus::Draft),
            _ => Err(anyhow::anyhow!("Invalid service status: {}", s)),
        }
    }
}

/// Input for creating a new service
#[derive(Debug, Clone)]
pub struct CreateServiceInput {
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub icon: Option<String>,
    pub features: Vec<String>,
    pub category: String,
    /// Publication status (defaults to draft)
    pub status: Option<ServiceStatus>,
    pub basic_price: f64,
    pub premium_price: f64,
    pub enterprise_price: f64,
}

/// Input for updating a service
#[derive(Debug, Clone, Default)]
pub struct UpdateServiceInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub icon: Option<String>,
    pub features: Option<Vec<String>>,
    pub category: Option<String>,
    pub status: Option<ServiceStatus>,
    pub basic_price: Option<f64>,
    pub premium_price: Option<f64>,
    pub enterprise_price: Option<f64>,
    pub popularity: Option<i64>,
    pub clients: Option<i64>,
    pub rating: Option<f64>,
}
