//! Contact info model
//!
//! Typed key-value entries (address, phone, email, hours) displayed on the
//! contact page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A contact info display entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    /// Unique identifier
    pub id: i64,
    /// Entry kind
    pub kind: ContactInfoKind,
    /// Display title
    pub title: String,
    /// Display value (the address, number, email or hours text)
    pub value: String,
    /// Icon identifier used by the frontend
    pub icon: String,
    /// Whether the entry is shown
    pub active: bool,
    /// Display order on the contact page
    pub display_order: i32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl ContactInfo {
    /// Create a new ContactInfo entry; the ID is assigned by the database.
    pub fn new(input: CreateContactInfoInput) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            kind: input.kind,
            title: input.title,
            value: input.value,
            icon: input.icon.unwrap_or_default(),
            active: input.active.unwrap_or(true),
            display_order: input.display_order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Kind of contact info entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactInfoKind {
    Address,
    Phone,
    Email,
    Hours,
}

impl ContactInfoKind {
    /// Storage vocabulary (uppercase) written to the database
    pub fn as_db_str(&self) -> &'static str {
        match self {
            ContactInfoKind::Address => "ADDRESS",
            ContactInfoKind::Phone => "PHONE",
            ContactInfoKind::Email => "EMAIL",
            ContactInfoKind::Hours => "HOURS",
        }
    }
}

impl fmt::Display for ContactInfoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactInfoKind::Address => write!(f, "address"),
            ContactInfoKind::Phone => write!(f, "phone"),
            ContactInfoKind::Email => write!(f, "email"),
            ContactInfoKind::Hours => write!(f, "hours"),
        }
    }
}

impl FromStr for ContactInfoKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "address" => Ok(ContactInfoKind::Address),
            "phone" => Ok(ContactInfoKind::Phone),
            "email" => Ok(ContactInfoKind::Email),
            "hours" => Ok(ContactInfoKind::Hours),
            _ => Err(anyhow::anyhow!("Invalid contact info kind: {}", s)),
        }
    }
}

/// Input for creating a contact info entry
#[derive(Debug, Clone)]
pub struct CreateContactInfoInput {
    pub kind: ContactInfoKind,
    pub title: String,
    pub value: String,
    pub icon: Option<String>,
    pub active: Option<bool>,
    pub display_order: Option<i32>,
}

/// Input for updating a contact info entry
#[derive(Debug, Clone, Default)]
pub struct UpdateContactInfoInput {
    pub kind: Option<ContactInfoKind>,
    pub title: Option<String>,
    pub value: Option<String>,
    pub icon: Option<String>,
    pub active: Option<bool>,
    pub display_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_defaults() {
        let entry = ContactInfo::new(CreateContactInfoInput {
            kind: ContactInfoKind::Email,
            title: "Email us".to_string(),
            value: "hello@assetmagnets.com".to_string(),
            icon: None,
            active: None,
            display_order: None,
        });

        assert!(entry.active);
        assert_eq!(entry.display_order, 0);
        assert_eq!(entry.icon, "");
    }

    #[test]
    fn test_kind_vocabulary() {
        assert_eq!(ContactInfoKind::Hours.as_db_str(), "HOURS");
        assert_eq!(ContactInfoKind::Hours.to_string(), "hours");
        assert_eq!(
            "ADDRESS".parse::<ContactInfoKind>().unwrap(),
            ContactInfoKind::Address
        );
        assert!("fax".parse::<ContactInfoKind>().is_err());
    }
}
