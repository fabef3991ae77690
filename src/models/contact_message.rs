//! Contact message model
//!
//! Messages submitted through the public contact form and triaged from the
//! admin inbox.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A message submitted through the contact form.
///
/// Status carries no enforced transition graph: it is a triage label the
/// admin can set to any value at any time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    /// Unique identifier
    pub id: i64,
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Sender phone (optional)
    pub phone: Option<String>,
    /// Message subject
    pub subject: String,
    /// Message body
    pub message: String,
    /// Triage status
    pub status: MessageStatus,
    /// Triage priority
    pub priority: MessagePriority,
    /// Admin reply body, if one was sent
    pub reply: Option<String>,
    /// When the reply was sent
    pub replied_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl ContactMessage {
    /// Create a new ContactMessage from creation input.
    ///
    /// The ID will be set to 0 and should be assigned by the database.
    pub fn new(input: CreateContactMessageInput) -> Self {
        let now = Utc::now();
        Self {
            id: 0, // Will be set by the database
            name: input.name,
            email: input.email,
            phone: input.phone,
            subject: input.subject,
            message: input.message,
            status: MessageStatus::New,
            priority: input.priority.unwrap_or_default(),
            reply: None,
            replied_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the message has been replied to
    pub fn has_reply(&self) -> bool {
        self.reply.is_some()
    }
}

/// Triage status of a contact message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    New,
    Read,
    Replied,
    Archived,
}

impl MessageStatus {
    /// Storage vocabulary (uppercase) written to the database
    pub fn as_db_str(&self) -> &'static str {
        match self {
            MessageStatus::New => "NEW",
            MessageStatus::Read => "READ",
            MessageStatus::Replied => "REPLIED",
            MessageStatus::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageStatus::New => write!(f, "new"),
            MessageStatus::Read => write!(f, "read"),
            MessageStatus::Replied => write!(f, "replied"),
            MessageStatus::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for MessageStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(MessageStatus::New),
            "read" => Ok(MessageStatus::Read),
            "replied" => Ok(MessageStatus::Replied),
            "archived" => Ok(MessageStatus::Archived),
            _ => Err(anyhow::anyhow!("Invalid message status: {}", s)),
        }
    }
}

/// Triage priority of a contact message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessagePriority {
    Low,
    #[default]
    Medium,
    High,
}

impl MessagePriority {
    /// Storage vocabulary (uppercase) written to the database
    pub fn as_db_str(&self) -> &'static str {
        match self {
            MessagePriority::Low => "LOW",
            MessagePriority::Medium => "MEDIUM",
            MessagePriority::High => "HIGH",
        }
    }
}

impl fmt::Display for MessagePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessagePriority::Low => write!(f, "low"),
            MessagePriority::Medium => write!(f, "medium"),
            MessagePriority::High => write!(f, "high"),
        }
    }
}

impl FromStr for MessagePriority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(MessagePriority::Low),
            "medium" => Ok(MessagePriority::Medium),
            "high" => Ok(MessagePriority::High),
            _ => Err(anyhow::anyhow!("Invalid message priority: {}", s)),
        }
    }
}

/// Input for creating a contact message
#[derive(Debug, Clone)]
pub struct CreateContactMessageInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    /// Priority (defaults to medium)
    pub priority: Option<MessagePriority>,
}

/// Input for updating a contact message
#[derive(Debug, Clone, Default)]
pub struct UpdateContactMessageInput {
    pub status: Option<MessageStatus>,
    pub priority: Option<MessagePriority>,
    /// Setting a reply also stamps `replied_at`
    pub reply: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_starts_unread() {
        let message = ContactMessage::new(CreateContactMessageInput {
            name: "Jordan Smith".to_string(),
            email: "jordan@example.com".to_string(),
            phone: None,
            subject: "Pricing".to_string(),
            message: "What does the premium tier include?".to_string(),
            priority: None,
        });

        assert_eq!(message.status, MessageStatus::New);
        assert_eq!(message.priority, MessagePriority::Medium);
        assert!(!message.has_reply());
    }

    #[test]
    fn test_status_vocabulary() {
        assert_eq!(MessageStatus::Archived.to_string(), "archived");
        assert_eq!(MessageStatus::Archived.as_db_str(), "ARCHIVED");
        assert_eq!(
            "REPLIED".parse::<MessageStatus>().unwrap(),
            MessageStatus::Replied
        );
    }

    #[test]
    fn test_priority_vocabulary() {
        assert_eq!(MessagePriority::High.as_db_str(), "HIGH");
        assert_eq!(
            "high".parse::<MessagePriority>().unwrap(),
            MessagePriority::High
        );
        assert!("urgent".parse::<MessagePriority>().is_err());
    }
}
