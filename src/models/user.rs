//! User model
//!
//! This module defines the User entity and related types. Users cover both
//! sides of the site: students and applicants on the public side, admins,
//! instructors and editors on the back-office side.
//!
//! Credentials and sessions are owned by the external auth provider; this
//! entity only carries identity and role data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User entity representing a registered account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// User role
    pub role: UserRole,
    /// Account status
    pub status: UserStatus,
    /// When the account was created
    pub joined_at: DateTime<Utc>,
    /// Last login timestamp, if the user has ever logged in
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new User from creation input.
    ///
    /// The ID will be set to 0 and should be assigned by the database.
    pub fn new(input: CreateUserInput) -> Self {
        Self {
            id: 0, // Will be set by the database
            name: input.name,
            email: input.email,
            role: input.role.unwrap_or_default(),
            status: UserStatus::Active,
            joined_at: Utc::now(),
            last_login_at: None,
        }
    }

    /// Check if the user is an administrator
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Check if the user can access the back-office screens
    pub fn is_staff(&self) -> bool {
        matches!(
            self.role,
            UserRole::Admin | UserRole::Instructor | UserRole::Editor
        )
    }

    /// Check if the account is active
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Administrator - full back-office access
    Admin,
    /// Student enrolled in courses
    #[default]
    Student,
    /// Job applicant
    Applicant,
    /// Course instructor
    Instructor,
    /// Content editor
    Editor,
}

impl UserRole {
    /// Storage vocabulary (uppercase) written to the database
    pub fn as_db_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Student => "STUDENT",
            UserRole::Applicant => "APPLICANT",
            UserRole::Instructor => "INSTRUCTOR",
            UserRole::Editor => "EDITOR",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Student => write!(f, "student"),
            UserRole::Applicant => write!(f, "applicant"),
            UserRole::Instructor => write!(f, "instructor"),
            UserRole::Editor => write!(f, "editor"),
        }
    }
}

impl FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "student" => Ok(UserRole::Student),
            "applicant" => Ok(UserRole::Applicant),
            "instructor" => Ok(UserRole::Instructor),
            "editor" => Ok(UserRole::Editor),
            _ => Err(anyhow::anyhow!("Invalid user role: {}", s)),
        }
    }
}

/// User account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Normal access
    #[default]
    Active,
    /// Deactivated account
    Inactive,
    /// Suspended by an admin
    Suspended,
}

impl UserStatus {
    /// Storage vocabulary (uppercase) written to the database
    pub fn as_db_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Inactive => "INACTIVE",
            UserStatus::Suspended => "SUSPENDED",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl FromStr for UserStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(anyhow::anyhow!("Invalid user status: {}", s)),
        }
    }
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    /// User role (defaults to student)
    pub role: Option<UserRole>,
}

/// Input for updating a user
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub last_login_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: UserRole) -> User {
        User::new(CreateUserInput {
            name: "Avery Chen".to_string(),
            email: "avery@example.com".to_string(),
            role: Some(role),
        })
    }

    #[test]
    fn test_user_new_defaults() {
        let user = User::new(CreateUserInput {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            role: None,
        });

        assert_eq!(user.role, UserRole::Student);
        assert_eq!(user.status, UserStatus::Active);
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn test_is_staff() {
        assert!(sample_user(UserRole::Admin).is_staff());
        assert!(sample_user(UserRole::Instructor).is_staff());
        assert!(sample_user(UserRole::Editor).is_staff());
        assert!(!sample_user(UserRole::Student).is_staff());
        assert!(!sample_user(UserRole::Applicant).is_staff());
    }

    #[test]
    fn test_role_vocabulary() {
        assert_eq!(UserRole::Instructor.to_string(), "instructor");
        assert_eq!(UserRole::Instructor.as_db_str(), "INSTRUCTOR");
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("superuser".parse::<UserRole>().is_err());
    }
}
