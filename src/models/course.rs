//! Course model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A training course listed on the courses page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    /// Unique identifier
    pub id: i64,
    /// Course title
    pub title: String,
    /// Course description
    pub description: String,
    /// Instructor user ID (optional foreign key to users)
    pub instructor_id: Option<i64>,
    /// Category label
    pub category: String,
    /// Difficulty level
    pub level: CourseLevel,
    /// List price
    pub price: f64,
    /// Discounted price, if a discount is running
    pub discount_price: Option<f64>,
    /// Average rating
    pub rating: f64,
    /// Number of enrolled students
    pub enrolled_count: i64,
    /// Whether the course is visible on the public site
    pub published: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Create a new Course; the ID is assigned by the database.
    pub fn new(input: CreateCourseInput) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: input.title,
            description: input.description,
            instructor_id: input.instructor_id,
            category: input.category,
            level: input.level.unwrap_or_default(),
            price: input.price,
            discount_price: input.discount_price,
            rating: 0.0,
            enrolled_count: 0,
            published: input.published.unwrap_or(false),
            created_at: now,
            updated_at: now,
        }
    }

    /// Price the student actually pays
    pub fn effective_price(&self) -> f64 {
        self.discount_price.unwrap_or(self.price)
    }
}

/// Course difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    /// Storage vocabulary (uppercase) written to the database
    pub fn as_db_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "BEGINNER",
            CourseLevel::Intermediate => "INTERMEDIATE",
            CourseLevel::Advanced => "ADVANCED",
        }
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseLevel::Beginner => write!(f, "beginner"),
            CourseLevel::Intermediate => write!(f, "intermediate"),
            CourseLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for CourseLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(CourseLevel::Beginner),
            "intermediate" => Ok(CourseLevel::Intermediate),
            "advanced" => Ok(CourseLevel::Advanced),
            _ => Err(anyhow::anyhow!("Invalid course level: {}", s)),
        }
    }
}

/// Input for creating a course
#[derive(Debug, Clone)]
pub struct CreateCourseInput {
    pub title: String,
    pub description: String,
    pub instructor_id: Option<i64>,
    pub category: String,
    /// Difficulty level (defaults to beginner)
    pub level: Option<CourseLevel>,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub published: Option<bool>,
}

/// Input for updating a course
#[derive(Debug, Clone, Default)]
pub struct UpdateCourseInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor_id: Option<Option<i64>>,
    pub category: Option<String>,
    pub level: Option<CourseLevel>,
    pub price: Option<f64>,
    pub discount_price: Option<Option<f64>>,
    pub rating: Option<f64>,
    pub enrolled_count: Option<i64>,
    pub published: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_course(discount: Option<f64>) -> Course {
        Course::new(CreateCourseInput {
            title: "Prompt Engineering 101".to_string(),
            description: "From zero to shipped".to_string(),
            instructor_id: None,
            category: "ai".to_string(),
            level: None,
            price: 499.0,
            discount_price: discount,
            published: None,
        })
    }

    #[test]
    fn test_course_new_defaults() {
        let course = sample_course(None);

        assert_eq!(course.level, CourseLevel::Beginner);
        assert!(!course.published);
        assert_eq!(course.enrolled_count, 0);
    }

    #[test]
    fn test_effective_price() {
        assert_eq!(sample_course(None).effective_price(), 499.0);
        assert_eq!(sample_course(Some(299.0)).effective_price(), 299.0);
    }

    #[test]
    fn test_level_vocabulary() {
        assert_eq!(CourseLevel::Advanced.as_db_str(), "ADVANCED");
        assert_eq!(
            "INTERMEDIATE".parse::<CourseLevel>().unwrap(),
            CourseLevel::Intermediate
        );
    }
}
