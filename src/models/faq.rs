//! FAQ model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question/answer pair shown on the FAQ page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Faq {
    /// Unique identifier
    pub id: i64,
    /// The question
    pub question: String,
    /// The answer
    pub answer: String,
    /// Category label for grouping
    pub category: String,
    /// Search tags
    pub tags: Vec<String>,
    /// Display order within the category
    pub display_order: i32,
    /// Whether the entry is shown
    pub active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Faq {
    /// Create a new Faq; the ID is assigned by the database.
    pub fn new(input: CreateFaqInput) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            question: input.question,
            answer: input.answer,
            category: input.category.unwrap_or_else(|| "general".to_string()),
            tags: input.tags,
            display_order: input.display_order.unwrap_or(0),
            active: input.active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating an FAQ entry
#[derive(Debug, Clone)]
pub struct CreateFaqInput {
    pub question: String,
    pub answer: String,
    /// Category (defaults to "general")
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub display_order: Option<i32>,
    pub active: Option<bool>,
}

/// Input for updating an FAQ entry
#[derive(Debug, Clone, Default)]
pub struct UpdateFaqInput {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub display_order: Option<i32>,
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_faq_defaults() {
        let faq = Faq::new(CreateFaqInput {
            question: "Do you offer trials?".to_string(),
            answer: "Yes, two weeks.".to_string(),
            category: None,
            tags: vec!["pricing".to_string()],
            display_order: None,
            active: None,
        });

        assert_eq!(faq.category, "general");
        assert_eq!(faq.display_order, 0);
        assert!(faq.active);
        assert_eq!(faq.tags, vec!["pricing".to_string()]);
    }
}
