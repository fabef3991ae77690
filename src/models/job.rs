//! Job model
//!
//! Open positions listed on the careers page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A job posting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    /// Unique identifier
    pub id: i64,
    /// Position title
    pub title: String,
    /// Hiring company (AssetMagnets or a partner)
    pub company: String,
    /// Location label
    pub location: String,
    /// Employment type
    pub job_type: JobType,
    /// Seniority level
    pub level: JobLevel,
    /// Lower salary bound (optional)
    pub salary_min: Option<f64>,
    /// Upper salary bound (optional)
    pub salary_max: Option<f64>,
    /// Requirement bullet points
    pub requirements: Vec<String>,
    /// Benefit bullet points
    pub benefits: Vec<String>,
    /// Posting status
    pub status: JobStatus,
    /// Number of applications received
    pub applications_count: i64,
    /// Number of page views
    pub views_count: i64,
    /// Application deadline (optional)
    pub deadline: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a new Job; the ID is assigned by the database.
    pub fn new(input: CreateJobInput) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: input.title,
            company: input.company,
            location: input.location,
            job_type: input.job_type.unwrap_or_default(),
            level: input.level.unwrap_or_default(),
            salary_min: input.salary_min,
            salary_max: input.salary_max,
            requirements: input.requirements,
            benefits: input.benefits,
            status: input.status.unwrap_or_default(),
            applications_count: 0,
            views_count: 0,
            deadline: input.deadline,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the posting accepts applications
    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }
}

/// Employment type of a job posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    /// Storage vocabulary (uppercase) written to the database
    pub fn as_db_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "FULL_TIME",
            JobType::PartTime => "PART_TIME",
            JobType::Contract => "CONTRACT",
            JobType::Internship => "INTERNSHIP",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobType::FullTime => write!(f, "full_time"),
            JobType::PartTime => write!(f, "part_time"),
            JobType::Contract => write!(f, "contract"),
            JobType::Internship => write!(f, "internship"),
        }
    }
}

impl FromStr for JobType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full_time" => Ok(JobType::FullTime),
            "part_time" => Ok(JobType::PartTime),
            "contract" => Ok(JobType::Contract),
            "internship" => Ok(JobType::Internship),
            _ => Err(anyhow::anyhow!("Invalid job type: {}", s)),
        }
    }
}

/// Seniority level of a job posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobLevel {
    Junior,
    #[default]
    Mid,
    Senior,
    Lead,
}

impl JobLevel {
    /// Storage vocabulary (uppercase) written to the database
    pub fn as_db_str(&self) -> &'static str {
        match self {
            JobLevel::Junior => "JUNIOR",
            JobLevel::Mid => "MID",
            JobLevel::Senior => "SENIOR",
            JobLevel::Lead => "LEAD",
        }
    }
}

impl fmt::Display for JobLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobLevel::Junior => write!(f, "junior"),
            JobLevel::Mid => write!(f, "mid"),
            JobLevel::Senior => write!(f, "senior"),
            JobLevel::Lead => write!(f, "lead"),
        }
    }
}

impl FromStr for JobLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "junior" => Ok(JobLevel::Junior),
            "mid" => Ok(JobLevel::Mid),
            "senior" => Ok(JobLevel::Senior),
            "lead" => Ok(JobLevel::Lead),
            _ => Err(anyhow::anyhow!("Invalid job level: {}", s)),
        }
    }
}

/// Posting status of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Open,
    Closed,
    Draft,
}

impl JobStatus {
    /// Storage vocabulary (uppercase) written to the database
    pub fn as_db_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "OPEN",
            JobStatus::Closed => "CLOSED",
            JobStatus::Draft => "DRAFT",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Open => write!(f, "open"),
            JobStatus::Closed => write!(f, "closed"),
            JobStatus::Draft => write!(f, "draft"),
        }
    }
}

impl FromStr for JobStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(JobStatus::Open),
            "closed" => Ok(JobStatus::Closed),
            "draft" => Ok(JobStatus::Draft),
            _ => Err(anyhow::anyhow!("Invalid job status: {}", s)),
        }
    }
}

/// Input for creating a job posting
#[derive(Debug, Clone)]
pub struct CreateJobInput {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: Option<JobType>,
    pub level: Option<JobLevel>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub status: Option<JobStatus>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Input for updating a job posting
#[derive(Debug, Clone, Default)]
pub struct UpdateJobInput {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub level: Option<JobLevel>,
    pub salary_min: Option<Option<f64>>,
    pub salary_max: Option<Option<f64>>,
    pub requirements: Option<Vec<String>>,
    pub benefits: Option<Vec<String>>,
    pub status: Option<JobStatus>,
    pub applications_count: Option<i64>,
    pub views_count: Option<i64>,
    pub deadline: Option<Option<DateTime<Utc>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_new_defaults() {
        let job = Job::new(CreateJobInput {
            title: "Rust Engineer".to_string(),
            company: "AssetMagnets".to_string(),
            location: "Remote".to_string(),
            job_type: None,
            level: None,
            salary_min: Some(90000.0),
            salary_max: Some(130000.0),
            requirements: vec!["3y systems experience".to_string()],
            benefits: vec!["Remote-first".to_string()],
            status: None,
            deadline: None,
        });

        assert_eq!(job.job_type, JobType::FullTime);
        assert_eq!(job.level, JobLevel::Mid);
        assert!(job.is_open());
        assert_eq!(job.applications_count, 0);
    }

    #[test]
    fn test_job_type_vocabulary() {
        assert_eq!(JobType::FullTime.to_string(), "full_time");
        assert_eq!(JobType::FullTime.as_db_str(), "FULL_TIME");
        assert_eq!("PART_TIME".parse::<JobType>().unwrap(), JobType::PartTime);
        assert!("freelance".parse::<JobType>().is_err());
    }
}
