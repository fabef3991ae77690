//! Domain models
//!
//! This module defines the entities managed by the AssetMagnets back-office:
//! services, contact messages, contact info entries, global offices, FAQs,
//! users, courses and jobs.
//!
//! Enum-typed fields carry two vocabularies: the wire vocabulary (lowercase,
//! via `Display`/`FromStr`) consumed by the admin frontend, and the storage
//! vocabulary (uppercase, via `as_db_str`) written to the database. The
//! `shape` module translates between the two.

pub mod contact_info;
pub mod contact_message;
pub mod course;
pub mod faq;
pub mod global_office;
pub mod job;
pub mod service;
pub mod user;

pub use contact_info::{ContactInfo, ContactInfoKind, CreateContactInfoInput, UpdateContactInfoInput};
pub use contact_message::{
    ContactMessage, CreateContactMessageInput, MessagePriority, MessageStatus,
    UpdateContactMessageInput,
};
pub use course::{Course, CourseLevel, CreateCourseInput, UpdateCourseInput};
pub use faq::{CreateFaqInput, Faq, UpdateFaqInput};
pub use global_office::{CreateGlobalOfficeInput, GlobalOffice, UpdateGlobalOfficeInput};
pub use job::{CreateJobInput, Job, JobLevel, JobStatus, JobType, UpdateJobInput};
pub use service::{CreateServiceInput, Service, ServiceStatus, UpdateServiceInput};
pub use user::{CreateUserInput, UpdateUserInput, User, UserRole, UserStatus};
