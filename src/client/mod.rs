//! Remote data-access backend
//!
//! `RemoteStore` implements the same repository traits as the SQLx
//! implementations, but over the REST surface: each call issues one HTTP
//! request against a running back-office instance and parses the JSON
//! response. Admin tools that cannot reach the database directly inject
//! this store instead of the SQLx one; callers cannot tell the difference.
//!
//! Transport policy mirrors the rest of the system: no timeout, no retry,
//! no cancellation. Any non-2xx response becomes an error carrying the
//! status code and best-effort body text.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::api::contact_info::{CreateContactInfoRequest, UpdateContactInfoRequest};
use crate::api::contact_messages::{CreateContactMessageRequest, UpdateContactMessageRequest};
use crate::api::courses::{CreateCourseRequest, UpdateCourseRequest};
use crate::api::global_offices::{CreateGlobalOfficeRequest, UpdateGlobalOfficeRequest};
use crate::api::jobs::{CreateJobRequest, UpdateJobRequest};
use crate::api::services::{CreateServiceRequest, UpdateServiceRequest};
use crate::api::users::{CreateUserRequest, UpdateUserRequest};
use crate::db::repositories::{
    ContactInfoRepository, ContactMessageRepository, CourseRepository, FaqRepository,
    GlobalOfficeRepository, JobRepository, ServiceRepository, UserRepository,
};
use crate::models::{
    ContactInfo, ContactMessage, Course, CreateContactInfoInput, CreateContactMessageInput,
    CreateCourseInput, CreateFaqInput, CreateGlobalOfficeInput, CreateJobInput,
    CreateServiceInput, CreateUserInput, Faq, GlobalOffice, Job, Service, UpdateContactInfoInput,
    UpdateContactMessageInput, UpdateCourseInput, UpdateFaqInput, UpdateGlobalOfficeInput,
    UpdateJobInput, UpdateServiceInput, UpdateUserInput, User,
};
use crate::shape::{service_from_legacy, PriceTiers, ServiceWire};

/// Error type for remote data access
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// HTTP-backed implementation of the repository traits
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteStore {
    /// Create a store talking to the given base URL (e.g.
    /// `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-2xx response into a `RemoteError::Status` carrying the
    /// body text, best effort.
    async fn check(response: Response) -> Result<Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let response = self.client.get(self.url(path)).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// GET that maps 404 onto `None`
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, RemoteError> {
        let response = self.client.get(self.url(path)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::check(response).await?.json().await?))
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// DELETE; the success body is empty and is discarded
    async fn delete_path(&self, path: &str) -> Result<(), RemoteError> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

// ============================================================================
// Services
// ============================================================================

#[async_trait]
impl ServiceRepository for RemoteStore {
    async fn create(&self, input: CreateServiceInput) -> Result<Service> {
        let request = CreateServiceRequest {
            title: input.title,
            description: input.description,
            long_description: input.long_description,
            icon: input.icon,
            features: input.features,
            category: input.category,
            status: input.status.map(|s| s.to_string()),
            price: PriceTiers::from_flat(
                input.basic_price,
                input.premium_price,
                input.enterprise_price,
            ),
        };
        let wire: ServiceWire = self.post_json("/api/services", &request).await?;
        Ok(service_from_legacy(&wire))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Service>> {
        let wire: Option<ServiceWire> =
            self.get_optional(&format!("/api/services/{}", id)).await?;
        Ok(wire.as_ref().map(service_from_legacy))
    }

    async fn list(&self) -> Result<Vec<Service>> {
        let wires: Vec<ServiceWire> = self.get_json("/api/services").await?;
        Ok(wires.iter().map(service_from_legacy).collect())
    }

    async fn list_active(&self) -> Result<Vec<Service>> {
        Ok(ServiceRepository::list(self)
            .await?
            .into_iter()
            .filter(|s| s.is_active())
            .collect())
    }

    async fn update(&self, id: i64, input: UpdateServiceInput) -> Result<Service> {
        // The wire shape carries prices as one nested object, so a partial
        // tier update is only representable when all three tiers are given.
        let price = match (
            input.basic_price,
            input.premium_price,
            input.enterprise_price,
        ) {
            (Some(basic), Some(premium), Some(enterprise)) => {
                Some(PriceTiers::from_flat(basic, premium, enterprise))
            }
            _ => None,
        };
        let request = UpdateServiceRequest {
            title: input.title,
            description: input.description,
            long_description: input.long_description,
            icon: input.icon,
            features: input.features,
            category: input.category,
            status: input.status.map(|s| s.to_string()),
            price,
            popularity: input.popularity,
            clients: input.clients,
            rating: input.rating,
        };
        let wire: ServiceWire = self
            .put_json(&format!("/api/services/{}", id), &request)
            .await?;
        Ok(service_from_legacy(&wire))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        Ok(self.delete_path(&format!("/api/services/{}", id)).await?)
    }

    async fn count(&self) -> Result<i64> {
        Ok(ServiceRepository::list(self).await?.len() as i64)
    }
}

// ============================================================================
// Contact messages
// ============================================================================

#[async_trait]
impl ContactMessageRepository for RemoteStore {
    async fn create(&self, input: CreateContactMessageInput) -> Result<ContactMessage> {
        let request = CreateContactMessageRequest {
            name: input.name,
            email: input.email,
            phone: input.phone,
            subject: input.subject,
            message: input.message,
            priority: input.priority.map(|p| p.to_string()),
        };
        Ok(self.post_json("/api/contact-messages", &request).await?)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ContactMessage>> {
        Ok(self
            .get_optional(&format!("/api/contact-messages/{}", id))
            .await?)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>> {
        Ok(self.get_json("/api/contact-messages").await?)
    }

    async fn update(&self, id: i64, input: UpdateContactMessageInput) -> Result<ContactMessage> {
        let request = UpdateContactMessageRequest {
            status: input.status.map(|s| s.to_string()),
            priority: input.priority.map(|p| p.to_string()),
            reply: input.reply,
        };
        Ok(self
            .put_json(&format!("/api/contact-messages/{}", id), &request)
            .await?)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        Ok(self
            .delete_path(&format!("/api/contact-messages/{}", id))
            .await?)
    }
}

// ============================================================================
// Contact info
// ============================================================================

#[async_trait]
impl ContactInfoRepository for RemoteStore {
    async fn create(&self, input: CreateContactInfoInput) -> Result<ContactInfo> {
        let request = CreateContactInfoRequest {
            kind: input.kind.to_string(),
            title: input.title,
            value: input.value,
            icon: input.icon,
            active: input.active,
            display_order: input.display_order,
        };
        Ok(self.post_json("/api/contact-info", &request).await?)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ContactInfo>> {
        Ok(self
            .get_optional(&format!("/api/contact-info/{}", id))
            .await?)
    }

    async fn list(&self) -> Result<Vec<ContactInfo>> {
        Ok(self.get_json("/api/contact-info").await?)
    }

    async fn list_active(&self) -> Result<Vec<ContactInfo>> {
        Ok(ContactInfoRepository::list(self)
            .await?
            .into_iter()
            .filter(|e| e.active)
            .collect())
    }

    async fn update(&self, id: i64, input: UpdateContactInfoInput) -> Result<ContactInfo> {
        let request = UpdateContactInfoRequest {
            kind: input.kind.map(|k| k.to_string()),
            title: input.title,
            value: input.value,
            icon: input.icon,
            active: input.active,
            display_order: input.display_order,
        };
        Ok(self
            .put_json(&format!("/api/contact-info/{}", id), &request)
            .await?)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        Ok(self.delete_path(&format!("/api/contact-info/{}", id)).await?)
    }

    async fn count(&self) -> Result<i64> {
        Ok(ContactInfoRepository::list(self).await?.len() as i64)
    }
}

// ============================================================================
// Global offices
// ============================================================================

#[async_trait]
impl GlobalOfficeRepository for RemoteStore {
    async fn create(&self, input: CreateGlobalOfficeInput) -> Result<GlobalOffice> {
        let request = CreateGlobalOfficeRequest {
            city: input.city,
            country: input.country,
            address: input.address,
            postal_code: input.postal_code,
            phone: input.phone,
            email: input.email,
            latitude: input.latitude,
            longitude: input.longitude,
            is_headquarters: input.is_headquarters,
            active: input.active,
            working_hours: input.working_hours,
        };
        Ok(self.post_json("/api/global-offices", &request).await?)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<GlobalOffice>> {
        Ok(self
            .get_optional(&format!("/api/global-offices/{}", id))
            .await?)
    }

    async fn list(&self) -> Result<Vec<GlobalOffice>> {
        Ok(self.get_json("/api/global-offices").await?)
    }

    async fn update(&self, id: i64, input: UpdateGlobalOfficeInput) -> Result<GlobalOffice> {
        let request = UpdateGlobalOfficeRequest {
            city: input.city,
            country: input.country,
            address: input.address,
            postal_code: input.postal_code,
            phone: input.phone,
            email: input.email,
            latitude: input.latitude,
            longitude: input.longitude,
            is_headquarters: input.is_headquarters,
            active: input.active,
            working_hours: input.working_hours,
        };
        Ok(self
            .put_json(&format!("/api/global-offices/{}", id), &request)
            .await?)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        Ok(self
            .delete_path(&format!("/api/global-offices/{}", id))
            .await?)
    }

    async fn count(&self) -> Result<i64> {
        Ok(GlobalOfficeRepository::list(self).await?.len() as i64)
    }
}

// ============================================================================
// FAQs
// ============================================================================

#[async_trait]
impl FaqRepository for RemoteStore {
    async fn create(&self, input: CreateFaqInput) -> Result<Faq> {
        let request = crate::api::faqs::CreateFaqRequest {
            question: input.question,
            answer: input.answer,
            category: input.category,
            tags: input.tags,
            display_order: input.display_order,
            active: input.active,
        };
        Ok(self.post_json("/api/faqs", &request).await?)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Faq>> {
        Ok(self.get_optional(&format!("/api/faqs/{}", id)).await?)
    }

    async fn list(&self) -> Result<Vec<Faq>> {
        Ok(self.get_json("/api/faqs").await?)
    }

    async fn list_active(&self) -> Result<Vec<Faq>> {
        Ok(FaqRepository::list(self)
            .await?
            .into_iter()
            .filter(|f| f.active)
            .collect())
    }

    async fn update(&self, id: i64, input: UpdateFaqInput) -> Result<Faq> {
        let request = crate::api::faqs::UpdateFaqRequest {
            question: input.question,
            answer: input.answer,
            category: input.category,
            tags: input.tags,
            display_order: input.display_order,
            active: input.active,
        };
        Ok(self.put_json(&format!("/api/faqs/{}", id), &request).await?)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        Ok(self.delete_path(&format!("/api/faqs/{}", id)).await?)
    }

    async fn count(&self) -> Result<i64> {
        Ok(FaqRepository::list(self).await?.len() as i64)
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for RemoteStore {
    async fn create(&self, input: CreateUserInput) -> Result<User> {
        let request = CreateUserRequest {
            name: input.name,
            email: input.email,
            role: input.role.map(|r| r.to_string()),
        };
        Ok(self.post_json("/api/users", &request).await?)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.get_optional(&format!("/api/users/{}", id)).await?)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(UserRepository::list(self)
            .await?
            .into_iter()
            .find(|u| u.email == email))
    }

    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.get_json("/api/users").await?)
    }

    async fn update(&self, id: i64, input: UpdateUserInput) -> Result<User> {
        let request = UpdateUserRequest {
            name: input.name,
            email: input.email,
            role: input.role.map(|r| r.to_string()),
            status: input.status.map(|s| s.to_string()),
            last_login_at: input.last_login_at,
        };
        Ok(self.put_json(&format!("/api/users/{}", id), &request).await?)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        Ok(self.delete_path(&format!("/api/users/{}", id)).await?)
    }
}

// ============================================================================
// Courses
// ============================================================================

#[async_trait]
impl CourseRepository for RemoteStore {
    async fn create(&self, input: CreateCourseInput) -> Result<Course> {
        let request = CreateCourseRequest {
            title: input.title,
            description: input.description,
            instructor_id: input.instructor_id,
            category: input.category,
            level: input.level.map(|l| l.to_string()),
            price: input.price,
            discount_price: input.discount_price,
            published: input.published,
        };
        Ok(self.post_json("/api/courses", &request).await?)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Course>> {
        Ok(self.get_optional(&format!("/api/courses/{}", id)).await?)
    }

    async fn list(&self) -> Result<Vec<Course>> {
        Ok(self.get_json("/api/courses").await?)
    }

    async fn list_published(&self) -> Result<Vec<Course>> {
        Ok(CourseRepository::list(self)
            .await?
            .into_iter()
            .filter(|c| c.published)
            .collect())
    }

    async fn update(&self, id: i64, input: UpdateCourseInput) -> Result<Course> {
        let request = UpdateCourseRequest {
            title: input.title,
            description: input.description,
            instructor_id: input.instructor_id,
            category: input.category,
            level: input.level.map(|l| l.to_string()),
            price: input.price,
            discount_price: input.discount_price,
            rating: input.rating,
            enrolled_count: input.enrolled_count,
            published: input.published,
        };
        Ok(self
            .put_json(&format!("/api/courses/{}", id), &request)
            .await?)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        Ok(self.delete_path(&format!("/api/courses/{}", id)).await?)
    }
}

// ============================================================================
// Jobs
// ============================================================================

#[async_trait]
impl JobRepository for RemoteStore {
    async fn create(&self, input: CreateJobInput) -> Result<Job> {
        let request = CreateJobRequest {
            title: input.title,
            company: input.company,
            location: input.location,
            job_type: input.job_type.map(|t| t.to_string()),
            level: input.level.map(|l| l.to_string()),
            salary_min: input.salary_min,
            salary_max: input.salary_max,
            requirements: input.requirements,
            benefits: input.benefits,
            status: input.status.map(|s| s.to_string()),
            deadline: input.deadline,
        };
        Ok(self.post_json("/api/jobs", &request).await?)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Job>> {
        Ok(self.get_optional(&format!("/api/jobs/{}", id)).await?)
    }

    async fn list(&self) -> Result<Vec<Job>> {
        Ok(self.get_json("/api/jobs").await?)
    }

    async fn list_open(&self) -> Result<Vec<Job>> {
        Ok(JobRepository::list(self)
            .await?
            .into_iter()
            .filter(|j| j.is_open())
            .collect())
    }

    async fn update(&self, id: i64, input: UpdateJobInput) -> Result<Job> {
        let request = UpdateJobRequest {
            title: input.title,
            company: input.company,
            location: input.location,
            job_type: input.job_type.map(|t| t.to_string()),
            level: input.level.map(|l| l.to_string()),
            salary_min: input.salary_min,
            salary_max: input.salary_max,
            requirements: input.requirements,
            benefits: input.benefits,
            status: input.status.map(|s| s.to_string()),
            applications_count: input.applications_count,
            views_count: input.views_count,
            deadline: input.deadline,
        };
        Ok(self.put_json(&format!("/api/jobs/{}", id), &request).await?)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        Ok(self.delete_path(&format!("/api/jobs/{}", id)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let store = RemoteStore::new("http://localhost:8080/");
        assert_eq!(store.url("/api/faqs"), "http://localhost:8080/api/faqs");
    }

    #[test]
    fn test_status_error_formatting() {
        let error = RemoteError::Status {
            status: 404,
            body: "{\"error\":{\"code\":\"NOT_FOUND\"}}".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("NOT_FOUND"));
    }
}
