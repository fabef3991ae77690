//! API layer - HTTP handlers and routing
//!
//! This module contains the REST surface of the back-office:
//! - CRUD endpoints per entity
//! - export download and export settings endpoints
//! - default-data initialization endpoint
//! - health check endpoint
//!
//! Handlers are stateless: each one dispatches to a repository or service
//! from `AppState` and serializes the result. Authentication is enforced by
//! the external session provider in front of this service.

pub mod contact_info;
pub mod contact_messages;
pub mod courses;
pub mod error;
pub mod export;
pub mod faqs;
pub mod global_offices;
pub mod health;
pub mod jobs;
pub mod seed;
pub mod services;
pub mod users;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{any, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

use crate::db::repositories::{
    ContactInfoRepository, ContactMessageRepository, CourseRepository, FaqRepository,
    GlobalOfficeRepository, JobRepository, ServiceRepository, UserRepository,
};
use crate::db::DbPool;
use crate::services::{ExportRepos, ExportService, SeedService};

/// Application state containing shared repositories and services
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceRepository>,
    pub contact_messages: Arc<dyn ContactMessageRepository>,
    pub contact_info: Arc<dyn ContactInfoRepository>,
    pub global_offices: Arc<dyn GlobalOfficeRepository>,
    pub faqs: Arc<dyn FaqRepository>,
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub export: Arc<ExportService>,
    pub seed: Arc<SeedService>,
    /// Deployment environment reported by the health endpoint
    pub environment: String,
}

impl AppState {
    /// Wire the full state against a database pool
    pub fn from_pool(pool: DbPool, environment: impl Into<String>) -> Self {
        let repos = ExportRepos::from_pool(pool);
        let seed = Arc::new(SeedService::new(
            repos.services.clone(),
            repos.contact_info.clone(),
            repos.global_offices.clone(),
            repos.faqs.clone(),
        ));
        Self {
            services: repos.services.clone(),
            contact_messages: repos.contact_messages.clone(),
            contact_info: repos.contact_info.clone(),
            global_offices: repos.global_offices.clone(),
            faqs: repos.faqs.clone(),
            users: repos.users.clone(),
            courses: repos.courses.clone(),
            jobs: repos.jobs.clone(),
            export: Arc::new(ExportService::new(repos)),
            seed,
            environment: environment.into(),
        }
    }
}

/// Build the main API router
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .nest("/services", services::router())
        .nest("/contact-messages", contact_messages::router())
        .nest("/contact-info", contact_info::router())
        .nest("/global-offices", global_offices::router())
        .nest("/faqs", faqs::router())
        .nest("/users", users::router())
        .nest("/courses", courses::router())
        .nest("/jobs", jobs::router())
        .nest("/export", export::router())
        .route("/initialize-data", post(seed::initialize_data))
        .route("/health", any(health::health))
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", build_api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
