//! Default data seeding
//!
//! Inserts starter content for the public pages when the corresponding
//! tables are empty. Seeding is non-critical: a failed collection is logged
//! at warn level and skipped so it never blocks the caller.

use std::sync::Arc;

use serde::Serialize;

use crate::db::repositories::{
    ContactInfoRepository, FaqRepository, GlobalOfficeRepository, ServiceRepository,
};
use crate::models::{
    ContactInfoKind, CreateContactInfoInput, CreateFaqInput, CreateGlobalOfficeInput,
    CreateServiceInput, ServiceStatus,
};

/// Per-collection insert counts from a seeding run
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SeedReport {
    pub services: usize,
    pub contact_info: usize,
    pub global_offices: usize,
    pub faqs: usize,
}

impl SeedReport {
    /// Total rows inserted across collections
    pub fn total(&self) -> usize {
        self.services + self.contact_info + self.global_offices + self.faqs
    }
}

/// Seeds the public-page collections with default content
pub struct SeedService {
    services: Arc<dyn ServiceRepository>,
    contact_info: Arc<dyn ContactInfoRepository>,
    global_offices: Arc<dyn GlobalOfficeRepository>,
    faqs: Arc<dyn FaqRepository>,
}

impl SeedService {
    pub fn new(
        services: Arc<dyn ServiceRepository>,
        contact_info: Arc<dyn ContactInfoRepository>,
        global_offices: Arc<dyn GlobalOfficeRepository>,
        faqs: Arc<dyn FaqRepository>,
    ) -> Self {
        Self {
            services,
            contact_info,
            global_offices,
            faqs,
        }
    }

    /// Seed every empty collection, swallowing per-collection failures.
    pub async fn run(&self) -> SeedReport {
        let mut report = SeedReport::default();

        match self.seed_services().await {
            Ok(count) => report.services = count,
            Err(e) => tracing::warn!(error = %e, "Skipping service seeding"),
        }
        match self.seed_contact_info().await {
            Ok(count) => report.contact_info = count,
            Err(e) => tracing::warn!(error = %e, "Skipping contact info seeding"),
        }
        match self.seed_global_offices().await {
            Ok(count) => report.global_offices = count,
            Err(e) => tracing::warn!(error = %e, "Skipping office seeding"),
        }
        match self.seed_faqs().await {
            Ok(count) => report.faqs = count,
            Err(e) => tracing::warn!(error = %e, "Skipping FAQ seeding"),
        }

        if report.total() > 0 {
            tracing::info!(
                services = report.services,
                contact_info = report.contact_info,
                global_offices = report.global_offices,
                faqs = report.faqs,
                "Seeded default data"
            );
        }
        report
    }

    async fn seed_services(&self) -> anyhow::Result<usize> {
        if self.services.count().await? > 0 {
            return Ok(0);
        }

        let defaults = vec![
            CreateServiceInput {
                title: "AI Strategy Consulting".to_string(),
                description: "Roadmaps, audits and adoption plans for teams new to AI".to_string(),
                long_description: Some(
                    "We assess your data landscape, shortlist use cases and deliver a \
                     quarter-by-quarter adoption plan."
                        .to_string(),
                ),
                icon: Some("compass".to_string()),
                features: vec![
                    "Use-case discovery workshop".to_string(),
                    "Model risk assessment".to_string(),
                    "Adoption roadmap".to_string(),
                ],
                category: "consulting".to_string(),
                status: Some(ServiceStatus::Active),
                basic_price: 5000.0,
                premium_price: 15000.0,
                enterprise_price: 50000.0,
            },
            CreateServiceInput {
                title: "Custom Model Development".to_string(),
                description: "Fine-tuned models built on your data".to_string(),
                long_description: None,
                icon: Some("cpu".to_string()),
                features: vec![
                    "Dataset curation".to_string(),
                    "Evaluation harness".to_string(),
                ],
                category: "engineering".to_string(),
                status: Some(ServiceStatus::Active),
                basic_price: 12000.0,
                premium_price: 30000.0,
                enterprise_price: 90000.0,
            },
            CreateServiceInput {
                title: "MLOps Platform Setup".to_string(),
                description: "Deployment, monitoring and retraining pipelines".to_string(),
                long_description: None,
                icon: Some("server".to_string()),
                features: vec!["CI/CD for models".to_string()],
                category: "engineering".to_string(),
                status: Some(ServiceStatus::Draft),
                basic_price: 8000.0,
                premium_price: 20000.0,
                enterprise_price: 60000.0,
            },
        ];

        let count = defaults.len();
        for input in defaults {
            self.services.create(input).await?;
        }
        Ok(count)
    }

    async fn seed_contact_info(&self) -> anyhow::Result<usize> {
        if self.contact_info.count().await? > 0 {
            return Ok(0);
        }

        let defaults = vec![
            CreateContactInfoInput {
                kind: ContactInfoKind::Address,
                title: "Visit us".to_string(),
                value: "Torstrasse 1, 10119 Berlin".to_string(),
                icon: Some("map-pin".to_string()),
                active: Some(true),
                display_order: Some(0),
            },
            CreateContactInfoInput {
                kind: ContactInfoKind::Phone,
                title: "Call us".to_string(),
                value: "+49 30 1234 5678".to_string(),
                icon: Some("phone".to_string()),
                active: Some(true),
                display_order: Some(1),
            },
            CreateContactInfoInput {
                kind: ContactInfoKind::Email,
                title: "Email us".to_string(),
                value: "hello@assetmagnets.com".to_string(),
                icon: Some("mail".to_string()),
                active: Some(true),
                display_order: Some(2),
            },
            CreateContactInfoInput {
                kind: ContactInfoKind::Hours,
                title: "Office hours".to_string(),
                value: "Mon-Fri 9:00-18:00 CET".to_string(),
                icon: Some("clock".to_string()),
                active: Some(true),
                display_order: Some(3),
            },
        ];

        let count = defaults.len();
        for input in defaults {
            self.contact_info.create(input).await?;
        }
        Ok(count)
    }

    async fn seed_global_offices(&self) -> anyhow::Result<usize> {
        if self.global_offices.count().await? > 0 {
            return Ok(0);
        }

        let defaults = vec![
            CreateGlobalOfficeInput {
                city: "Berlin".to_string(),
                country: "Germany".to_string(),
                address: "Torstrasse 1".to_string(),
                postal_code: Some("10119".to_string()),
                phone: Some("+49 30 1234 5678".to_string()),
                email: Some("berlin@assetmagnets.com".to_string()),
                latitude: Some(52.5297),
                longitude: Some(13.4010),
                is_headquarters: Some(true),
                active: Some(true),
                working_hours: Some("Mon-Fri 9:00-18:00".to_string()),
            },
            CreateGlobalOfficeInput {
                city: "Singapore".to_string(),
                country: "Singapore".to_string(),
                address: "1 Raffles Place".to_string(),
                postal_code: Some("048616".to_string()),
                phone: None,
                email: Some("apac@assetmagnets.com".to_string()),
                latitude: Some(1.2847),
                longitude: Some(103.8510),
                is_headquarters: Some(false),
                active: Some(true),
                working_hours: Some("Mon-Fri 9:00-18:00".to_string()),
            },
        ];

        let count = defaults.len();
        for input in defaults {
            self.global_offices.create(input).await?;
        }
        Ok(count)
    }

    async fn seed_faqs(&self) -> anyhow::Result<usize> {
        if self.faqs.count().await? > 0 {
            return Ok(0);
        }

        let defaults = vec![
            CreateFaqInput {
                question: "Do you work with early-stage startups?".to_string(),
                answer: "Yes, the basic tier is sized for small teams.".to_string(),
                category: Some("general".to_string()),
                tags: vec!["pricing".to_string()],
                display_order: Some(0),
                active: Some(true),
            },
            CreateFaqInput {
                question: "Can courses be taken remotely?".to_string(),
                answer: "All courses run online; some offer optional on-site days.".to_string(),
                category: Some("courses".to_string()),
                tags: vec!["courses".to_string(), "remote".to_string()],
                display_order: Some(0),
                active: Some(true),
            },
            CreateFaqInput {
                question: "How fast do you reply to contact messages?".to_string(),
                answer: "Within two business days.".to_string(),
                category: Some("general".to_string()),
                tags: vec!["support".to_string()],
                display_order: Some(1),
                active: Some(true),
            },
        ];

        let count = defaults.len();
        for input in defaults {
            self.faqs.create(input).await?;
        }
        Ok(count)
    }
}
