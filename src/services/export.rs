//! Export pipeline
//!
//! Produces downloadable snapshots of the back-office collections as JSON or
//! CSV. Export preferences persist in the settings table under a single key
//! and merge with per-request overrides.
//!
//! Configuration is validated before any data is fetched: CSV cannot
//! represent the combined "all" export (one flat header row cannot describe
//! eight heterogeneous collections), and the XLSX/PDF formats are declared
//! but not implemented.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::db::repositories::{
    ContactInfoRepository, ContactMessageRepository, CourseRepository, FaqRepository,
    GlobalOfficeRepository, JobRepository, ServiceRepository, SettingsRepository,
    SqlxContactInfoRepository, SqlxContactMessageRepository, SqlxCourseRepository,
    SqlxFaqRepository, SqlxGlobalOfficeRepository, SqlxJobRepository, SqlxServiceRepository,
    SqlxSettingsRepository, SqlxUserRepository, UserRepository,
};
use crate::db::DbPool;
use crate::shape::service_to_legacy;

/// Settings key under which export preferences persist
pub const EXPORT_SETTINGS_KEY: &str = "export_settings";

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    /// File extension for the generated download
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// MIME type of the generated download
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How date-like fields are rendered in the exported file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportDateFormat {
    /// RFC 3339 strings (unchanged)
    #[default]
    Iso,
    /// Human-readable "YYYY-MM-DD HH:MM:SS"
    Local,
    /// Unix epoch milliseconds
    Timestamp,
}

/// Persisted export preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default = "default_true")]
    pub include_headers: bool,
    #[serde(default)]
    pub date_format: ExportDateFormat,
    #[serde(default = "default_true")]
    pub include_metadata: bool,
    /// Overrides the generated filename when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_filename: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            include_headers: true,
            date_format: ExportDateFormat::default(),
            include_metadata: true,
            custom_filename: None,
        }
    }
}

/// Per-request overrides merged over the persisted settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportOverrides {
    pub format: Option<ExportFormat>,
    pub include_headers: Option<bool>,
    pub date_format: Option<ExportDateFormat>,
    pub include_metadata: Option<bool>,
    pub filename: Option<String>,
}

impl ExportSettings {
    /// Apply per-request overrides on top of these settings
    pub fn merged_with(&self, overrides: &ExportOverrides) -> ExportSettings {
        ExportSettings {
            format: overrides.format.unwrap_or(self.format),
            include_headers: overrides.include_headers.unwrap_or(self.include_headers),
            date_format: overrides.date_format.unwrap_or(self.date_format),
            include_metadata: overrides.include_metadata.unwrap_or(self.include_metadata),
            custom_filename: overrides
                .filename
                .clone()
                .or_else(|| self.custom_filename.clone()),
        }
    }
}

/// Which collection(s) an export covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Services,
    ContactMessages,
    ContactInfo,
    GlobalOffices,
    Faqs,
    Users,
    Courses,
    Jobs,
    /// Every collection wrapped in one object
    All,
}

impl EntityKind {
    /// All single-entity kinds, in export order
    pub const SINGLE: [EntityKind; 8] = [
        EntityKind::Services,
        EntityKind::ContactMessages,
        EntityKind::ContactInfo,
        EntityKind::GlobalOffices,
        EntityKind::Faqs,
        EntityKind::Users,
        EntityKind::Courses,
        EntityKind::Jobs,
    ];
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Services => "services",
            EntityKind::ContactMessages => "contact_messages",
            EntityKind::ContactInfo => "contact_info",
            EntityKind::GlobalOffices => "global_offices",
            EntityKind::Faqs => "faqs",
            EntityKind::Users => "users",
            EntityKind::Courses => "courses",
            EntityKind::Jobs => "jobs",
            EntityKind::All => "all",
        };
        f.write_str(label)
    }
}

impl FromStr for EntityKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "services" => Ok(EntityKind::Services),
            "contact_messages" => Ok(EntityKind::ContactMessages),
            "contact_info" => Ok(EntityKind::ContactInfo),
            "global_offices" => Ok(EntityKind::GlobalOffices),
            "faqs" => Ok(EntityKind::Faqs),
            "users" => Ok(EntityKind::Users),
            "courses" => Ok(EntityKind::Courses),
            "jobs" => Ok(EntityKind::Jobs),
            "all" => Ok(EntityKind::All),
            _ => Err(anyhow::anyhow!("Unknown export entity: {}", s)),
        }
    }
}

/// Error types for export operations
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// CSV cannot represent the combined collections
    #[error("CSV export is not available for the combined export; pick a single collection")]
    CsvForAll,

    /// Format declared on the settings screen but not built yet
    #[error("{0} export is not yet implemented")]
    NotImplemented(ExportFormat),

    /// A collection fetch failed; the whole export aborts
    #[error("Export aborted: {0}")]
    Fetch(#[from] anyhow::Error),

    /// Serializing the snapshot failed
    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A generated export ready for download
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// The repositories the export pipeline reads from
#[derive(Clone)]
pub struct ExportRepos {
    pub services: Arc<dyn ServiceRepository>,
    pub contact_messages: Arc<dyn ContactMessageRepository>,
    pub contact_info: Arc<dyn ContactInfoRepository>,
    pub global_offices: Arc<dyn GlobalOfficeRepository>,
    pub faqs: Arc<dyn FaqRepository>,
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub settings: Arc<dyn SettingsRepository>,
}

impl ExportRepos {
    /// Wire every repository against the given pool
    pub fn from_pool(pool: DbPool) -> Self {
        Self {
            services: SqlxServiceRepository::boxed(pool.clone()),
            contact_messages: SqlxContactMessageRepository::boxed(pool.clone()),
            contact_info: SqlxContactInfoRepository::boxed(pool.clone()),
            global_offices: SqlxGlobalOfficeRepository::boxed(pool.clone()),
            faqs: SqlxFaqRepository::boxed(pool.clone()),
            users: SqlxUserRepository::boxed(pool.clone()),
            courses: SqlxCourseRepository::boxed(pool.clone()),
            jobs: SqlxJobRepository::boxed(pool.clone()),
            settings: SqlxSettingsRepository::boxed(pool),
        }
    }
}

/// Export service producing downloadable snapshots
pub struct ExportService {
    repos: ExportRepos,
}

impl ExportService {
    /// Create a new export service over the given repositories
    pub fn new(repos: ExportRepos) -> Self {
        Self { repos }
    }

    /// Load persisted export preferences, falling back to defaults when the
    /// key is missing or its stored shape no longer parses.
    pub async fn load_settings(&self) -> ExportSettings {
        match self.repos.settings.get(EXPORT_SETTINGS_KEY).await {
            Ok(Some(setting)) => serde_json::from_str(&setting.value).unwrap_or_default(),
            Ok(None) => ExportSettings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load export settings, using defaults");
                ExportSettings::default()
            }
        }
    }

    /// Persist export preferences as one flat JSON object
    pub async fn save_settings(&self, settings: &ExportSettings) -> anyhow::Result<()> {
        let value = serde_json::to_string(settings)?;
        self.repos.settings.set(EXPORT_SETTINGS_KEY, &value).await
    }

    /// Produce an export of the requested collection(s).
    ///
    /// Per-request overrides merge over the persisted defaults. The merged
    /// configuration is validated before any fetch happens.
    pub async fn export(
        &self,
        entity: EntityKind,
        overrides: ExportOverrides,
    ) -> Result<ExportFile, ExportError> {
        let settings = self.load_settings().await.merged_with(&overrides);

        validate_configuration(entity, &settings)?;

        let mut data = self.fetch(entity).await?;
        rewrite_dates(&mut data, settings.date_format);

        let filename = settings.custom_filename.clone().unwrap_or_else(|| {
            format!(
                "assetmagnets_{}_export_{}.{}",
                entity,
                Utc::now().format("%Y-%m-%d"),
                settings.format.extension()
            )
        });

        let bytes = match settings.format {
            ExportFormat::Json => {
                let body = if settings.include_metadata {
                    json!({
                        "data": data,
                        "filename": filename,
                        "type": entity.to_string(),
                        "timestamp": Utc::now().to_rfc3339(),
                    })
                } else {
                    data
                };
                serde_json::to_vec_pretty(&body)?
            }
            ExportFormat::Csv => {
                to_csv(&data, settings.include_headers).into_bytes()
            }
            // Unreachable after validation, kept for exhaustiveness
            other => return Err(ExportError::NotImplemented(other)),
        };

        Ok(ExportFile {
            filename,
            content_type: settings.format.content_type(),
            bytes,
        })
    }

    /// Fetch the requested collection(s) as JSON values in the legacy wire
    /// shape. The combined export performs eight independent fetches with no
    /// snapshot guarantee across them; any failure aborts the export.
    async fn fetch(&self, entity: EntityKind) -> Result<Value, ExportError> {
        if entity == EntityKind::All {
            let mut combined = serde_json::Map::new();
            for kind in EntityKind::SINGLE {
                combined.insert(kind.to_string(), self.fetch_single(kind).await?);
            }
            return Ok(Value::Object(combined));
        }
        self.fetch_single(entity).await
    }

    /// Fetch one collection as a JSON array
    async fn fetch_single(&self, entity: EntityKind) -> Result<Value, ExportError> {
        let value = match entity {
            EntityKind::Services => {
                let services = self.repos.services.list().await?;
                serde_json::to_value(
                    services
                        .iter()
                        .map(service_to_legacy)
                        .collect::<Vec<_>>(),
                )?
            }
            EntityKind::ContactMessages => {
                serde_json::to_value(self.repos.contact_messages.list().await?)?
            }
            EntityKind::ContactInfo => {
                serde_json::to_value(self.repos.contact_info.list().await?)?
            }
            EntityKind::GlobalOffices => {
                serde_json::to_value(self.repos.global_offices.list().await?)?
            }
            EntityKind::Faqs => serde_json::to_value(self.repos.faqs.list().await?)?,
            EntityKind::Users => serde_json::to_value(self.repos.users.list().await?)?,
            EntityKind::Courses => serde_json::to_value(self.repos.courses.list().await?)?,
            EntityKind::Jobs => serde_json::to_value(self.repos.jobs.list().await?)?,
            // The combined export is expanded in `fetch`
            EntityKind::All => Value::Array(Vec::new()),
        };
        Ok(value)
    }
}

/// Reject unsupported configurations before any data is fetched
fn validate_configuration(entity: EntityKind, settings: &ExportSettings) -> Result<(), ExportError> {
    match settings.format {
        ExportFormat::Xlsx | ExportFormat::Pdf => {
            Err(ExportError::NotImplemented(settings.format))
        }
        ExportFormat::Csv if entity == EntityKind::All => Err(ExportError::CsvForAll),
        _ => Ok(()),
    }
}

/// Rewrite every RFC 3339 string in the value per the configured date format
fn rewrite_dates(value: &mut Value, format: ExportDateFormat) {
    if format == ExportDateFormat::Iso {
        return;
    }
    match value {
        Value::Object(map) => {
            for v in map.values_mut() {
                rewrite_dates(v, format);
            }
        }
        Value::Array(items) => {
            for v in items.iter_mut() {
                rewrite_dates(v, format);
            }
        }
        Value::String(s) => {
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
                *value = match format {
                    ExportDateFormat::Iso => return,
                    ExportDateFormat::Local => {
                        Value::String(dt.format("%Y-%m-%d %H:%M:%S").to_string())
                    }
                    ExportDateFormat::Timestamp => Value::from(dt.timestamp_millis()),
                };
            }
        }
        _ => {}
    }
}

/// Serialize an array of flat records to CSV.
///
/// Headers come from the first record's keys. Fields containing commas,
/// quotes or newlines are quoted with embedded quotes doubled. An empty
/// collection yields an empty string.
fn to_csv(data: &Value, include_headers: bool) -> String {
    let records = match data.as_array() {
        Some(records) if !records.is_empty() => records,
        _ => return String::new(),
    };

    let headers: Vec<String> = match records[0].as_object() {
        Some(first) => first.keys().cloned().collect(),
        None => return String::new(),
    };

    let mut lines = Vec::with_capacity(records.len() + 1);
    if include_headers {
        lines.push(
            headers
                .iter()
                .map(|h| escape_csv_field(h))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    for record in records {
        let line = headers
            .iter()
            .map(|key| {
                let cell = record.get(key).map(csv_cell).unwrap_or_default();
                escape_csv_field(&cell)
            })
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    lines.join("\n")
}

/// Render a JSON value as a CSV cell
fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Quote a field when it contains separators, quotes or line breaks
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use crate::models::{CreateContactMessageInput, CreateServiceInput, ServiceStatus};

    async fn setup() -> ExportService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        ExportService::new(ExportRepos::from_pool(pool))
    }

    fn service_input(title: &str) -> CreateServiceInput {
        CreateServiceInput {
            title: title.to_string(),
            description: "desc".to_string(),
            long_description: None,
            icon: None,
            features: vec![],
            category: "consulting".to_string(),
            status: Some(ServiceStatus::Active),
            basic_price: 100.0,
            premium_price: 200.0,
            enterprise_price: 300.0,
        }
    }

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("Smith, John"), "\"Smith, John\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_to_csv_empty_collection_is_empty_string() {
        assert_eq!(to_csv(&json!([]), true), "");
    }

    #[test]
    fn test_to_csv_line_count() {
        let data = json!([
            {"name": "A", "city": "Lisbon"},
            {"name": "B", "city": "Oslo"},
        ]);

        let with_headers = to_csv(&data, true);
        assert_eq!(with_headers.lines().count(), 3);

        let without_headers = to_csv(&data, false);
        assert_eq!(without_headers.lines().count(), 2);
    }

    #[test]
    fn test_to_csv_quotes_commas() {
        let data = json!([{"name": "Smith, John"}]);
        let csv = to_csv(&data, false);
        assert_eq!(csv, "\"Smith, John\"");
    }

    #[test]
    fn test_settings_merge() {
        let stored = ExportSettings {
            format: ExportFormat::Json,
            include_headers: true,
            date_format: ExportDateFormat::Iso,
            include_metadata: true,
            custom_filename: None,
        };
        let merged = stored.merged_with(&ExportOverrides {
            format: Some(ExportFormat::Csv),
            include_headers: Some(false),
            ..Default::default()
        });

        assert_eq!(merged.format, ExportFormat::Csv);
        assert!(!merged.include_headers);
        assert!(merged.include_metadata);
    }

    #[test]
    fn test_entity_kind_parsing() {
        assert_eq!(
            "contact-messages".parse::<EntityKind>().unwrap(),
            EntityKind::ContactMessages
        );
        assert_eq!("all".parse::<EntityKind>().unwrap(), EntityKind::All);
        assert!("invoices".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_rewrite_dates_timestamp() {
        let mut value = json!({"created_at": "2024-03-01T12:00:00+00:00", "title": "x"});
        rewrite_dates(&mut value, ExportDateFormat::Timestamp);
        assert!(value["created_at"].is_i64());
        assert_eq!(value["title"], "x");
    }

    #[tokio::test]
    async fn test_csv_for_all_fails_before_any_fetch() {
        let service = setup().await;
        let result = service
            .export(
                EntityKind::All,
                ExportOverrides {
                    format: Some(ExportFormat::Csv),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ExportError::CsvForAll)));
    }

    #[tokio::test]
    async fn test_xlsx_and_pdf_are_not_implemented() {
        let service = setup().await;
        for format in [ExportFormat::Xlsx, ExportFormat::Pdf] {
            let result = service
                .export(
                    EntityKind::Services,
                    ExportOverrides {
                        format: Some(format),
                        ..Default::default()
                    },
                )
                .await;
            assert!(matches!(result, Err(ExportError::NotImplemented(_))));
        }
    }

    #[tokio::test]
    async fn test_json_export_nests_service_prices() {
        let service = setup().await;
        service
            .repos
            .services
            .create(service_input("Priced"))
            .await
            .unwrap();

        let file = service
            .export(EntityKind::Services, ExportOverrides::default())
            .await
            .unwrap();

        let body: Value = serde_json::from_slice(&file.bytes).unwrap();
        assert_eq!(body["type"], "services");
        assert_eq!(body["data"][0]["price"]["basic"], 100.0);
        assert_eq!(body["data"][0]["status"], "active");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_json_export_without_metadata_is_bare_array() {
        let service = setup().await;
        service
            .repos
            .services
            .create(service_input("Bare"))
            .await
            .unwrap();

        let file = service
            .export(
                EntityKind::Services,
                ExportOverrides {
                    include_metadata: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let body: Value = serde_json::from_slice(&file.bytes).unwrap();
        assert!(body.is_array());
        assert_eq!(body[0]["title"], "Bare");
    }

    #[tokio::test]
    async fn test_csv_export_counts_lines() {
        let service = setup().await;
        for name in ["One", "Two"] {
            service
                .repos
                .contact_messages
                .create(CreateContactMessageInput {
                    name: name.to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                    phone: None,
                    subject: "Hello, there".to_string(),
                    message: "Body".to_string(),
                    priority: None,
                })
                .await
                .unwrap();
        }

        let file = service
            .export(
                EntityKind::ContactMessages,
                ExportOverrides {
                    format: Some(ExportFormat::Csv),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let csv = String::from_utf8(file.bytes).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains("\"Hello, there\""));
    }

    #[tokio::test]
    async fn test_export_all_wraps_every_collection() {
        let service = setup().await;
        service
            .repos
            .services
            .create(service_input("Solo"))
            .await
            .unwrap();

        let file = service
            .export(
                EntityKind::All,
                ExportOverrides {
                    include_metadata: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let body: Value = serde_json::from_slice(&file.bytes).unwrap();
        for kind in EntityKind::SINGLE {
            assert!(body.get(kind.to_string()).is_some(), "missing {}", kind);
        }
        assert_eq!(body["services"][0]["title"], "Solo");
    }

    #[tokio::test]
    async fn test_default_filename_pattern() {
        let service = setup().await;
        let file = service
            .export(EntityKind::Faqs, ExportOverrides::default())
            .await
            .unwrap();

        assert!(file.filename.starts_with("assetmagnets_faqs_export_"));
        assert!(file.filename.ends_with(".json"));
    }

    #[tokio::test]
    async fn test_settings_round_trip_and_bad_stored_shape() {
        let service = setup().await;

        let custom = ExportSettings {
            format: ExportFormat::Csv,
            include_headers: false,
            date_format: ExportDateFormat::Timestamp,
            include_metadata: false,
            custom_filename: Some("snapshot.csv".to_string()),
        };
        service.save_settings(&custom).await.unwrap();

        let loaded = service.load_settings().await;
        assert_eq!(loaded.format, ExportFormat::Csv);
        assert_eq!(loaded.custom_filename.as_deref(), Some("snapshot.csv"));

        // A stored shape that no longer parses falls back to defaults
        service
            .repos
            .settings
            .set(EXPORT_SETTINGS_KEY, "not json")
            .await
            .unwrap();
        let fallback = service.load_settings().await;
        assert_eq!(fallback.format, ExportFormat::Json);
    }
}
