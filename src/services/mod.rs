//! Business services
//!
//! Logic that sits above the repositories: the export pipeline and
//! default-data seeding.

pub mod export;
pub mod seed;

pub use export::{
    EntityKind, ExportError, ExportFile, ExportFormat, ExportOverrides, ExportRepos,
    ExportService, ExportSettings,
};
pub use seed::{SeedReport, SeedService};
