pub mod catalog;
pub mod config;
pub mod defect;
pub mod load;
pub mod report;
pub mod validate;

pub use catalog::{Catalog, TagSet, TaskRecord, BUILTIN_CATALOG};
pub use config::{Config, ConfigManager, Scope};
pub use defect::{Defect, DefectKind, InvalidTagDefect, MalformedRecordDefect, OrderingDefect};
pub use load::CatalogError;
pub use report::{JsonReporter, ReportFormat, Reporter, TextReporter, TracingReporter};
pub use validate::{
    check_ordering, check_ordering_with, check_records, check_tags, validate, validate_and_report,
    OrderingPolicy, ValidationReport,
};
