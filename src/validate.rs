// wob-catalog/src/validate.rs

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    catalog::{Catalog, TaskRecord},
    defect::{Defect, DefectKind, InvalidTagDefect, MalformedRecordDefect, OrderingDefect},
    report::Reporter,
};

/// How many ordering violations [`check_ordering_with`] reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderingPolicy {
    /// Stop at the first position where sorted and catalog order disagree.
    #[default]
    FirstDivergenceOnly,
    /// Report every position where they disagree.
    EveryDivergence,
}

/// First out-of-set tag of each record, in record order. At most one defect per record.
pub fn check_tags(catalog: &Catalog) -> Vec<InvalidTagDefect<'_>> {
    let allowed = catalog.tag_set();
    catalog.records().iter().enumerate()
        .filter_map(|(index, record)| {
            let bad = record.tags.as_deref()?.iter().find(|t| !allowed.contains(t))?;
            Some(InvalidTagDefect { index, record, bad_tag: bad.as_str() })
        })
        .collect()
}

/// Records missing any of `id`, `filename`, `tags`, `description`, or with an
/// empty `id`, `filename` or `description`. An empty `tags` list is fine.
pub fn check_records(catalog: &Catalog) -> Vec<MalformedRecordDefect<'_>> {
    catalog.records().iter().enumerate()
        .filter(|(_, record)| is_malformed(record))
        .map(|(index, record)| MalformedRecordDefect { index, record })
        .collect()
}

fn is_malformed(record: &TaskRecord) -> bool {
    match (&record.id, &record.filename, &record.tags, &record.description) {
        (Some(id), Some(filename), Some(_), Some(description)) =>
            id.is_empty() || filename.is_empty() || description.is_empty(),
        _ => true,
    }
}

/// Compares the catalog against a stably sorted copy of its ids (ordinal
/// comparison, missing ids as `""`) and reports the first diverging record.
pub fn check_ordering(catalog: &Catalog) -> Vec<OrderingDefect<'_>> {
    check_ordering_with(catalog, OrderingPolicy::FirstDivergenceOnly)
}

pub fn check_ordering_with(catalog: &Catalog, policy: OrderingPolicy) -> Vec<OrderingDefect<'_>> {
    let records = catalog.records();
    let mut sorted: Vec<&str> = records.iter().map(TaskRecord::sort_key).collect();
    sorted.sort();

    let diverging = records.iter().zip(sorted).enumerate()
        .filter(|(_, (record, key))| record.sort_key() != *key)
        .map(|(index, (record, _))| OrderingDefect { index, record });
    match policy {
        OrderingPolicy::FirstDivergenceOnly => diverging.take(1).collect(),
        OrderingPolicy::EveryDivergence => diverging.collect(),
    }
}

/// Results of all three checks over one catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport<'a> {
    pub invalid_tags: Vec<InvalidTagDefect<'a>>,
    pub malformed_records: Vec<MalformedRecordDefect<'a>>,
    pub ordering: Vec<OrderingDefect<'a>>,
}

impl<'a> ValidationReport<'a> {
    pub fn is_clean(&self) -> bool { self.total() == 0 }

    pub fn total(&self) -> usize {
        self.invalid_tags.len() + self.malformed_records.len() + self.ordering.len()
    }

    /// Defects of one kind, in the shape reporters consume.
    pub fn defects(&self, kind: DefectKind) -> Vec<Defect<'a>> {
        match kind {
            DefectKind::InvalidTag => self.invalid_tags.iter().copied().map(Defect::from).collect(),
            DefectKind::MalformedRecord => self.malformed_records.iter().copied().map(Defect::from).collect(),
            DefectKind::Ordering => self.ordering.iter().copied().map(Defect::from).collect(),
        }
    }
}

pub fn validate(catalog: &Catalog) -> ValidationReport<'_> {
    ValidationReport {
        invalid_tags: check_tags(catalog),
        malformed_records: check_records(catalog),
        ordering: check_ordering(catalog),
    }
}

/// Runs every check and hands each list to `reporter`, once per check and in
/// [`DefectKind::ALL`] order, also when the list is empty.
pub fn validate_and_report<'a, R>(catalog: &'a Catalog, reporter: &mut R) -> Result<ValidationReport<'a>>
where
    R: Reporter + ?Sized,
{
    let report = validate(catalog);
    for kind in DefectKind::ALL {
        let defects = report.defects(kind);
        debug!(kind = kind.key(), count = defects.len(), "reporting check");
        reporter.report(kind, &defects)?;
    }
    info!(
        version = catalog.version(),
        records = catalog.len(),
        invalid_tags = report.invalid_tags.len(),
        malformed_records = report.malformed_records.len(),
        ordering = report.ordering.len(),
        "catalog validated"
    );
    Ok(report)
}
