// wob-catalog/src/defect.rs

use serde::Serialize;
use std::fmt;

use crate::catalog::TaskRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectKind { InvalidTag, MalformedRecord, Ordering }

impl DefectKind {
    /// Order in which the checks run and are reported.
    pub const ALL: [DefectKind; 3] = [Self::InvalidTag, Self::MalformedRecord, Self::Ordering];

    pub fn key(&self) -> &'static str {
        match self {
            Self::InvalidTag => "invalid_tag",
            Self::MalformedRecord => "malformed_record",
            Self::Ordering => "ordering",
        }
    }

    /// Heading printed above a non-empty list of this kind.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::InvalidTag => "These envs have tags not defined in the TAGS array:",
            Self::MalformedRecord => "These envs have missing properties or invalid data:",
            Self::Ordering => "These envs are not sorted alphabetically by env \"ID\":",
        }
    }
}

/// A record referencing a tag outside the catalog's tag set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct InvalidTagDefect<'a> {
    pub index: usize,
    pub record: &'a TaskRecord,
    pub bad_tag: &'a str,
}

/// A record with a missing field, or an empty `id`, `filename` or `description`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MalformedRecordDefect<'a> {
    pub index: usize,
    pub record: &'a TaskRecord,
}

/// The record sitting where the sorted order first diverges from the catalog's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OrderingDefect<'a> {
    pub index: usize,
    pub record: &'a TaskRecord,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Defect<'a> {
    InvalidTag(InvalidTagDefect<'a>),
    MalformedRecord(MalformedRecordDefect<'a>),
    Ordering(OrderingDefect<'a>),
}

impl<'a> Defect<'a> {
    pub fn kind(&self) -> DefectKind {
        match self {
            Self::InvalidTag(_) => DefectKind::InvalidTag,
            Self::MalformedRecord(_) => DefectKind::MalformedRecord,
            Self::Ordering(_) => DefectKind::Ordering,
        }
    }

    pub fn record(&self) -> &'a TaskRecord {
        match self {
            Self::InvalidTag(d) => d.record,
            Self::MalformedRecord(d) => d.record,
            Self::Ordering(d) => d.record,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::InvalidTag(d) => d.index,
            Self::MalformedRecord(d) => d.index,
            Self::Ordering(d) => d.index,
        }
    }
}

impl<'a> From<InvalidTagDefect<'a>> for Defect<'a> {
    fn from(d: InvalidTagDefect<'a>) -> Self { Self::InvalidTag(d) }
}
impl<'a> From<MalformedRecordDefect<'a>> for Defect<'a> {
    fn from(d: MalformedRecordDefect<'a>) -> Self { Self::MalformedRecord(d) }
}
impl<'a> From<OrderingDefect<'a>> for Defect<'a> {
    fn from(d: OrderingDefect<'a>) -> Self { Self::Ordering(d) }
}

/// One report line, without the leading `- `.
impl fmt::Display for Defect<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTag(d) => {
                let id = d.record.id.as_deref().unwrap_or("<missing id>");
                write!(f, "{} has the invalid tag \"{}\".", id, d.bad_tag)
            }
            _ => {
                let json = serde_json::to_string(self.record()).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}
