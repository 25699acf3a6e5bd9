// wob-catalog/src/catalog.rs

use serde::{Deserialize, Serialize};

use crate::load::CatalogError;

/// The MiniWoB registry shipped with the crate (format version 0.1).
pub const BUILTIN_CATALOG: &str = include_str!("../data/miniwobs.json");

/// Allowed modality tags, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, tag: &str) -> bool { self.0.iter().any(|t| t == tag) }
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.0.iter().map(String::as_str) }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/// One catalog entry. Every field may be missing in a loaded document;
/// the validator reports missing or empty fields instead of the loader rejecting them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TaskRecord {
    pub fn new<S: Into<String>>(
        id: impl Into<String>, filename: impl Into<String>, tags: impl IntoIterator<Item = S>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            filename: Some(filename.into()),
            tags: Some(tags.into_iter().map(Into::into).collect()),
            description: Some(description.into()),
        }
    }

    /// Key used for ordering checks; a missing id sorts as the empty string.
    pub fn sort_key(&self) -> &str { self.id.as_deref().unwrap_or("") }

    pub fn tags(&self) -> &[String] { self.tags.as_deref().unwrap_or(&[]) }

    pub fn has_tag(&self, tag: &str) -> bool { self.tags().iter().any(|t| t == tag) }

    /// Untagged tasks need both mouse and keyboard. Records without a `tags`
    /// field are malformed and never count as keyboard tasks.
    pub fn requires_keyboard(&self) -> bool { self.tags.as_ref().is_some_and(|t| t.is_empty()) }
}

/// Ordered task registry. Immutable once built: defects are found by
/// [`crate::validate`], never corrected here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    version: String,
    #[serde(rename = "TAGS")]
    tag_set: TagSet,
    #[serde(rename = "envs")]
    records: Vec<TaskRecord>,
}

impl Catalog {
    pub fn new(version: impl Into<String>, tag_set: TagSet, records: Vec<TaskRecord>) -> Self {
        Self { version: version.into(), tag_set, records }
    }

    /// Parses the embedded MiniWoB registry.
    pub fn builtin() -> Result<Self, CatalogError> { Self::parse(BUILTIN_CATALOG) }

    pub fn version(&self) -> &str { &self.version }
    pub fn tag_set(&self) -> &TagSet { &self.tag_set }
    pub fn records(&self) -> &[TaskRecord] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// First record with the given id.
    pub fn get(&self, id: &str) -> Option<&TaskRecord> {
        self.records.iter().find(|r| r.id.as_deref() == Some(id))
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TaskRecord> + 'a {
        self.records.iter().filter(move |r| r.has_tag(tag))
    }

    pub fn keyboard_required(&self) -> impl Iterator<Item = &TaskRecord> {
        self.records.iter().filter(|r| r.requires_keyboard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(
            "0.1",
            TagSet::new(["click", "drag", "mouse"]),
            vec![
                TaskRecord::new("wob.mini.ClickButton-v0", "click-button", ["click"], "Click on a specific button."),
                TaskRecord::new("wob.mini.DragBox-v0", "drag-box", ["drag"], "Drag the smaller box into the larger box."),
                TaskRecord::new("wob.mini.EnterText-v0", "enter-text", Vec::<String>::new(), "Enter given text."),
                TaskRecord { id: Some("wob.mini.Broken-v0".into()), ..Default::default() },
            ],
        )
    }

    #[test]
    fn get_finds_record_by_id() {
        let c = sample();
        assert_eq!(c.get("wob.mini.DragBox-v0").and_then(|r| r.filename.as_deref()), Some("drag-box"));
        assert!(c.get("wob.mini.Missing-v0").is_none());
    }

    #[test]
    fn with_tag_keeps_catalog_order() {
        let c = sample();
        let ids: Vec<_> = c.with_tag("click").map(TaskRecord::sort_key).collect();
        assert_eq!(ids, vec!["wob.mini.ClickButton-v0"]);
        assert_eq!(c.with_tag("mouse").count(), 0);
    }

    #[test]
    fn keyboard_required_skips_records_without_tags_field() {
        let c = sample();
        let ids: Vec<_> = c.keyboard_required().map(TaskRecord::sort_key).collect();
        assert_eq!(ids, vec!["wob.mini.EnterText-v0"]);
    }

    #[test]
    fn missing_id_sorts_as_empty() {
        assert_eq!(TaskRecord::default().sort_key(), "");
    }

    #[test]
    fn serializes_with_document_field_names() {
        let c = Catalog::new("0.1", TagSet::new(["click"]), vec![TaskRecord { filename: Some("x".into()), ..Default::default() }]);
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["TAGS"], serde_json::json!(["click"]));
        assert_eq!(v["envs"][0], serde_json::json!({"filename": "x"}));
    }
}
