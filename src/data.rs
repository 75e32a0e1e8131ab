// src/data.rs
//
// Record shapes flowing through a run:
//
//   TableRow (as found on the page)
//     → RawRecord (code stripped)
//     → EnrichedRecord (+ fields from the entity XML)
//     → SectionMap / GlobalIdIndex (merge.rs)
//
// Everything here serializes straight into the generated module, so field
// order in the structs is the key order in the output.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::config::Section;
use crate::core::sanitize::strip_domain_prefix;

/// One data row as decoded from a listing page, code still domain-qualified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub title: String,
    pub qualified_code: String,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RawRecord {
    pub title: String,
    pub code: String,
    pub id: String,
}

impl RawRecord {
    pub fn from_row(row: &TableRow) -> Self {
        Self {
            title: row.title.clone(),
            code: strip_domain_prefix(&row.qualified_code),
            id: row.id.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnrichedRecord {
    pub title: String,
    pub code: String,
    pub id: String,
    pub fields: Vec<FieldDescriptor>,
}

impl EnrichedRecord {
    pub fn new(raw: RawRecord, fields: Vec<FieldDescriptor>) -> Self {
        let RawRecord { title, code, id } = raw;
        Self { title, code, id, fields }
    }

    /// No enrichment applies: empty field list.
    pub fn bare(raw: RawRecord) -> Self {
        Self::new(raw, Vec::new())
    }
}

/// One `<Field>`: its `name` attribute plus one entry per child element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    params: IndexMap<String, FieldParam>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), params: IndexMap::new() }
    }

    /// Later values for the same key replace earlier ones in place.
    /// A `name` child element overrides the attribute.
    pub fn set(&mut self, key: String, value: FieldParam) {
        if key == "name" {
            if let FieldParam::Text(text) = value {
                self.name = text;
                return;
            }
        }
        self.params.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldParam> {
        self.params.get(key)
    }

    pub fn unit(&self) -> Option<&str> {
        self.get("unit").and_then(FieldParam::as_text)
    }

    pub fn enumerations(&self) -> Option<&EnumerationMap> {
        match self.get("enumerations") {
            Some(FieldParam::Enumerations(map)) => Some(map),
            _ => None,
        }
    }

    pub fn bitfield(&self) -> Option<&[BitDescriptor]> {
        match self.get("bitfield") {
            Some(FieldParam::BitField(bits)) => Some(bits),
            _ => None,
        }
    }
}

impl Serialize for FieldDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.params.len()))?;
        map.serialize_entry("name", &self.name)?;
        for (k, v) in &self.params {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldParam {
    Text(String),
    Enumerations(EnumerationMap),
    BitField(Vec<BitDescriptor>),
}

impl FieldParam {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldParam::Text(t) => Some(t),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Enumeration {
    pub value: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<String>,
}

/// Enumeration key → entry, plus the two reserved-range buckets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnumerationMap {
    entries: IndexMap<String, Enumeration>,
    reserved: Vec<String>,
    reserved_for_future_use: Vec<String>,
}

impl EnumerationMap {
    pub const RESERVED: &'static str = "reserved";
    pub const RESERVED_FOR_FUTURE_USE: &'static str = "reservedforfutureuse";

    pub fn insert(&mut self, key: String, entry: Enumeration) {
        self.entries.insert(key, entry);
    }

    pub fn push_reserved(&mut self, range: String) {
        self.reserved.push(range);
    }

    pub fn push_reserved_for_future_use(&mut self, range: String) {
        self.reserved_for_future_use.push(range);
    }

    pub fn get(&self, key: &str) -> Option<&Enumeration> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn reserved(&self) -> &[String] {
        &self.reserved
    }

    pub fn reserved_for_future_use(&self) -> &[String] {
        &self.reserved_for_future_use
    }

    /// Normal entries only; the reserved buckets are not counted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for EnumerationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        if !self.reserved.is_empty() {
            map.serialize_entry(Self::RESERVED, &self.reserved)?;
        }
        if !self.reserved_for_future_use.is_empty() {
            map.serialize_entry(Self::RESERVED_FOR_FUTURE_USE, &self.reserved_for_future_use)?;
        }
        map.end()
    }
}

/// One `<Bit>` of a bitfield.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BitDescriptor {
    pub offset: String,
    pub size: String,
    pub name: String,
    pub enumerations: Option<EnumerationMap>,
}

/// A section's decoded records, in source row order.
#[derive(Clone, Debug)]
pub struct SectionRecords {
    pub section: &'static Section,
    pub records: Vec<EnrichedRecord>,
}

/// Stripped code → record, one per section.
pub type SectionMap = IndexMap<String, EnrichedRecord>;

/// Where a numeric id lives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IdEntry {
    pub scope: String,
    pub code: String,
}

/// Numeric id → (scope, code), across all sections.
pub type GlobalIdIndex = IndexMap<String, IdEntry>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_record_strips_code() {
        let row = TableRow {
            title: s!("Battery Level"),
            qualified_code: s!("org.bluetooth.characteristic.battery_level"),
            id: s!("0x2A19"),
        };
        let raw = RawRecord::from_row(&row);
        assert_eq!(raw.code, "battery_level");
        assert_eq!(raw.id, "0x2A19");
    }

    #[test]
    fn field_serializes_name_first_and_overwrites_in_place() {
        let mut f = FieldDescriptor::new("Flags");
        f.set(s!("requirement"), FieldParam::Text(s!("Mandatory")));
        f.set(s!("format"), FieldParam::Text(s!("8bit")));
        f.set(s!("requirement"), FieldParam::Text(s!("Optional")));
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, r#"{"name":"Flags","requirement":"Optional","format":"8bit"}"#);
    }

    #[test]
    fn enumeration_map_buckets_follow_entries() {
        let mut m = EnumerationMap::default();
        m.insert(s!("0"), Enumeration { value: s!("Off"), ..Default::default() });
        m.push_reserved(s!("2-255"));
        m.push_reserved_for_future_use(s!("1"));
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(
            json,
            r#"{"0":{"value":"Off","description":""},"reserved":["2-255"],"reservedforfutureuse":["1"]}"#
        );
    }

    #[test]
    fn len_and_is_empty_ignore_buckets() {
        let mut m = EnumerationMap::default();
        m.push_reserved(s!("0-255"));
        assert_eq!(m.len(), 0);
        assert!(m.is_empty());
        m.insert(s!("1"), Enumeration::default());
        assert_eq!(m.len(), 1);
        assert!(!m.is_empty());
    }

    #[test]
    fn bit_without_enumerations_is_null() {
        let bit = BitDescriptor { offset: s!("0"), size: s!("1"), name: s!("b"), enumerations: None };
        assert_eq!(
            serde_json::to_string(&bit).unwrap(),
            r#"{"offset":"0","size":"1","name":"b","enumerations":null}"#
        );
    }
}
