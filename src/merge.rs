// src/merge.rs
//! Identifier merger.
//!
//! Folds each section's records into a code-keyed map and threads one
//! id-keyed index through all sections. Sections fold in registry order,
//! rows in source order; on key collisions the last write wins (the key
//! keeps its first position). Uniqueness is not checked.

use crate::data::{EnrichedRecord, GlobalIdIndex, IdEntry, SectionMap, SectionRecords};

/// Merged output of a run, ready for serialization.
#[derive(Clone, Debug, Default)]
pub struct Merged {
    /// (binding name, map), registry order.
    pub sections: Vec<(String, SectionMap)>,
    pub short_uuid: GlobalIdIndex,
}

/// Fold one section. The index is taken by value and handed back grown.
pub fn fold_section(
    scope: &str,
    records: Vec<EnrichedRecord>,
    mut ids: GlobalIdIndex,
) -> (SectionMap, GlobalIdIndex) {
    let mut map = SectionMap::with_capacity(records.len());
    for record in records {
        ids.insert(record.id.clone(), IdEntry { scope: s!(scope), code: record.code.clone() });
        map.insert(record.code.clone(), record);
    }
    (map, ids)
}

pub fn merge(collected: Vec<SectionRecords>) -> Merged {
    collected
        .into_iter()
        .fold(Merged::default(), |Merged { mut sections, short_uuid }, sr| {
            let scope = sr.section.singular();
            let (map, short_uuid) = fold_section(scope, sr.records, short_uuid);
            sections.push((s!(scope), map));
            Merged { sections, short_uuid }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sections;
    use crate::data::RawRecord;

    fn rec(code: &str, id: &str) -> EnrichedRecord {
        EnrichedRecord::bare(RawRecord { title: format!("T {code}"), code: s!(code), id: s!(id) })
    }

    #[test]
    fn fold_keys_by_code_and_indexes_ids() {
        let (map, ids) = fold_section("service", vec![rec("a", "1"), rec("b", "2")], GlobalIdIndex::new());
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(ids["2"], IdEntry { scope: s!("service"), code: s!("b") });
    }

    #[test]
    fn merging_twice_is_last_write_wins() {
        let list = vec![rec("a", "1"), rec("b", "2"), rec("a", "3")];
        let (map, ids) = fold_section("unit", list.clone(), GlobalIdIndex::new());
        let (map2, ids2) = fold_section("unit", list, ids.clone());
        assert_eq!(map.len(), 2);
        assert_eq!(map2.len(), 2);
        assert_eq!(map2["a"].id, "3");
        assert_eq!(ids.len(), 3);
        assert_eq!(ids2.len(), 3);
    }

    #[test]
    fn later_sections_overwrite_shared_ids() {
        let collected = vec![
            SectionRecords { section: sections::find("descriptors").unwrap(), records: vec![rec("d", "0x2900")] },
            SectionRecords { section: sections::find("services").unwrap(), records: vec![rec("s", "0x2900")] },
        ];
        let merged = merge(collected);
        let names: Vec<_> = merged.sections.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["descriptor", "service"]);
        assert_eq!(merged.short_uuid.len(), 1);
        assert_eq!(merged.short_uuid["0x2900"].scope, "service");
    }
}
