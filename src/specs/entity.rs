// src/specs/entity.rs
//! Per-entity XML (`org.bluetooth.characteristic.*.xml`): `<Field>` decoding.
//!
//! Every child element of a `<Field>` becomes one `(key, value)` pair keyed by
//! its lowercased local name:
//!
//! | element          | value                                            |
//! |------------------|--------------------------------------------------|
//! | `Unit`           | text, domain prefix stripped                     |
//! | `Reference`      | text, domain prefix stripped                     |
//! | `Enumerations`   | [`EnumerationMap`]                               |
//! | `BitField`       | one [`BitDescriptor`] per `<Bit>` descendant     |
//! | anything else    | raw text content                                 |
//!
//! The vendor sometimes publishes a reserved code as a normal
//! `<Enumeration value="Reserved for future use">`. Those keys go to the
//! `reservedforfutureuse` bucket instead of the entry map.

use crate::core::sanitize::strip_domain_prefix;
use crate::core::xml::{self, Element};
use crate::data::{BitDescriptor, Enumeration, EnumerationMap, FieldDescriptor, FieldParam};
use crate::error::Result;

const RFU_VALUE: &str = "reserved for future use";

/// All `<Field>` elements of the document, in document order.
/// No fields is a normal outcome for some entities.
pub fn decode_fields(doc: &str) -> Result<Vec<FieldDescriptor>> {
    let root = xml::parse(doc)?;
    Ok(root.descendants("Field").into_iter().map(decode_field).collect())
}

pub fn decode_field(field: &Element) -> FieldDescriptor {
    let mut out = FieldDescriptor::new(field.attr("name").unwrap_or_default());
    for child in field.elements() {
        let (key, value) = decode_param(&child.name, child);
        out.set(key, value);
    }
    out
}

/// One field parameter element → `(lowercased name, value)`.
pub fn decode_param(name: &str, el: &Element) -> (String, FieldParam) {
    let key = name.to_lowercase();
    let value = match key.as_str() {
        "unit" | "reference" => FieldParam::Text(strip_domain_prefix(el.text_content().trim())),
        "enumerations" => FieldParam::Enumerations(decode_enumerations(el)),
        "bitfield" => FieldParam::BitField(decode_bitfield(el)),
        _ => FieldParam::Text(el.text_content()),
    };
    (key, value)
}

/// Fold `<Enumeration>`, `<Reserved>` and `<ReservedForFutureUse>` children.
pub fn decode_enumerations(el: &Element) -> EnumerationMap {
    el.elements().fold(EnumerationMap::default(), |mut map, child| {
        match child.name.to_lowercase().as_str() {
            "reserved" => map.push_reserved(range(child)),
            "reservedforfutureuse" => map.push_reserved_for_future_use(range(child)),
            "enumeration" => {
                let key = s!(child.attr("key").unwrap_or_default());
                let value = child.attr("value").unwrap_or_default();
                if value.to_lowercase() == RFU_VALUE {
                    map.push_reserved_for_future_use(key);
                } else {
                    map.insert(
                        key,
                        Enumeration {
                            value: s!(value),
                            description: s!(child.attr("description").unwrap_or_default()),
                            requires: child.attr("requires").map(str::to_string),
                        },
                    );
                }
            }
            other => logd!("ignoring <{other}> inside <Enumerations>"),
        }
        map
    })
}

/// `start-end`, or just `start` when both ends agree.
pub fn range(el: &Element) -> String {
    let start = el.attr("start").unwrap_or_default();
    let end = el.attr("end").unwrap_or_default();
    if start == end { s!(start) } else { join!(start, "-", end) }
}

/// Every `<Bit>` under the bitfield. The vendor calls the offset `index`.
pub fn decode_bitfield(el: &Element) -> Vec<BitDescriptor> {
    el.descendants("Bit")
        .into_iter()
        .map(|bit| BitDescriptor {
            offset: s!(bit.attr("index").or_else(|| bit.attr("offset")).unwrap_or_default()),
            size: s!(bit.attr("size").unwrap_or_default()),
            name: s!(bit.attr("name").unwrap_or_default()),
            enumerations: bit
                .elements()
                .find(|c| c.name.eq_ignore_ascii_case("enumerations"))
                .map(decode_enumerations),
        })
        .collect()
}
