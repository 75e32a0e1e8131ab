// src/config/sections.rs
//! Static registry of the listing pages that feed the generated module.
//!
//! Order matters: sections are merged and emitted in declaration order,
//! whatever order their fetches complete in.

/// Shape of the data on a listing page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionFormat {
    /// `<table id=ANCHOR>` with one `<tr>` per entity.
    HtmlTable,
    /// `<script>` calling `DataTable({ data: [[...]] })`.
    ScriptTable,
}

/// Per-section row handling, resolved by section name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowParser {
    /// Title, code and id straight from the row.
    Default,
    /// Default row plus the entity's `Field` list from its XML document.
    Characteristics,
}

impl RowParser {
    pub fn for_section(name: &str) -> Self {
        match name {
            "characteristics" => RowParser::Characteristics,
            _ => RowParser::Default,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub name: &'static str,
    /// Relative to `RunOptions::base_uri`.
    pub path: &'static str,
    /// Element id of the data table.
    pub anchor: &'static str,
    pub format: SectionFormat,
    /// Overrides the stripped-plural binding name.
    pub singular: Option<&'static str>,
}

impl Section {
    /// Binding / scope name: the override, or the name minus a trailing `s`.
    pub fn singular(&self) -> &'static str {
        match self.singular {
            Some(name) => name,
            None => self.name.strip_suffix('s').unwrap_or(self.name),
        }
    }

    pub fn row_parser(&self) -> RowParser {
        RowParser::for_section(self.name)
    }
}

pub const SECTIONS: &[Section] = &[
    Section {
        name: "units",
        path: "assigned-numbers/units",
        anchor: "DataTables_Table_0",
        format: SectionFormat::ScriptTable,
        singular: None,
    },
    Section {
        name: "characteristics",
        path: "gatt/characteristics",
        anchor: "gattTable",
        format: SectionFormat::HtmlTable,
        singular: None,
    },
    Section {
        name: "descriptors",
        path: "gatt/descriptors",
        anchor: "gattTable",
        format: SectionFormat::HtmlTable,
        singular: None,
    },
    Section {
        name: "services",
        path: "gatt/services",
        anchor: "gattTable",
        format: SectionFormat::HtmlTable,
        singular: None,
    },
];

pub fn find(name: &str) -> Option<&'static Section> {
    SECTIONS.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_and_singulars() {
        let names: Vec<_> = SECTIONS.iter().map(Section::singular).collect();
        assert_eq!(names, vec!["unit", "characteristic", "descriptor", "service"]);
    }

    #[test]
    fn singular_override_wins() {
        let s = Section {
            name: "addresses",
            path: "x",
            anchor: "t",
            format: SectionFormat::HtmlTable,
            singular: Some("address"),
        };
        assert_eq!(s.singular(), "address");
    }

    #[test]
    fn only_characteristics_are_enriched() {
        assert_eq!(find("characteristics").map(Section::row_parser), Some(RowParser::Characteristics));
        assert_eq!(find("services").map(Section::row_parser), Some(RowParser::Default));
        assert_eq!(RowParser::for_section("nope"), RowParser::Default);
    }
}
