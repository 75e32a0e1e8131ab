// src/specs/script_table.rs

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::config::consts::SCRIPT_TABLE_MARKER;
use crate::config::Section;
use crate::core::html::{self, Markup};
use crate::core::Page;
use crate::data::TableRow;
use crate::error::{Result, ScrapeError};

use super::html_table::report_missing;

static DATA_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*data:\s*").expect("data line pattern is valid"));
static DATA_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*data:\s*(.*?)\s*,?\s*$").expect("data value pattern is valid"));

/// Rows from the `DataTable` initializer script, in array order.
/// A missing script or unparsable data line is logged and yields no rows.
pub fn decode(page: &Page, section: &Section) -> Vec<TableRow> {
    let script = match locate_script(&page.body, section) {
        Ok(script) => script,
        Err(e) => {
            report_missing(page, &e);
            return Vec::new();
        }
    };
    match parse_script(&script, section) {
        Ok(rows) => rows,
        Err(e) => {
            loge!(section = section.name, "cannot parse DataTable: {e}");
            Vec::new()
        }
    }
}

/// Text of the first `<script>` mentioning the table initializer.
pub fn locate_script(doc: &str, section: &Section) -> Result<String> {
    let scripts = Markup::new(doc).blocks("script");
    if scripts.is_empty() {
        return Err(ScrapeError::MissingAnchor {
            section: section.name,
            detail: s!("page has no <script> elements"),
        });
    }
    scripts
        .into_iter()
        .map(html::inner_after_open_tag)
        .find(|text| text.contains(SCRIPT_TABLE_MARKER))
        .map(str::to_string)
        .ok_or_else(|| ScrapeError::MissingAnchor {
            section: section.name,
            detail: format!("no <script> containing {SCRIPT_TABLE_MARKER} (table {})", section.anchor),
        })
}

/// The JSON literal assigned on the `data:` line, prefix and any trailing comma removed.
pub fn data_literal(script: &str) -> Option<&str> {
    let line = script.lines().find(|l| DATA_LINE.is_match(l))?;
    logd!("{line}");
    Some(match DATA_VALUE.captures(line).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => line,
    })
}

pub fn parse_script(script: &str, section: &Section) -> Result<Vec<TableRow>> {
    let literal = data_literal(script).ok_or_else(|| ScrapeError::MissingAnchor {
        section: section.name,
        detail: s!("DataTable script has no `data:` line"),
    })?;
    let rows: Vec<Vec<Value>> = serde_json::from_str(literal)?;
    Ok(rows
        .iter()
        .filter_map(|row| {
            let decoded = parse_row(row);
            if decoded.is_none() {
                logw!(section = section.name, "skipping short DataTable row: {row:?}");
            }
            decoded
        })
        .collect())
}

/// Positional row: 0 id, 1 title, 2 domain-qualified code.
pub fn parse_row(row: &[Value]) -> Option<TableRow> {
    if row.len() < 3 {
        return None;
    }
    Some(TableRow {
        id: cell_text(&row[0]),
        title: cell_text(&row[1]),
        qualified_code: cell_text(&row[2]),
    })
}

fn cell_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => s!(),
        other => other.to_string(),
    }
}
