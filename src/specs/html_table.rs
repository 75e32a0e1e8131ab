// src/specs/html_table.rs

use std::borrow::Cow;

use crate::config::Section;
use crate::core::html::{self, Markup};
use crate::core::Page;
use crate::data::TableRow;
use crate::error::{Result, ScrapeError};

/// Longest slice of a page body echoed into the log on a missing anchor.
const BODY_ECHO_LIMIT: usize = 4096;

/// Rows of the section's anchored table, in document order.
/// A missing table is logged with the page context and yields no rows.
pub fn decode(page: &Page, section: &Section) -> Vec<TableRow> {
    match locate_table(&page.body, section) {
        Ok(table) => parse_table(table),
        Err(e) => {
            report_missing(page, &e);
            Vec::new()
        }
    }
}

pub(crate) fn report_missing(page: &Page, err: &ScrapeError) {
    loge!("{err}");
    let cut = page
        .body
        .char_indices()
        .nth(BODY_ECHO_LIMIT)
        .map_or(page.body.len(), |(i, _)| i);
    logw!("{}\n{}", page.describe(), &page.body[..cut]);
}

/// The unique `<table>` whose id equals the section anchor.
pub fn locate_table<'a>(doc: &'a str, section: &Section) -> Result<&'a str> {
    let m = Markup::new(doc);
    if m.find_open("table", 0).is_none() {
        return Err(ScrapeError::MissingAnchor {
            section: section.name,
            detail: s!("page has no <table> elements"),
        });
    }
    m.find_with_attr("table", "id", section.anchor)
        .ok_or_else(|| ScrapeError::MissingAnchor {
            section: section.name,
            detail: format!("no <table id=\"{}\">", section.anchor),
        })
}

/// Body rows of a table block. Without a `<tbody>`, rows directly under
/// the table are used, minus `<thead>`/`<tfoot>` and header-only rows.
pub fn parse_table(table: &str) -> Vec<TableRow> {
    let inner = html::inner_after_open_tag(table);
    let m = Markup::new(inner);
    let body: Cow<'_, str> = match m.find_open("tbody", 0).and_then(|s| m.block("tbody", s)) {
        Some((s, e)) => Cow::Borrowed(html::inner_after_open_tag(&inner[s..e])),
        None => {
            logd!("table has no <tbody>; reading rows from the table itself");
            let rest = html::strip_blocks(inner, "thead");
            Cow::Owned(html::strip_blocks(&rest, "tfoot"))
        }
    };

    Markup::new(&body)
        .blocks("tr")
        .into_iter()
        .filter(|tr| !is_header_row(tr))
        .filter_map(|tr| {
            let row = parse_row(tr);
            if row.is_none() {
                logw!("skipping row with fewer than three cells: {}", html::block_text(tr));
            }
            row
        })
        .collect()
}

/// `<th>` cells only.
fn is_header_row(tr: &str) -> bool {
    let m = Markup::new(tr);
    m.find_open("td", 0).is_none() && m.find_open("th", 0).is_some()
}

/// Default row shape: cell 0 title, cell 1 domain-qualified code, cell 2 id.
pub fn parse_row(tr: &str) -> Option<TableRow> {
    let cells = html::cells(tr);
    if cells.len() < 3 {
        return None;
    }
    Some(TableRow {
        title: html::block_text(cells[0]),
        qualified_code: html::block_text(cells[1]),
        id: html::block_text(cells[2]),
    })
}
