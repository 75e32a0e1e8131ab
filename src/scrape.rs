// src/scrape.rs
//
// Pipeline: section registry → (all sections at once) listing fetch + decode
//   → (all rows at once, characteristics only) entity XML cache-or-fetch
//   → merge → module file.
//
// Futures are joined positionally, so results come back in registry / row
// order regardless of which request finishes first. No concurrency cap.

use std::path::PathBuf;

use futures_util::future::try_join_all;

use crate::config::{RowParser, RunOptions, Section, SectionFormat, SECTIONS};
use crate::core::Transport;
use crate::data::{EnrichedRecord, RawRecord, SectionRecords, TableRow};
use crate::error::{Result, ScrapeError};
use crate::merge;
use crate::specs::{entity, html_table, script_table};
use crate::{file, store};

/// What a run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub out_path: PathBuf,
    /// (binding name, record count) per section, registry order.
    pub sections: Vec<(String, usize)>,
    pub ids: usize,
}

/// Full run: collect every section, merge, write the module.
pub async fn run(transport: &dyn Transport, opts: &RunOptions) -> Result<RunSummary> {
    let collected = collect_all(transport, opts, SECTIONS).await?;
    let merged = merge::merge(collected);
    file::write_module_file(&opts.out_path, &merged)?;

    let summary = RunSummary {
        out_path: opts.out_path.clone(),
        sections: merged.sections.iter().map(|(name, map)| (name.clone(), map.len())).collect(),
        ids: merged.short_uuid.len(),
    };
    logf!(out = %summary.out_path.display(), ids = summary.ids, "wrote module");
    Ok(summary)
}

/// All sections, fetched concurrently, returned in `sections` order.
pub async fn collect_all(
    transport: &dyn Transport,
    opts: &RunOptions,
    sections: &'static [Section],
) -> Result<Vec<SectionRecords>> {
    try_join_all(sections.iter().map(|s| collect_section(transport, opts, s))).await
}

pub async fn collect_section(
    transport: &dyn Transport,
    opts: &RunOptions,
    section: &'static Section,
) -> Result<SectionRecords> {
    let url = opts.section_url(section.path);
    logf!(section = section.name, %url, "fetching listing");
    let page = transport.get(&url).await?;
    if !page.is_success() {
        logw!(section = section.name, "{}", page.describe());
    }

    let rows = match section.format {
        SectionFormat::HtmlTable => html_table::decode(&page, section),
        SectionFormat::ScriptTable => script_table::decode(&page, section),
    };

    let records = match section.row_parser() {
        RowParser::Default => rows.iter().map(|r| EnrichedRecord::bare(RawRecord::from_row(r))).collect(),
        RowParser::Characteristics => {
            try_join_all(rows.iter().map(|r| enrich_row(transport, opts, r))).await?
        }
    };

    logf!(section = section.name, records = records.len(), "decoded");
    Ok(SectionRecords { section, records })
}

/// Default row plus the entity's fields. Fields win over row keys.
/// A code that is not a plain entity name is logged and left unenriched.
pub async fn enrich_row(transport: &dyn Transport, opts: &RunOptions, row: &TableRow) -> Result<EnrichedRecord> {
    let raw = RawRecord::from_row(row);
    let body = match acquire_entity(transport, opts, &row.qualified_code).await {
        Ok(body) => body,
        Err(ScrapeError::EntityName(name)) => {
            logw!(title = %row.title, "not fetching entity with unsafe name {name:?}");
            return Ok(EnrichedRecord::bare(raw));
        }
        Err(e) => return Err(e),
    };
    let fields = match entity::decode_fields(&body) {
        Ok(fields) => fields,
        Err(e) => {
            logw!(entity = %row.qualified_code, "unreadable entity XML: {e}");
            Vec::new()
        }
    };
    Ok(EnrichedRecord::new(raw, fields))
}

/// Cache first; on a miss fetch `<xml_api_base>?xmlFileName=<entity>.xml`
/// and store the body before returning it.
pub async fn acquire_entity(transport: &dyn Transport, opts: &RunOptions, entity: &str) -> Result<String> {
    let path = store::cache_path(&opts.cache_dir, entity)?;
    if let Some(body) = store::read_cached(&path).await {
        return Ok(body);
    }

    let url = opts.entity_url(entity)?;
    let page = transport.get(&url).await?;
    if !page.is_success() {
        return Err(ScrapeError::HttpStatus { url, status: page.status });
    }
    store::write_cached(&path, &page.body).await?;
    Ok(page.body)
}
