// tests/common/mod.rs
//
// In-memory transport: canned bodies by URL, optional per-URL delay,
// every request counted and every completion recorded.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use gatt_scrape::{Page, RunOptions, Transport};

pub const BASE: &str = "https://example.test/specifications/";
pub const XML_API: &str = "https://example.test/api/gatt/XmlFile";

#[derive(Default)]
pub struct FakeTransport {
    pages: HashMap<String, (u16, String)>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
    completed: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), (200, body.into()));
        self
    }

    pub fn with_status(mut self, url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), (status, body.into()));
        self
    }

    /// Hold the response for `url` back by `ms` milliseconds.
    pub fn delayed(mut self, url: impl Into<String>, ms: u64) -> Self {
        self.delays.insert(url.into(), Duration::from_millis(ms));
        self
    }

    /// URLs in the order their responses were handed back.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls().iter().filter(|u| u.as_str() == url).count()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> gatt_scrape::Result<Page> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        self.completed.lock().unwrap().push(url.to_string());
        let (status, body) = self
            .pages
            .get(url)
            .cloned()
            .unwrap_or((404, String::from("not found")));
        Ok(Page { url: url.to_string(), status, headers: Vec::new(), body })
    }
}

pub fn options(dir: &Path) -> RunOptions {
    RunOptions {
        base_uri: BASE.to_string(),
        xml_api_base: XML_API.to_string(),
        cache_dir: dir.join("cache"),
        out_path: dir.join("uuids.js"),
    }
}

pub fn entity_url(entity: &str) -> String {
    format!("{XML_API}?xmlFileName={entity}.xml")
}

/// `<table id="gattTable">` listing page with (title, code, id) rows.
pub fn html_listing(rows: &[(&str, &str, &str)]) -> String {
    let mut body = String::from(
        "<html><body><table id=\"gattTable\"><thead><tr><th>Name</th><th>Type</th><th>Number</th></tr></thead><tbody>\n",
    );
    for (title, code, id) in rows {
        body.push_str(&format!("  <tr>\n    <td>{title}</td>\n    <td>{code}</td>\n    <td>{id}</td>\n  </tr>\n"));
    }
    body.push_str("</tbody></table></body></html>");
    body
}

/// DataTable script listing page with (id, title, code) rows.
pub fn script_listing(rows: &[(&str, &str, &str)]) -> String {
    let data: Vec<[&str; 3]> = rows.iter().map(|(id, title, code)| [*id, *title, *code]).collect();
    format!(
        "<html><head><script>\n$('#DataTables_Table_0').DataTable({{\n    data: {},\n    paging: false\n}});\n</script></head></html>",
        serde_json::to_string(&data).unwrap()
    )
}

pub fn characteristic_xml(field: &str, unit: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Characteristic name="x" type="x" uuid="0000">
  <Value>
    <Field name="{field}">
      <Requirement>Mandatory</Requirement>
      <Format>uint8</Format>
      <Unit>{unit}</Unit>
    </Field>
  </Value>
</Characteristic>"#
    )
}
