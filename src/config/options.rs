// src/config/options.rs
use std::path::PathBuf;

use reqwest::Url;

use super::consts::*;
use crate::error::{Result, ScrapeError};

/// Everything a run needs to know about where to read and write.
/// Defaults reproduce the parameterless run; tests point these at fixtures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub base_uri: String,
    pub xml_api_base: String,
    pub cache_dir: PathBuf,
    pub out_path: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            base_uri: s!(BASE_URI),
            xml_api_base: s!(XML_API_BASE),
            cache_dir: PathBuf::from(CACHE_DIR),
            out_path: PathBuf::from(OUTPUT_FILE),
        }
    }
}

impl RunOptions {
    /// Listing page for one section.
    pub fn section_url(&self, path: &str) -> String {
        join!(&self.base_uri, path)
    }

    /// Per-entity XML endpoint; expects the full domain-qualified name.
    /// The file name is query-encoded.
    pub fn entity_url(&self, entity: &str) -> Result<String> {
        let file = join!(entity, ".", CACHE_EXT);
        Url::parse_with_params(&self.xml_api_base, &[("xmlFileName", file.as_str())])
            .map(String::from)
            .map_err(|e| ScrapeError::BadUrl { url: self.xml_api_base.clone(), detail: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_follow_the_vendor_templates() {
        let opts = RunOptions::default();
        assert_eq!(
            opts.section_url("gatt/services"),
            "https://www.bluetooth.com/specifications/gatt/services"
        );
        assert_eq!(
            opts.entity_url("org.bluetooth.characteristic.heart_rate_measurement").unwrap(),
            "https://www.bluetooth.com/api/gatt/XmlFile?xmlFileName=org.bluetooth.characteristic.heart_rate_measurement.xml"
        );
    }

    #[test]
    fn entity_url_encodes_query_characters() {
        let opts = RunOptions::default();
        assert_eq!(
            opts.entity_url("a&b#c").unwrap(),
            "https://www.bluetooth.com/api/gatt/XmlFile?xmlFileName=a%26b%23c.xml"
        );
        let broken = RunOptions { xml_api_base: s!("not a url"), ..RunOptions::default() };
        assert!(matches!(broken.entity_url("x"), Err(ScrapeError::BadUrl { .. })));
    }
}
