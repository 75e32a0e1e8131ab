// src/config/consts.rs

// Net config
pub const BASE_URI: &str = "https://www.bluetooth.com/specifications/";
pub const XML_API_BASE: &str = "https://www.bluetooth.com/api/gatt/XmlFile";
pub const MAX_REDIRECTS: usize = 5;
pub const USER_AGENT: &str = concat!("gatt_scrape/", env!("CARGO_PKG_VERSION"));

// Entity XML cache
pub const CACHE_DIR: &str = "cache";
pub const CACHE_EXT: &str = "xml";

// Output
pub const OUTPUT_FILE: &str = "uuids.js";
pub const ID_INDEX_BINDING: &str = "shortUUID";

// Assigned numbers
pub const DOMAIN_PREFIX: &str = "org.bluetooth.";

// Script-table decoding
pub const SCRIPT_TABLE_MARKER: &str = "DataTable";
