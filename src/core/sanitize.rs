// src/core/sanitize.rs
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::consts::DOMAIN_PREFIX;

static DOMAIN_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^org\.bluetooth\.\w+\.").expect("domain prefix pattern is valid")
});

/// `org.bluetooth.<kind>.<rest>` → `<rest>`; anything else passes through.
pub fn strip_domain_prefix(code: &str) -> String {
    if !code.starts_with(DOMAIN_PREFIX) {
        return code.to_string();
    }
    DOMAIN_CODE.replace(code, "").into_owned()
}

/// Minimal HTML/XML entity decoding for the handful the vendor pages use.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Collapse runs of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}
