// src/core/html.rs
// Tag-block scanning over raw HTML. Case-insensitive on ASCII tag and
// attribute names; good enough for vendor listing pages, not a real parser.

use super::sanitize::{normalize_entities, normalize_ws};

/// ASCII-only lowercasing; keeps byte offsets aligned with the source.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// A source string plus its lowercased twin for offset-stable searching.
pub struct Markup<'a> {
    src: &'a str,
    lc: String,
}

impl<'a> Markup<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, lc: to_lower(src) }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    /// Offset of the next `<tag` opener at or after `from`.
    /// `<tr` does not match `<track`.
    pub fn find_open(&self, tag: &str, from: usize) -> Option<usize> {
        let pat = join!("<", tag);
        let mut pos = from;
        loop {
            let start = self.lc.get(pos..)?.find(&pat)? + pos;
            let after = start + pat.len();
            match self.lc.as_bytes().get(after) {
                Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(start),
                Some(_) => pos = after,
                None => return None,
            }
        }
    }

    /// `(start, end)` of the whole `<tag ...>...</tag>` block opening at `start`.
    /// Nested blocks of the same tag are skipped over.
    pub fn block(&self, tag: &str, start: usize) -> Option<(usize, usize)> {
        let open_end = self.src[start..].find('>')? + start + 1;
        if self.src[start..open_end].ends_with("/>") {
            return Some((start, open_end));
        }
        let close = join!("</", tag, ">");
        let mut depth = 1usize;
        let mut pos = open_end;
        loop {
            let next_close = self.lc.get(pos..)?.find(&close)? + pos;
            match self.find_open(tag, pos) {
                Some(o) if o < next_close => {
                    depth += 1;
                    pos = o + 1 + tag.len();
                }
                _ => {
                    depth -= 1;
                    pos = next_close + close.len();
                    if depth == 0 {
                        return Some((start, pos));
                    }
                }
            }
        }
    }

    /// Consecutive `<tag>` blocks, each scan resuming after the previous block.
    pub fn blocks(&self, tag: &str) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut pos = 0usize;
        while let Some(start) = self.find_open(tag, pos) {
            let Some((s, e)) = self.block(tag, start) else { break };
            out.push(&self.src[s..e]);
            pos = e;
        }
        out
    }

    /// First `<tag ... attr=value>` block, searching nested openers too.
    pub fn find_with_attr(&self, tag: &str, attr: &str, value: &str) -> Option<&'a str> {
        let mut pos = 0usize;
        while let Some(start) = self.find_open(tag, pos) {
            let opener = opener(&self.src[start..]);
            if attr_value(opener, attr).as_deref() == Some(value) {
                let (s, e) = self.block(tag, start)?;
                return Some(&self.src[s..e]);
            }
            pos = start + 1;
        }
        None
    }
}

/// `src` with every `<tag>...</tag>` block cut out. An unclosed opener is kept.
pub fn strip_blocks(src: &str, tag: &str) -> String {
    let m = Markup::new(src);
    let mut out = String::with_capacity(src.len());
    let mut pos = 0usize;
    while let Some(start) = m.find_open(tag, pos) {
        let Some((_, end)) = m.block(tag, start) else { break };
        out.push_str(&src[pos..start]);
        pos = end;
    }
    out.push_str(&src[pos..]);
    out
}

/// The `<tag ...>` part of a block.
pub fn opener(block: &str) -> &str {
    match block.find('>') {
        Some(i) => &block[..=i],
        None => block,
    }
}

/// Attribute value from an opening tag; double, single or no quotes.
pub fn attr_value(opener: &str, name: &str) -> Option<String> {
    let lc = to_lower(opener);
    let name = to_lower(name);
    let bytes = lc.as_bytes();
    let mut pos = 0usize;
    while let Some(rel) = lc[pos..].find(&name) {
        let at = pos + rel;
        pos = at + name.len();
        // must be a whole attribute name
        let before_ok = at > 0 && bytes[at - 1].is_ascii_whitespace();
        let rest = lc[pos..].trim_start();
        if !before_ok || !rest.starts_with('=') {
            continue;
        }
        let val_start = opener.len() - rest.len() + 1;
        let val = opener[val_start..].trim_start();
        let out = match val.as_bytes().first() {
            Some(q @ (b'"' | b'\'')) => {
                let q = *q as char;
                let end = val[1..].find(q)? + 1;
                &val[1..end]
            }
            _ => {
                let end = val
                    .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
                    .unwrap_or(val.len());
                &val[..end]
            }
        };
        return Some(normalize_entities(out));
    }
    None
}

/// Given a complete tag block like `<td ...>INNER</td>`,
/// return INNER (may still contain nested tags).
pub fn inner_after_open_tag(block: &str) -> &str {
    if let Some(open_end) = block.find('>') {
        if let Some(close_start) = block.rfind('<') {
            if close_start > open_end {
                return &block[open_end + 1..close_start];
            }
        }
    }
    ""
}

/// Cell blocks (`<td>` or `<th>`) of one row, in document order.
/// Whitespace and other text between cells is skipped.
pub fn cells(tr_block: &str) -> Vec<&str> {
    let m = Markup::new(inner_after_open_tag(tr_block));
    let mut out = Vec::new();
    let mut pos = 0usize;
    loop {
        let next = match (m.find_open("td", pos), m.find_open("th", pos)) {
            (Some(d), Some(h)) if h < d => Some(("th", h)),
            (Some(d), _) => Some(("td", d)),
            (None, Some(h)) => Some(("th", h)),
            (None, None) => None,
        };
        let Some((tag, start)) = next else { break };
        let Some((s, e)) = m.block(tag, start) else { break };
        out.push(&m.src()[s..e]);
        pos = e;
    }
    out
}

/// Remove all tags `<...>`, decode entities, collapse whitespace.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&out))
}

/// Text of a block: inner markup without tags.
pub fn block_text(block: &str) -> String {
    strip_tags(inner_after_open_tag(block))
}
