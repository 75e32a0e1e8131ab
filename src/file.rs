// src/file.rs
//
// Writes the generated module:
//
//   var <section> = {<code>: record, ...};\n\n     (one per section, registry order)
//   var shortUUID = {<id>: {scope, code}, ...};\n\n
//   export { shortUUID, <section>, ... };\n
//
// JSON is tab-indented. The file is a disposable artifact, overwritten per run.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::config::consts::ID_INDEX_BINDING;
use crate::error::{Result, ScrapeError};
use crate::merge::Merged;

/// Pretty JSON with one tab per level.
pub fn to_tab_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_binding<W: Write, T: Serialize>(out: &mut W, name: &str, value: &T) -> std::io::Result<String> {
    let json = to_tab_json(value).map_err(std::io::Error::other)?;
    write!(out, "var {name} = {json};\n\n")?;
    Ok(s!(name))
}

/// Stream the module to `out` in declaration order.
pub fn write_module<W: Write>(out: &mut W, merged: &Merged) -> std::io::Result<()> {
    let mut names = vec![s!(ID_INDEX_BINDING)];
    for (name, map) in &merged.sections {
        names.push(write_binding(out, name, map)?);
    }
    write_binding(out, ID_INDEX_BINDING, &merged.short_uuid)?;
    writeln!(out, "export {{ {} }};", names.join(", "))?;
    Ok(())
}

/// Whole module as a string.
pub fn render_module(merged: &Merged) -> Result<String> {
    let mut buf = Vec::new();
    write_module(&mut buf, merged).map_err(|e| ScrapeError::io("<memory>", e))?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Create/truncate `path` and write the module into it.
pub fn write_module_file(path: &Path, merged: &Merged) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = File::create(path).map_err(|e| ScrapeError::io(path, e))?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    write_module(&mut out, merged).map_err(|e| ScrapeError::io(path, e))?;
    out.flush().map_err(|e| ScrapeError::io(path, e))?;
    Ok(path.to_path_buf())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::io(
            dir,
            std::io::Error::other("path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ScrapeError::io(dir, e))?;
    }
    Ok(())
}
