// src/specs/mod.rs
//! # Page and document decoders
//!
//! Each decoder knows where the ground truth lives in one vendor markup shape
//! and how to pull records out of it:
//!
//! - `html_table`: listing pages with `<table id=ANCHOR>`; one `<tr>` per entity,
//!   cells title / domain-qualified code / short id.
//! - `script_table`: listing pages that ship rows as a `DataTable({ data: [[...]] })`
//!   initializer inside a `<script>`; positional id / title / code.
//! - `entity`: the per-entity XML document; its `<Field>` elements and their
//!   parameter children (unit, reference, enumerations, bitfield, scalars).
//!
//! ## What does **not** live here
//! - Fetching, caching and concurrency (`scrape`, `store`).
//! - Merging across sections (`merge`) and output (`file`).
//!
//! Missing anchors and malformed embedded JSON are reported and decode to no
//! rows; a broken page never aborts the run from here.
pub mod entity;
pub mod html_table;
pub mod script_table;
