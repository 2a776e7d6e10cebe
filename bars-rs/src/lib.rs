//! # bars-rs
//!
//! `bars-rs` is a pure Rust reader for the BARS audio container format.
//! It decodes containers, verifies their entry names and extracts the packed
//! audio streams to standalone files.
//!
//! ## Features
//! - Transparent unwrapping of zstd-compressed containers
//! - Header, checksum table and offset table parsing (little-endian containers)
//! - AMTA metadata records with CRC-32 name verification
//! - Asset extraction with extension lookup from the asset type tag
//! - No printing: progress and warnings go through a [`DiagnosticSink`](diagnostics::DiagnosticSink)
//!
//! ## Usage
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! bars-rs = "0.1"
//! ```
//!
//! ### Example: Listing and Extracting Assets
//! ```rust,no_run
//! use bars_rs::bars_archive::{output_dir_for, BarsArchive};
//! use bars_rs::diagnostics::LogSink;
//!
//! let input = "Object_BillboardNpcBowling.bars.zs";
//! let archive = BarsArchive::open(input, &mut LogSink).unwrap();
//!
//! // List all entries
//! for record in archive.records() {
//!     println!("Entry: {}", record.name);
//! }
//!
//! // Extract everything into out/Object_BillboardNpcBowling.bars.zs_out
//! archive.extract_to(output_dir_for("out", input), &mut LogSink).unwrap();
//! ```

pub mod amta_record;
pub mod bars_archive;
pub mod bars_asset;
pub mod bars_entry;
pub mod bars_header;
pub mod diagnostics;
pub mod error;
mod ext;
pub mod integrity;
pub mod version;
pub mod zstd_frame;

pub use ext::io_ext::Tag;
