//! # docbundle
//!
//! A CLI utility that bundles scattered documentation sources into one
//! combined document: standalone markdown files from a docs site, README
//! guides from one or two repository checkouts, and per-package code example
//! files.
//!
//! ## Current Features
//!
//! - Recursive collection of markdown/MDX docs and TypeScript example files
//! - Front-matter extraction and heading renormalization for nested sections
//! - Output as a paginated A4 PDF (headless Chromium) or one markdown file
//!
//! ## Usage
//!
//! ```bash
//! docbundle ./docs ./effect ./effect-http --format md
//! ```

mod assembler;
mod code_examples;
mod collector;
mod exporter;
mod front_matter;
mod markdown;

pub use assembler::{Assembler, OutputFormat};
pub use collector::{collect_files, find_example_dirs, SourceFile};
pub use exporter::{export_pdf, write_markdown, PdfOptions};
pub use front_matter::{split_front_matter, FrontMatter};
