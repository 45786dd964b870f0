//! # Marker Mill
//!
//! Converts a hand-maintained map content manifest into the asset tree a
//! static map viewer serves: one directory per marker plus a consolidated
//! `markers.json` index.
//!
//! Authors describe each marker exactly once in `material/material.json` —
//! where it sits, which photo becomes its thumbnail, which files to stage,
//! what its popup shows. The converter expands that into browser-ready form:
//!
//! ```text
//! material/material.json  →  content/markers/<dir>/  (thumb.jpg, article.html, staged copies)
//!                         →  content/markers.json    (index the viewer loads)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`manifest`] | Loads `material.json` into typed marker entries, rejecting malformed input |
//! | [`shortcuts`] | Precedence rules resolving shortcut fields into article/media sources |
//! | [`convert`] | The conversion itself — directories, thumbnails, copies, articles, index |
//! | [`imaging`] | Pure-Rust image operations: identify and bounded thumbnail |
//! | [`config`] | `config.toml` loading and validation (thumbnail bounds, JPEG quality) |
//! | [`output`] | CLI output formatting for convert progress and check results |
//!
//! # Design Decisions
//!
//! ## Fail-Fast, Index-Last
//!
//! The first marker error aborts the whole run, and the index is written only
//! after every marker succeeded — a served `markers.json` never references
//! assets that failed to materialize. Partially-written marker directories do
//! stay behind; re-running after a fix overwrites them deterministically, and
//! `--clean` resets the output tree wholesale.
//!
//! ## Shortcuts Over Schemas
//!
//! The manifest favors small shortcut fields (`simpleArticle`, `simpleImage`,
//! `imageComparison`) that the converter expands into full descriptors.
//! Anything it does not need to understand — literal `article` and `media`
//! descriptors, `groups`, coordinates — passes through verbatim, so the
//! manifest can express whatever the viewer understands even before this tool
//! learns about it.
//!
//! ## Pure-Rust Imaging
//!
//! Thumbnails are decoded, downscaled, and re-encoded with the `image` crate.
//! No ImageMagick, no system dependencies: the binary is self-contained and
//! produces identical output on any machine.
//!
//! ## Maud for Article Fragments
//!
//! `article.html` is rendered with [Maud](https://maud.lambda.xyz/), so the
//! wrapper markup is compile-time checked. The author's text is inserted
//! unescaped: fragments are author-owned HTML, and `<em>` inside a sentence
//! must survive the trip.

pub mod config;
pub mod convert;
pub mod imaging;
pub mod manifest;
pub mod output;
pub mod shortcuts;

#[cfg(test)]
pub(crate) mod test_helpers;
