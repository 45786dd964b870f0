//! Manifest conversion.
//!
//! Stage 2 of the pipeline, and the bulk of the tool: takes the loaded
//! manifest and produces the marker asset tree plus the index document the
//! map viewer reads.
//!
//! ## Per-marker processing
//!
//! Each marker is processed in manifest order, with these effects:
//!
//! 1. Reject a `markerDirectory` that has already been seen in this run.
//! 2. Create `<outputRoot>/<markerDirectory>` if absent (single-level create;
//!    the output root itself must already exist).
//! 3. `thumb` present: downscale the source into the bounding box and write
//!    `thumb.jpg` into the marker directory.
//! 4. Copy each `copy` directive's file from the input root into the marker
//!    directory.
//! 5. Resolve the article source; `simpleArticle` synthesizes `article.html`.
//! 6. Resolve the media source into its index descriptor.
//! 7. Emit the normalized record (placeholder name, verbatim coords).
//!
//! The run is fail-fast: the first error aborts everything, already-written
//! directories and files stay behind, and the index is only written after the
//! last marker succeeded.
//!
//! ## Output Structure
//!
//! ```text
//! content/
//! ├── markers.json               # Generated index (groups + markers)
//! └── markers/
//!     ├── town-hall/
//!     │   ├── thumb.jpg          # Downscaled from the marker's `thumb` source
//!     │   ├── article.html       # Synthesized from `simpleArticle`
//!     │   └── 1900.png           # Staged by a `copy` directive
//!     └── old-market/
//!         └── ...
//! ```

use crate::config::ConverterConfig;
use crate::imaging::{
    BackendError, ImageBackend, Quality, RustBackend, ThumbnailConfig, create_thumbnail,
};
use crate::manifest::{self, Manifest, MarkerInput};
use crate::shortcuts::{ArticleSource, MediaSource, article_source, media_source};
use maud::{PreEscaped, html};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Filename of the generated index, resolved under the web root.
pub const INDEX_FILENAME: &str = "markers.json";
/// Thumbnail filename inside each marker directory.
pub const THUMB_FILENAME: &str = "thumb.jpg";
/// Synthesized article filename inside each marker directory.
pub const ARTICLE_FILENAME: &str = "article.html";
/// Name given to every generated marker, intended for manual post-editing
/// of the index.
pub const PLACEHOLDER_NAME: &str = "Placeholder Marker Name";

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Manifest(#[from] manifest::ManifestError),
    #[error("marker directory '{0}' is used by more than one marker")]
    DuplicateDirectory(String),
    #[error("source file not found: {0}")]
    MissingSource(PathBuf),
    #[error("failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    #[error("thumbnail generation failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot clean output root {0}: directory does not exist")]
    CleanMissingRoot(PathBuf),
    #[error("failed to remove output root {path}: {source}")]
    RemoveRoot {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolved file-system layout for one conversion run.
///
/// The output root is always `<web_root>/<markers_dir>`, so the browser-facing
/// path of a marker directory is a plain forward-slash join of the markers
/// directory name and the marker's directory — no platform separators leak
/// into the index.
#[derive(Debug, Clone)]
pub struct ConvertPaths {
    input_root: PathBuf,
    web_root: PathBuf,
    markers_dir: String,
}

impl ConvertPaths {
    pub fn new(
        input_root: impl Into<PathBuf>,
        web_root: impl Into<PathBuf>,
        markers_dir: impl Into<String>,
    ) -> Self {
        Self {
            input_root: input_root.into(),
            web_root: web_root.into(),
            markers_dir: markers_dir.into(),
        }
    }

    /// The input root holding `material.json` and all source files.
    pub fn input_root(&self) -> &Path {
        &self.input_root
    }

    /// `<input_root>/material.json`
    pub fn manifest_path(&self) -> PathBuf {
        self.input_root.join(manifest::MANIFEST_FILENAME)
    }

    /// `<web_root>/markers.json`
    pub fn index_path(&self) -> PathBuf {
        self.web_root.join(INDEX_FILENAME)
    }

    /// `<web_root>/<markers_dir>` — the root that receives marker directories.
    pub fn output_root(&self) -> PathBuf {
        self.web_root.join(&self.markers_dir)
    }

    /// On-disk directory for one marker.
    pub fn marker_dir(&self, directory: &str) -> PathBuf {
        self.output_root().join(directory)
    }

    /// Browser-facing path of one marker directory, forward-slash joined.
    pub fn marker_web_dir(&self, directory: &str) -> String {
        if self.markers_dir.is_empty() {
            directory.to_string()
        } else {
            format!("{}/{}", self.markers_dir, directory)
        }
    }
}

/// The generated index document: pass-through groups plus normalized markers.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerDocument {
    pub groups: Value,
    pub markers: Vec<MarkerRecord>,
}

/// One normalized marker entry in the index.
///
/// Optional fields are omitted from the JSON when absent (never `null`).
#[derive(Debug, Clone, Serialize)]
pub struct MarkerRecord {
    pub name: String,
    pub coords: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<ArticleRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRecord>,
}

/// Article descriptor as serialized into the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArticleRecord {
    /// Synthesized from `simpleArticle`: points at the written `article.html`.
    Html {
        #[serde(rename = "type")]
        kind: String,
        src: String,
    },
    /// Author-provided descriptor, emitted verbatim.
    Literal(Value),
}

impl ArticleRecord {
    fn html(src: String) -> Self {
        Self::Html {
            kind: "html".to_string(),
            src,
        }
    }
}

/// Media descriptor as serialized into the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MediaRecord {
    /// Synthesized from `simpleImage`.
    Image {
        #[serde(rename = "type")]
        kind: String,
        src: String,
    },
    /// Synthesized from `imageComparison`.
    Comparison {
        #[serde(rename = "type")]
        kind: String,
        #[serde(rename = "srcBack")]
        src_back: String,
        #[serde(rename = "srcFront")]
        src_front: String,
    },
    /// Author-provided descriptor, emitted verbatim.
    Literal(Value),
}

impl MediaRecord {
    fn image(src: String) -> Self {
        Self::Image {
            kind: "image".to_string(),
            src,
        }
    }

    fn comparison(src_back: String, src_front: String) -> Self {
        Self::Comparison {
            kind: "imageComparison".to_string(),
            src_back,
            src_front,
        }
    }
}

/// Non-fatal diagnostic produced while converting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertWarning {
    MissingArticle { directory: String },
    MissingMedia { directory: String },
}

impl fmt::Display for ConvertWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertWarning::MissingArticle { directory } => {
                write!(f, "marker '{directory}' has no article source")
            }
            ConvertWarning::MissingMedia { directory } => {
                write!(f, "marker '{directory}' has no media source")
            }
        }
    }
}

/// Progress event emitted while converting.
#[derive(Debug, Clone)]
pub enum ConvertEvent {
    MarkerStarted { directory: String },
    DirectoryCreated { path: PathBuf },
    DirectoryExists { path: PathBuf },
    FileCopied { from: PathBuf, to: PathBuf },
    ThumbnailWritten { width: u32, height: u32 },
    ArticleWritten,
    Warning(ConvertWarning),
}

/// Counters for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub markers: usize,
    pub directories_created: usize,
    pub files_copied: usize,
    pub thumbnails: usize,
    pub articles: usize,
}

impl fmt::Display for ConvertStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} markers, {} directories created, {} files copied, {} thumbnails, {} articles",
            self.markers,
            self.directories_created,
            self.files_copied,
            self.thumbnails,
            self.articles
        )
    }
}

/// Everything a conversion run produced besides its file-system effects.
#[derive(Debug)]
pub struct ConvertReport {
    pub document: MarkerDocument,
    pub warnings: Vec<ConvertWarning>,
    pub stats: ConvertStats,
}

/// Accumulator threaded through marker processing: the growing record list
/// plus the directory names seen so far. Local to a single run.
#[derive(Debug, Default)]
struct Accumulator {
    records: Vec<MarkerRecord>,
    seen_directories: HashSet<String>,
    warnings: Vec<ConvertWarning>,
    stats: ConvertStats,
}

/// Convert with the production imaging backend. See [`convert_with_backend`].
pub fn convert(
    paths: &ConvertPaths,
    config: &ConverterConfig,
    events: Option<Sender<ConvertEvent>>,
) -> Result<ConvertReport, ConvertError> {
    convert_with_backend(&RustBackend::new(), paths, config, events)
}

/// Run the full conversion using a specific imaging backend (allows testing
/// with a mock).
///
/// Loads the manifest, processes every marker in manifest order, and writes
/// the index only after the last marker succeeded — a failed run leaves no
/// new index behind.
pub fn convert_with_backend(
    backend: &impl ImageBackend,
    paths: &ConvertPaths,
    config: &ConverterConfig,
    events: Option<Sender<ConvertEvent>>,
) -> Result<ConvertReport, ConvertError> {
    let manifest = manifest::load(&paths.manifest_path())?;

    let thumbnail_config = ThumbnailConfig {
        bounds: config.thumbnails.bounds(),
        quality: Quality::new(config.thumbnails.quality),
    };

    let mut acc = Accumulator::default();
    for marker in &manifest.markers {
        process_marker(
            backend,
            paths,
            &thumbnail_config,
            marker,
            &mut acc,
            events.as_ref(),
        )?;
    }
    acc.stats.markers = acc.records.len();

    let document = MarkerDocument {
        groups: manifest.groups,
        markers: acc.records,
    };
    write_index(&paths.index_path(), &document)?;

    Ok(ConvertReport {
        document,
        warnings: acc.warnings,
        stats: acc.stats,
    })
}

fn process_marker(
    backend: &impl ImageBackend,
    paths: &ConvertPaths,
    thumbnails: &ThumbnailConfig,
    marker: &MarkerInput,
    acc: &mut Accumulator,
    events: Option<&Sender<ConvertEvent>>,
) -> Result<(), ConvertError> {
    let directory = marker.marker_directory.as_str();
    emit(events, ConvertEvent::MarkerStarted {
        directory: directory.to_string(),
    });

    if !acc.seen_directories.insert(directory.to_string()) {
        return Err(ConvertError::DuplicateDirectory(directory.to_string()));
    }

    let output_dir = paths.marker_dir(directory);
    let web_dir = paths.marker_web_dir(directory);
    if output_dir.is_dir() {
        emit(events, ConvertEvent::DirectoryExists {
            path: output_dir.clone(),
        });
    } else {
        fs::create_dir(&output_dir).map_err(|e| ConvertError::CreateDirectory {
            path: output_dir.clone(),
            source: e,
        })?;
        acc.stats.directories_created += 1;
        emit(events, ConvertEvent::DirectoryCreated {
            path: output_dir.clone(),
        });
    }

    let thumb = match &marker.thumb {
        Some(thumb_source) => {
            let source = paths.input_root().join(thumb_source);
            if !source.exists() {
                return Err(ConvertError::MissingSource(source));
            }
            let dims = create_thumbnail(
                backend,
                &source,
                &output_dir.join(THUMB_FILENAME),
                thumbnails,
            )?;
            acc.stats.thumbnails += 1;
            emit(events, ConvertEvent::ThumbnailWritten {
                width: dims.width,
                height: dims.height,
            });
            Some(format!("{web_dir}/{THUMB_FILENAME}"))
        }
        None => None,
    };

    for directive in &marker.copy {
        let from = paths.input_root().join(&directive.from);
        let to = output_dir.join(&directive.to);
        if !from.exists() {
            return Err(ConvertError::MissingSource(from));
        }
        fs::copy(&from, &to).map_err(|e| ConvertError::Copy {
            from: from.clone(),
            to: to.clone(),
            source: e,
        })?;
        acc.stats.files_copied += 1;
        emit(events, ConvertEvent::FileCopied { from, to });
    }

    let article = match article_source(marker) {
        ArticleSource::SimpleText(text) => {
            write_article(&output_dir.join(ARTICLE_FILENAME), text)?;
            acc.stats.articles += 1;
            emit(events, ConvertEvent::ArticleWritten);
            Some(ArticleRecord::html(format!("{web_dir}/{ARTICLE_FILENAME}")))
        }
        ArticleSource::Literal(value) => Some(ArticleRecord::Literal(value.clone())),
        ArticleSource::None => {
            warn(acc, events, ConvertWarning::MissingArticle {
                directory: directory.to_string(),
            });
            None
        }
    };

    let media = match media_source(marker) {
        MediaSource::SingleImage(file) => Some(MediaRecord::image(format!("{web_dir}/{file}"))),
        MediaSource::Comparison { back, front } => Some(MediaRecord::comparison(
            format!("{web_dir}/{back}"),
            format!("{web_dir}/{front}"),
        )),
        MediaSource::Literal(value) => Some(MediaRecord::Literal(value.clone())),
        MediaSource::None => {
            warn(acc, events, ConvertWarning::MissingMedia {
                directory: directory.to_string(),
            });
            None
        }
    };

    acc.records.push(MarkerRecord {
        name: PLACEHOLDER_NAME.to_string(),
        coords: marker.lat_long.clone(),
        thumb,
        article,
        media,
    });

    Ok(())
}

/// Render the article fragment. The text goes in unescaped — authors own any
/// markup inside their fragments.
fn render_article(text: &str) -> String {
    html! { p { (PreEscaped(text)) } }.into_string()
}

fn write_article(path: &Path, text: &str) -> Result<(), ConvertError> {
    fs::write(path, render_article(text)).map_err(|e| ConvertError::WriteOutput {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Serialize the index as pretty-printed JSON with 4-space indentation,
/// overwriting any existing file at `path`.
pub fn write_index(path: &Path, document: &MarkerDocument) -> Result<(), ConvertError> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document
        .serialize(&mut ser)
        .map_err(|e| ConvertError::WriteOutput {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

    fs::write(path, buf).map_err(|e| ConvertError::WriteOutput {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Cleanup Mode pre-pass: recursively delete the output root, then recreate
/// it as an empty directory.
///
/// Fails when the root does not exist — same contract as normal processing,
/// which expects the caller to have created the root.
pub fn clean_output_root(output_root: &Path) -> Result<(), ConvertError> {
    if !output_root.exists() {
        return Err(ConvertError::CleanMissingRoot(output_root.to_path_buf()));
    }
    fs::remove_dir_all(output_root).map_err(|e| ConvertError::RemoveRoot {
        path: output_root.to_path_buf(),
        source: e,
    })?;
    fs::create_dir(output_root).map_err(|e| ConvertError::CreateDirectory {
        path: output_root.to_path_buf(),
        source: e,
    })
}

// ============================================================================
// Dry-run validation
// ============================================================================

/// What `check` found for one marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerCheck {
    pub directory: String,
    /// Which article rule would apply: `simpleArticle`, `literal`, `missing`.
    pub article_kind: &'static str,
    /// Which media rule would apply: `simpleImage`, `imageComparison`,
    /// `literal`, `missing`.
    pub media_kind: &'static str,
    /// Referenced `thumb`/`copy` sources that do not exist on disk.
    pub missing_sources: Vec<PathBuf>,
}

/// Outcome of a dry-run validation pass.
#[derive(Debug)]
pub struct CheckReport {
    pub markers: Vec<MarkerCheck>,
    pub warnings: Vec<ConvertWarning>,
}

impl CheckReport {
    /// True when every referenced source file exists.
    pub fn sources_ok(&self) -> bool {
        self.markers.iter().all(|m| m.missing_sources.is_empty())
    }
}

/// Validate a loaded manifest without touching the file system.
///
/// Runs the same uniqueness check as a real conversion, resolves every
/// article/media source, and verifies that `thumb` and `copy` sources exist
/// under the input root. Nothing is created or written.
pub fn check_manifest(
    manifest: &Manifest,
    paths: &ConvertPaths,
) -> Result<CheckReport, ConvertError> {
    let mut seen_directories: HashSet<String> = HashSet::new();
    let mut markers = Vec::with_capacity(manifest.markers.len());
    let mut warnings = Vec::new();

    for marker in &manifest.markers {
        let directory = marker.marker_directory.clone();
        if !seen_directories.insert(directory.clone()) {
            return Err(ConvertError::DuplicateDirectory(directory));
        }

        let mut missing_sources = Vec::new();
        if let Some(thumb) = &marker.thumb {
            let source = paths.input_root().join(thumb);
            if !source.exists() {
                missing_sources.push(source);
            }
        }
        for directive in &marker.copy {
            let from = paths.input_root().join(&directive.from);
            if !from.exists() {
                missing_sources.push(from);
            }
        }

        let article_kind = match article_source(marker) {
            ArticleSource::SimpleText(_) => "simpleArticle",
            ArticleSource::Literal(_) => "literal",
            ArticleSource::None => {
                warnings.push(ConvertWarning::MissingArticle {
                    directory: directory.clone(),
                });
                "missing"
            }
        };
        let media_kind = match media_source(marker) {
            MediaSource::SingleImage(_) => "simpleImage",
            MediaSource::Comparison { .. } => "imageComparison",
            MediaSource::Literal(_) => "literal",
            MediaSource::None => {
                warnings.push(ConvertWarning::MissingMedia {
                    directory: directory.clone(),
                });
                "missing"
            }
        };

        markers.push(MarkerCheck {
            directory,
            article_kind,
            media_kind,
            missing_sources,
        });
    }

    Ok(CheckReport { markers, warnings })
}

fn emit(events: Option<&Sender<ConvertEvent>>, event: ConvertEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}

fn warn(acc: &mut Accumulator, events: Option<&Sender<ConvertEvent>>, warning: ConvertWarning) {
    emit(events, ConvertEvent::Warning(warning.clone()));
    acc.warnings.push(warning);
}
