//! Manifest loading.
//!
//! Stage 1 of the conversion: reads `material.json` from the input root and
//! destructures it into typed records. The manifest is the single source of
//! truth — every output directory, copied file, and index entry traces back
//! to a field here.
//!
//! ## Manifest shape
//!
//! ```json
//! {
//!     "groups": [ ... ],
//!     "markers": [
//!         {
//!             "markerDirectory": "town-hall",
//!             "latLong": [53.4794, -2.2453],
//!             "thumb": "town-hall/facade.png",
//!             "copy": [{"from": "town-hall/1900.png", "to": "1900.png"}],
//!             "simpleArticle": {"text": "Built in 1877."},
//!             "simpleImage": "1900.png"
//!         }
//!     ]
//! }
//! ```
//!
//! `groups` is opaque — whatever the author wrote passes through to the index
//! untouched. Markers are processed in authoring order. Unknown fields on a
//! marker are ignored, so authors can keep their own annotations alongside
//! the recognized keys.

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filename of the input manifest, resolved under the input root.
pub const MANIFEST_FILENAME: &str = "material.json";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Top-level input document.
///
/// Both fields are required; a manifest missing either is rejected at parse
/// time with an error naming the missing key.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Opaque group metadata, passed through to the index verbatim.
    pub groups: Value,
    /// Marker records, in authoring order.
    pub markers: Vec<MarkerInput>,
}

/// One marker record as authored in `material.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerInput {
    /// Output directory name; must be unique across the manifest.
    pub marker_directory: String,
    /// Coordinate value, copied verbatim to the index.
    pub lat_long: Value,
    /// Relative path (under the input root) of an image to thumbnail.
    #[serde(default)]
    pub thumb: Option<String>,
    /// Files to copy from the input root into the marker directory.
    #[serde(default)]
    pub copy: Vec<CopyDirective>,
    /// Shortcut: synthesize `article.html` from a text fragment.
    #[serde(default)]
    pub simple_article: Option<SimpleArticle>,
    /// Literal article descriptor, used when `simpleArticle` is absent.
    #[serde(default)]
    pub article: Option<Value>,
    /// Shortcut: single-image media descriptor.
    #[serde(default)]
    pub simple_image: Option<String>,
    /// Shortcut: before/after image pair, ordered [back, front].
    #[serde(default)]
    pub image_comparison: Option<[String; 2]>,
    /// Literal media descriptor, lowest-precedence media source.
    #[serde(default)]
    pub media: Option<Value>,
}

/// One file-copy directive: `from` names a file under the input root, `to`
/// the destination name inside the marker's output directory.
#[derive(Debug, Clone, Deserialize)]
pub struct CopyDirective {
    pub from: String,
    pub to: String,
}

/// Shortcut article body. The text is wrapped as `<p>{text}</p>` without
/// escaping, so it may carry inline HTML.
#[derive(Debug, Clone, Deserialize)]
pub struct SimpleArticle {
    pub text: String,
}

/// Read and parse the manifest at `path`.
pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ManifestError::NotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ManifestError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    serde_json::from_str(&content).map_err(|e| ManifestError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
