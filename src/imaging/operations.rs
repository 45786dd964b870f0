//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::calculate_fit_dimensions;
use super::params::{Quality, ThumbnailParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Configuration for thumbnail generation.
#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    /// Maximum bounding box (width, height).
    pub bounds: (u32, u32),
    pub quality: Quality,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            bounds: (150, 96),
            quality: Quality::default(),
        }
    }
}

/// Plan a thumbnail operation without executing it.
///
/// Useful for testing parameter generation.
pub fn plan_thumbnail(
    source: &Path,
    output_path: &Path,
    source_dims: (u32, u32),
    config: &ThumbnailConfig,
) -> ThumbnailParams {
    let (width, height) = calculate_fit_dimensions(source_dims, config.bounds);

    ThumbnailParams {
        source: source.to_path_buf(),
        output: output_path.to_path_buf(),
        width,
        height,
        quality: config.quality,
    }
}

/// Create a thumbnail image.
///
/// Reads the source dimensions, fits them inside the configured bounding box
/// (downscale only), and has the backend write the encoded JPEG. Returns the
/// dimensions the thumbnail was written at.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    output_path: &Path,
    config: &ThumbnailConfig,
) -> Result<Dimensions> {
    let dims = backend.identify(source)?;
    let params = plan_thumbnail(source, output_path, (dims.width, dims.height), config);
    backend.thumbnail(&params)?;

    Ok(Dimensions {
        width: params.width,
        height: params.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};

    #[test]
    fn plan_thumbnail_fits_square_source() {
        let params = plan_thumbnail(
            Path::new("/source.png"),
            Path::new("/out/thumb.jpg"),
            (1000, 1000),
            &ThumbnailConfig::default(),
        );

        assert_eq!(params.width, 96);
        assert_eq!(params.height, 96);
        assert_eq!(params.quality.value(), 90);
    }

    #[test]
    fn plan_thumbnail_never_upscales() {
        let params = plan_thumbnail(
            Path::new("/source.png"),
            Path::new("/out/thumb.jpg"),
            (100, 50),
            &ThumbnailConfig::default(),
        );

        assert_eq!(params.width, 100);
        assert_eq!(params.height, 50);
    }

    #[test]
    fn plan_thumbnail_custom_bounds() {
        let config = ThumbnailConfig {
            bounds: (300, 200),
            quality: Quality::new(75),
        };
        let params = plan_thumbnail(
            Path::new("/source.png"),
            Path::new("/out/thumb.jpg"),
            (600, 600),
            &config,
        );

        assert_eq!(params.width, 200);
        assert_eq!(params.height, 200);
        assert_eq!(params.quality.value(), 75);
    }

    #[test]
    fn create_thumbnail_identifies_then_resizes() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 1000,
            height: 1000,
        }]);

        let dims = create_thumbnail(
            &backend,
            Path::new("/material/photo.png"),
            Path::new("/out/town/thumb.jpg"),
            &ThumbnailConfig::default(),
        )
        .unwrap();

        assert_eq!(dims, Dimensions {
            width: 96,
            height: 96
        });

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/material/photo.png"));
        assert!(matches!(
            &ops[1],
            RecordedOp::Thumbnail {
                width: 96,
                height: 96,
                quality: 90,
                ..
            }
        ));
    }

    #[test]
    fn create_thumbnail_propagates_identify_failure() {
        // Mock with no queued dimensions fails the identify step
        let backend = MockBackend::new();

        let result = create_thumbnail(
            &backend,
            Path::new("/material/photo.png"),
            Path::new("/out/town/thumb.jpg"),
            &ThumbnailConfig::default(),
        );

        assert!(result.is_err());
        // No thumbnail op recorded after the failed identify
        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
    }
}
