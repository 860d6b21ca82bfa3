//=========================================================================
// Errors
//=========================================================================
//
// Error taxonomy:
// - Configuration errors (unknown or duplicate scene keys): fatal, they
//   indicate a defect in how the scene set was assembled.
// - Asset failures: fatal, no scene can render without its assets.
// - Platform failures (event loop, window): fatal.
//
// Nothing here is retried. Once a frame fails the driver is halted and
// every later frame returns `Halted`. The only recoverable condition, a
// scene whose assets are not yet resident, is handled by the lazy load in
// `enter`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io;
use std::path::PathBuf;

use thiserror::Error;

//=== AssetError ==========================================================

/// Failure to acquire a scene resource.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The file could not be read.
    #[error("asset {path:?} could not be read: {source}")]
    Missing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but its contents are not usable.
    #[error("asset {path:?} could not be decoded: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A font was requested with a zero point size.
    #[error("font size must be positive")]
    InvalidFontSize,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(String),

    /// The window could not be created.
    #[error("window creation failed: {0}")]
    WindowCreation(String),
}

//=== StageError ==========================================================

/// Top-level error returned by the driver and the scene stores.
#[derive(Debug, Error)]
pub enum StageError {
    /// A transition or lookup named a scene that was never registered.
    #[error("scene {0} is not registered")]
    UnknownScene(String),

    /// The same scene key was registered twice.
    #[error("scene {0} is registered more than once")]
    DuplicateScene(String),

    /// A scene failed to load its assets.
    #[error("scene {scene} failed to load assets")]
    Asset {
        scene: String,
        #[source]
        source: AssetError,
    },

    /// The platform collaborator failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// A frame was requested after an earlier frame failed.
    #[error("driver halted after a fatal error")]
    Halted,
}

impl StageError {
    pub(crate) fn unknown<K: std::fmt::Debug>(key: K) -> Self {
        Self::UnknownScene(format!("{:?}", key))
    }

    pub(crate) fn asset<K: std::fmt::Debug>(key: K, source: AssetError) -> Self {
        Self::Asset {
            scene: format!("{:?}", key),
            source,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn unknown_scene_formats_key() {
        let err = StageError::unknown("boss");
        assert_eq!(err.to_string(), "scene \"boss\" is not registered");
    }

    #[test]
    fn asset_error_keeps_source_chain() {
        let missing = AssetError::Missing {
            path: PathBuf::from("fonts/title.ttf"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let err = StageError::asset("title", missing);

        assert!(err.to_string().contains("\"title\""));
        let source = err.source().expect("asset error should expose its source");
        assert!(source.to_string().contains("fonts/title.ttf"));
    }

    #[test]
    fn platform_error_converts() {
        let err: StageError = PlatformError::WindowCreation("no display".into()).into();
        assert_eq!(err.to_string(), "window creation failed: no display");
    }
}
