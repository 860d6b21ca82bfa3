//=========================================================================
// Assets
//=========================================================================
//
// Resource acquisition for scenes.
//
// Scenes load fonts and images through an `AssetLoader` lent to them in
// `Scene::load_assets()`, and receive opaque, cheaply clonable handles.
// Releasing a resource is dropping its handle; `Scene::cleanup()` does
// exactly that.
//
// Architecture:
//   Scene::load_assets() ──► AssetLoader ──► Font / Image handles
//                                 │
//                                 └─ AssetStore (filesystem, rooted)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::error::AssetError;

//=== FontSpec ============================================================

/// What font to load: a file (relative to the asset root) or the builtin face.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub path: Option<PathBuf>,
    pub size: u32,
}

impl FontSpec {
    /// Builtin face at the given point size.
    pub fn builtin(size: u32) -> Self {
        Self { path: None, size }
    }

    /// Font file at `path`, relative to the asset root.
    pub fn file(path: impl Into<PathBuf>, size: u32) -> Self {
        Self {
            path: Some(path.into()),
            size,
        }
    }
}

//=== Font ================================================================

#[derive(Debug)]
struct FontFace {
    id: u64,
    size: u32,
    source: Option<PathBuf>,
    data: Option<Vec<u8>>,
}

/// Opaque handle to a loaded font at a fixed size.
#[derive(Debug, Clone)]
pub struct Font {
    face: Arc<FontFace>,
}

impl Font {
    pub fn id(&self) -> u64 {
        self.face.id
    }

    pub fn size(&self) -> u32 {
        self.face.size
    }

    /// File the face was read from, `None` for the builtin face.
    pub fn source(&self) -> Option<&Path> {
        self.face.source.as_deref()
    }

    /// Size in bytes of the font file backing this handle.
    pub fn byte_len(&self) -> usize {
        self.face.data.as_ref().map_or(0, Vec::len)
    }

    /// Approximate extent of `text`: half an em per character, one em tall.
    /// Saturates at `u32::MAX` for very long text.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let size = self.face.size;
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        (chars.saturating_mul(size).div_ceil(2), size)
    }
}

//=== Image ===============================================================

#[derive(Debug)]
struct ImageData {
    id: u64,
    source: PathBuf,
    width: u32,
    height: u32,
}

/// Opaque handle to a loaded image.
#[derive(Debug, Clone)]
pub struct Image {
    data: Arc<ImageData>,
}

impl Image {
    pub fn id(&self) -> u64 {
        self.data.id
    }

    pub fn source(&self) -> &Path {
        &self.data.source
    }

    pub fn width(&self) -> u32 {
        self.data.width
    }

    pub fn height(&self) -> u32 {
        self.data.height
    }
}

//=== AssetLoader Trait ===================================================

/// Resource loading primitives lent to scenes.
pub trait AssetLoader {
    fn load_font(&mut self, spec: &FontSpec) -> Result<Font, AssetError>;

    fn load_image(&mut self, path: &Path) -> Result<Image, AssetError>;
}

//=== AssetStore ==========================================================

/// Filesystem-backed loader rooted at an asset directory.
#[derive(Debug)]
pub struct AssetStore {
    root: PathBuf,
    next_id: u64,
    fonts_loaded: usize,
    images_loaded: usize,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next_id: 1,
            fonts_loaded: 0,
            images_loaded: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of fonts handed out so far.
    pub fn fonts_loaded(&self) -> usize {
        self.fonts_loaded
    }

    /// Number of images handed out so far.
    pub fn images_loaded(&self) -> usize {
        self.images_loaded
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl AssetLoader for AssetStore {
    fn load_font(&mut self, spec: &FontSpec) -> Result<Font, AssetError> {
        if spec.size == 0 {
            return Err(AssetError::InvalidFontSize);
        }

        let (source, data) = match &spec.path {
            Some(relative) => {
                let path = self.root.join(relative);
                let bytes = fs::read(&path).map_err(|source| AssetError::Missing {
                    path: path.clone(),
                    source,
                })?;
                (Some(path), Some(bytes))
            }
            None => (None, None),
        };

        let id = self.allocate_id();
        self.fonts_loaded += 1;
        debug!("Loaded font #{} ({:?}, {}pt)", id, source, spec.size);

        Ok(Font {
            face: Arc::new(FontFace {
                id,
                size: spec.size,
                source,
                data,
            }),
        })
    }

    fn load_image(&mut self, path: &Path) -> Result<Image, AssetError> {
        let full = self.root.join(path);

        if let Err(source) = fs::metadata(&full) {
            return Err(AssetError::Missing { path: full, source });
        }

        let (width, height) =
            image::image_dimensions(&full).map_err(|source| AssetError::Decode {
                path: full.clone(),
                source,
            })?;

        let id = self.allocate_id();
        self.images_loaded += 1;
        debug!("Loaded image #{} ({:?}, {}x{})", id, full, width, height);

        Ok(Image {
            data: Arc::new(ImageData {
                id,
                source: full,
                width,
                height,
            }),
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
