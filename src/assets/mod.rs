pub mod ico;

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::{fs, io};

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use log::info;
use thiserror::Error;

pub const CONNECTED_ICON_FILE: &str = "on.png";
pub const DISCONNECTED_ICON_FILE: &str = "off.png";
pub const CHECK_GLYPH_FILE: &str = "check.png";

/// Largest side an ICO directory entry can describe.
const MAX_ICON_SIDE: u32 = 256;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("could not read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("could not decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Decoded RGBA pixels, ready for the tray or a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl IconImage {
    fn from_image(image: DynamicImage) -> Self {
        let rgba = image.into_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            rgba: rgba.into_raw(),
            width,
            height,
        }
    }
}

/// The three images the tray needs. Missing or broken files are fatal.
#[derive(Debug, Clone)]
pub struct TrayAssets {
    pub connected: IconImage,
    pub disconnected: IconImage,
    pub check: IconImage,
}

impl TrayAssets {
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        info!("Loading tray images from {}", dir.display());
        Ok(Self {
            connected: load_tray_icon(&dir.join(CONNECTED_ICON_FILE))?,
            disconnected: load_tray_icon(&dir.join(DISCONNECTED_ICON_FILE))?,
            check: load_image(&dir.join(CHECK_GLYPH_FILE))?,
        })
    }
}

/// Loads an image file as plain RGBA.
pub fn load_image(path: &Path) -> Result<IconImage, AssetError> {
    Ok(IconImage::from_image(decode_file(path)?))
}

/// Loads an image and passes it through a single-image ICO container, the
/// format the shell expects for tray icons.
pub fn load_tray_icon(path: &Path) -> Result<IconImage, AssetError> {
    let mut image = decode_file(path)?;
    if image.width() > MAX_ICON_SIDE || image.height() > MAX_ICON_SIDE {
        image = image.resize(MAX_ICON_SIDE, MAX_ICON_SIDE, FilterType::Triangle);
    }
    // PNG payloads inside an ICO must be 32-bit RGBA.
    let image = DynamicImage::ImageRgba8(image.into_rgba8());

    let decode_err = |source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    };
    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageFormat::Png)
        .map_err(decode_err)?;
    let container = ico::wrap_png(png.get_ref(), image.width(), image.height());
    let icon = image::load_from_memory_with_format(&container, ImageFormat::Ico)
        .map_err(decode_err)?;
    Ok(IconImage::from_image(icon))
}

fn decode_file(path: &Path) -> Result<DynamicImage, AssetError> {
    let bytes = fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
