use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    foundation::{core::Size, error::KenBurnsResult},
    slideshow::surface::ImageResolver,
};

/// Reads only the image header; pixels are never decoded.
pub fn probe_image_size(bytes: &[u8]) -> KenBurnsResult<Size> {
    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("guess image format")?
        .into_dimensions()
        .context("read image dimensions")?;
    Ok(Size::new(width, height))
}

pub fn probe_image_file(path: &Path) -> KenBurnsResult<Size> {
    let (width, height) = image::image_dimensions(path)
        .with_context(|| format!("read image dimensions of '{}'", path.display()))?;
    Ok(Size::new(width, height))
}

/// Resolves image paths on disk to their intrinsic size. Relative paths are joined onto `root`.
///
/// Missing or unreadable files resolve to `None`, which the controller treats as "not ready yet".
#[derive(Clone, Debug, Default)]
pub struct FsImageResolver {
    root: PathBuf,
}

impl FsImageResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl<P: AsRef<Path>> ImageResolver<P> for FsImageResolver {
    fn intrinsic_size(&self, image: &P) -> Option<Size> {
        let path = self.root.join(image.as_ref());
        match probe_image_file(&path) {
            Ok(size) => Some(size),
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "image not resolvable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn probe_reads_png_header() {
        assert_eq!(probe_image_size(&png_bytes(3, 2)).unwrap(), Size::new(3, 2));
    }

    #[test]
    fn probe_rejects_garbage() {
        assert!(probe_image_size(b"not an image").is_err());
    }

    #[test]
    fn fs_resolver_joins_root_and_tolerates_missing_files() {
        let dir = PathBuf::from("target").join("fs_resolver_test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("wide.png"), png_bytes(8, 4)).unwrap();

        let resolver = FsImageResolver::new(&dir);
        assert_eq!(resolver.root(), dir.as_path());
        assert_eq!(resolver.intrinsic_size(&"wide.png"), Some(Size::new(8, 4)));
        assert_eq!(resolver.intrinsic_size(&"missing.png"), None);
    }
}
