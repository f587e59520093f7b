use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::error::{Error, Result};

/// Prefix of the annotated copies written next to the inputs.
pub const OUTPUT_PREFIX: &str = "boxes_";

/// The image expected for `label`: same file stem, image suffix as extension.
pub fn image_path_for_label(label: &Path, image_suffix: &str) -> PathBuf {
    label.with_extension(image_suffix.trim_start_matches('.'))
}

/// `boxes_<name>` in the same directory as `image`.
pub fn output_path_for_image(image: &Path) -> PathBuf {
    let name = image
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    image.with_file_name(format!("{OUTPUT_PREFIX}{name}"))
}

/// Whether `path` is an annotated copy from an earlier run.
pub fn is_rendered_output(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(OUTPUT_PREFIX))
}

/// Loads the image paired with `label` as 8-bit RGB.
///
/// A missing or undecodable image is reported as [`Error::MissingImage`].
pub fn load_paired_image(label: &Path, image_suffix: &str) -> Result<(PathBuf, RgbImage)> {
    let image_path = image_path_for_label(label, image_suffix);
    match image::open(&image_path) {
        Ok(image) => Ok((image_path, image.to_rgb8())),
        Err(source) => Err(Error::MissingImage {
            label: label.to_path_buf(),
            image: image_path,
            source,
        }),
    }
}
