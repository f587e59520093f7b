use std::path::{Path, PathBuf};

use image::RgbImage;
use imageproc::drawing::draw_hollow_rect_mut;
use log::debug;

use crate::classes::ClassRegistry;
use crate::colors::{BoxColor, select_color};
use crate::error::{Error, Result};
use crate::label::parse_label_file;
use crate::pairing::{load_paired_image, output_path_for_image};
use crate::rect::BoundingBox;

/// Draws a one pixel wide outline for every box. Parts outside the image are clipped.
pub fn draw_boxes(image: &mut RgbImage, boxes: &[(BoundingBox, BoxColor)]) {
    for (bbox, color) in boxes {
        draw_hollow_rect_mut(image, bbox.to_rect(), color.to_rgb());
    }
}

/// Maps every label record onto `dimensions` and picks its color.
pub fn colored_boxes(
    label: &Path,
    classes: &ClassRegistry,
    dimensions: (u32, u32),
) -> Result<Vec<(BoundingBox, BoxColor)>> {
    parse_label_file(label)?
        .iter()
        .map(|record| {
            let color = select_color(record.class_id, classes, label)?;
            let bbox = BoundingBox::from_normalized(record, dimensions)?;
            Ok((bbox, color))
        })
        .collect()
}

/// Paths involved in one rendered label file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub image: PathBuf,
    pub output: PathBuf,
    pub boxes: usize,
}

/// Renders the boxes of one label file onto a copy of its image.
///
/// `dimension_override` replaces the loaded image's width and/or height in
/// the coordinate transform only. The copy is written to
/// `boxes_<name>.<suffix>`, replacing any existing file.
pub fn render_label_file(
    label: &Path,
    image_suffix: &str,
    classes: &ClassRegistry,
    dimension_override: (Option<u32>, Option<u32>),
) -> Result<RenderedImage> {
    let (image_path, mut image) = load_paired_image(label, image_suffix)?;
    let dimensions = (
        dimension_override.0.unwrap_or(image.width()),
        dimension_override.1.unwrap_or(image.height()),
    );

    let boxes = colored_boxes(label, classes, dimensions)?;
    debug!(
        "{}: {} box(es) on {}x{}",
        label.display(),
        boxes.len(),
        dimensions.0,
        dimensions.1
    );
    draw_boxes(&mut image, &boxes);

    let output = output_path_for_image(&image_path);
    image.save(&output).map_err(|source| Error::ImageWrite {
        path: output.clone(),
        source,
    })?;

    Ok(RenderedImage {
        image: image_path,
        output,
        boxes: boxes.len(),
    })
}
