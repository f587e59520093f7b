use std::path::Path;

use image::Rgb;
use palette::Srgb;

use crate::classes::ClassRegistry;
use crate::error::Result;

/// A box color as a `(blue, green, red)` channel triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxColor(pub u8, pub u8, pub u8);

impl BoxColor {
    pub fn to_srgb(self) -> Srgb<u8> {
        let BoxColor(blue, green, red) = self;
        Srgb::new(red, green, blue)
    }

    /// The pixel value drawn into an RGB image.
    pub fn to_rgb(self) -> Rgb<u8> {
        let (red, green, blue) = self.to_srgb().into_components();
        Rgb([red, green, blue])
    }
}

pub const PINK: BoxColor = BoxColor(203, 192, 255);

/// Keywords searched for in class names, in priority order.
pub const COLOR_KEYWORDS: [(&str, BoxColor); 6] = [
    ("yellow", BoxColor(0, 255, 255)),
    ("blue", BoxColor(255, 0, 0)),
    ("red", BoxColor(0, 0, 255)),
    // same as red, for color-blind viewers
    ("orange", BoxColor(0, 0, 255)),
    ("green", BoxColor(0, 255, 0)),
    ("pink", PINK),
];

/// Picks the color of the first keyword contained in `class_name`, or pink.
pub fn color_for_class_name(class_name: &str) -> BoxColor {
    COLOR_KEYWORDS
        .iter()
        .find(|(keyword, _)| class_name.contains(keyword))
        .map_or(PINK, |&(_, color)| color)
}

/// Looks up the class name for `class_id` and returns its box color.
///
/// Fails with [`crate::Error::InvalidClassId`] for ids the registry lacks.
pub fn select_color(class_id: usize, classes: &ClassRegistry, label: &Path) -> Result<BoxColor> {
    classes.name(class_id, label).map(color_for_class_name)
}
