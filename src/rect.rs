use imageproc::rect::Rect;
use num_traits::ToPrimitive;

use crate::error::{Error, Result};
use crate::label::LabelRecord;

/// A label box mapped onto pixel coordinates.
///
/// `upper_left` and `lower_right` are `(x, y)` pairs in image space, where `y`
/// grows downward. Both corners lie on the drawn outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub class_id: usize,
    pub upper_left: (i32, i32),
    pub lower_right: (i32, i32),
}

impl BoundingBox {
    /// Converts a normalized `(cx, cy, w, h)` label into pixel corners.
    ///
    /// Each step truncates toward zero, as an integer cast does:
    ///
    /// ```text
    /// px_x = trunc(cx * W)   px_w = trunc(w * W)
    /// px_y = trunc(cy * H)   px_h = trunc(h * H)
    /// upper_left  = (trunc(px_x - px_w / 2), trunc(px_y - px_h / 2))
    /// lower_right = (trunc(px_x + px_w / 2), trunc(px_y + px_h / 2))
    /// ```
    ///
    /// # Arguments
    ///
    /// * `record` - The parsed label line.
    /// * `dimensions` - `(width, height)` of the coordinate space, normally the
    ///   size of the loaded image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOverflow`] when a value is not finite or does
    /// not fit into an `i32`.
    ///
    /// # Examples
    ///
    /// ```
    /// use draw_label_boxes::label::LabelRecord;
    /// use draw_label_boxes::rect::BoundingBox;
    ///
    /// let record = LabelRecord::parse_line("0 0.5 0.5 0.2 0.4").unwrap();
    /// let bbox = BoundingBox::from_normalized(&record, (100, 100)).unwrap();
    ///
    /// assert_eq!(bbox.upper_left, (40, 30));
    /// assert_eq!(bbox.lower_right, (60, 70));
    /// ```
    pub fn from_normalized(record: &LabelRecord, dimensions: (u32, u32)) -> Result<Self> {
        let (width, height) = dimensions;
        let overflow = || Error::CoordinateOverflow {
            cx: record.center_x,
            cy: record.center_y,
            w: record.width,
            h: record.height,
            width,
            height,
        };

        let scale = |value: f64, extent: u32| (value * f64::from(extent)).to_i32();
        let px_x = scale(record.center_x, width).ok_or_else(overflow)?;
        let px_y = scale(record.center_y, height).ok_or_else(overflow)?;
        let px_w = scale(record.width, width).ok_or_else(overflow)?;
        let px_h = scale(record.height, height).ok_or_else(overflow)?;

        let corner = |center: i32, extent: i32, sign: f64| {
            (f64::from(center) + sign * f64::from(extent) / 2.0).to_i32()
        };

        Ok(Self {
            class_id: record.class_id,
            upper_left: (
                corner(px_x, px_w, -1.0).ok_or_else(overflow)?,
                corner(px_y, px_h, -1.0).ok_or_else(overflow)?,
            ),
            lower_right: (
                corner(px_x, px_w, 1.0).ok_or_else(overflow)?,
                corner(px_y, px_h, 1.0).ok_or_else(overflow)?,
            ),
        })
    }

    /// Midpoint of the two corners in pixel space.
    pub fn center(&self) -> (f64, f64) {
        (
            (f64::from(self.upper_left.0) + f64::from(self.lower_right.0)) / 2.0,
            (f64::from(self.upper_left.1) + f64::from(self.lower_right.1)) / 2.0,
        )
    }

    /// The rectangle whose outline passes through both corners.
    ///
    /// Corners are inclusive, so a box whose corners coincide becomes a single
    /// pixel. Swapped corners (negative label sizes) are normalized.
    pub fn to_rect(&self) -> Rect {
        let (x0, x1) = ordered(self.upper_left.0, self.lower_right.0);
        let (y0, y1) = ordered(self.upper_left.1, self.lower_right.1);

        let span = |lo: i32, hi: i32| {
            (i64::from(hi) - i64::from(lo) + 1)
                .to_u32()
                .unwrap_or(u32::MAX)
        };

        Rect::at(x0, y0).of_size(span(x0, x1), span(y0, y1))
    }
}

fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cx: f64, cy: f64, w: f64, h: f64) -> LabelRecord {
        LabelRecord {
            class_id: 0,
            center_x: cx,
            center_y: cy,
            width: w,
            height: h,
        }
    }

    #[test]
    fn centered_box_on_square_image() {
        let bbox = BoundingBox::from_normalized(&record(0.5, 0.5, 0.2, 0.4), (100, 100)).unwrap();
        assert_eq!(bbox.upper_left, (40, 30));
        assert_eq!(bbox.lower_right, (60, 70));
    }

    #[test]
    fn odd_pixel_sizes_truncate_toward_zero() {
        // px_x = 50, px_w = 21 -> 39.5 and 60.5
        let bbox = BoundingBox::from_normalized(&record(0.5, 0.5, 0.21, 0.21), (100, 100)).unwrap();
        assert_eq!(bbox.upper_left, (39, 39));
        assert_eq!(bbox.lower_right, (60, 60));

        // px_x = 4, px_w = 21 -> -6.5 truncates to -6, not -7
        let bbox = BoundingBox::from_normalized(&record(0.04, 0.04, 0.21, 0.21), (100, 100)).unwrap();
        assert_eq!(bbox.upper_left, (-6, -6));
        assert_eq!(bbox.lower_right, (14, 14));
    }

    #[test]
    fn non_square_image_scales_each_axis() {
        let bbox = BoundingBox::from_normalized(&record(0.25, 0.5, 0.1, 0.5), (640, 480)).unwrap();
        assert_eq!(bbox.upper_left, (128, 120));
        assert_eq!(bbox.lower_right, (192, 360));
    }

    #[test]
    fn center_recovers_normalized_center_within_a_pixel() {
        let sizes = [(100, 100), (640, 480), (1920, 1080), (37, 53)];
        let boxes = [
            (0.5, 0.5, 0.2, 0.4),
            (0.123, 0.877, 0.05, 0.11),
            (0.999, 0.001, 0.3, 0.3),
            (0.3333, 0.6667, 0.0, 0.0),
            (0.71, 0.29, 0.017, 0.923),
        ];

        for &(width, height) in &sizes {
            for &(cx, cy, w, h) in &boxes {
                let bbox = BoundingBox::from_normalized(&record(cx, cy, w, h), (width, height)).unwrap();
                let (x, y) = bbox.center();
                assert!(
                    (x.round() - cx * f64::from(width)).abs() <= 1.0,
                    "x center {x} too far from {cx} on {width}px"
                );
                assert!(
                    (y.round() - cy * f64::from(height)).abs() <= 1.0,
                    "y center {y} too far from {cy} on {height}px"
                );
            }
        }
    }

    #[test]
    fn non_finite_values_overflow() {
        let result = BoundingBox::from_normalized(&record(f64::NAN, 0.5, 0.2, 0.2), (100, 100));
        assert!(matches!(result, Err(Error::CoordinateOverflow { .. })));

        let result = BoundingBox::from_normalized(&record(0.5, 0.5, 1e12, 0.2), (100, 100));
        assert!(matches!(result, Err(Error::CoordinateOverflow { .. })));
    }

    #[test]
    fn rect_spans_both_corners_inclusive() {
        let bbox = BoundingBox {
            class_id: 0,
            upper_left: (40, 30),
            lower_right: (60, 70),
        };
        let rect = bbox.to_rect();
        assert_eq!((rect.left(), rect.top()), (40, 30));
        assert_eq!((rect.right(), rect.bottom()), (60, 70));
        assert_eq!((rect.width(), rect.height()), (21, 41));
    }

    #[test]
    fn degenerate_and_swapped_rects() {
        let point = BoundingBox {
            class_id: 0,
            upper_left: (5, 5),
            lower_right: (5, 5),
        };
        assert_eq!((point.to_rect().width(), point.to_rect().height()), (1, 1));

        let swapped = BoundingBox {
            class_id: 0,
            upper_left: (60, 70),
            lower_right: (40, 30),
        };
        assert_eq!(swapped.to_rect(), point_rect(40, 30, 21, 41));
    }

    fn point_rect(x: i32, y: i32, w: u32, h: u32) -> Rect {
        Rect::at(x, y).of_size(w, h)
    }
}
