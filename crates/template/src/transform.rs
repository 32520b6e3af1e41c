//! Image pixel to PDF point conversion

use crate::{BoundingBox, PageGeometry};
use pdf_core::{PageSize, PdfRect};

/// Map a box from image pixels (top-left origin) to PDF user space
/// (bottom-left origin)
///
/// Scales by the ratio of page size to image size on each axis and flips
/// the vertical axis. A page box whose origin is not `(0, 0)` shifts the
/// result by that origin. No aspect-ratio correction is applied.
pub fn image_to_pdf(bbox: &BoundingBox, image: &PageGeometry, page: &PageSize) -> PdfRect {
    let x_scale = page.width / image.image_width;
    let y_scale = page.height / image.image_height;

    PdfRect {
        left: page.x + bbox.left * x_scale,
        right: page.x + bbox.right * x_scale,
        top: page.y + page.height - bbox.top * y_scale,
        bottom: page.y + page.height - bbox.bottom * y_scale,
    }
}
