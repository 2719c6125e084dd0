use opencv::core::{Mat, Point, Rect, Scalar, Size};
use opencv::imgproc;

use crate::shared::color::Color;
use crate::shared::region::{Region, Shape};

pub const OUTLINE_THICKNESS: i32 = 2;

/// Draws every region's outline onto `image` in place.
pub fn draw_regions(image: &mut Mat, regions: &[Region]) -> opencv::Result<()> {
    for region in regions {
        draw_region(image, region)?;
    }
    Ok(())
}

pub fn draw_region(image: &mut Mat, region: &Region) -> opencv::Result<()> {
    let color = scalar(region.color);
    match region.shape {
        Shape::Rectangle => imgproc::rectangle(
            image,
            Rect::new(
                region.x.round() as i32,
                region.y.round() as i32,
                region.width.round() as i32,
                region.height.round() as i32,
            ),
            color,
            OUTLINE_THICKNESS,
            imgproc::LINE_8,
            0,
        ),
        Shape::Ellipse => {
            let (cx, cy) = region.center();
            let (ax, ay) = region.semi_axes();
            imgproc::ellipse(
                image,
                Point::new(cx.round() as i32, cy.round() as i32),
                Size::new(ax.round() as i32, ay.round() as i32),
                0.0,
                0.0,
                360.0,
                color,
                OUTLINE_THICKNESS,
                imgproc::LINE_8,
                0,
            )
        }
    }
}

fn scalar(color: Color) -> Scalar {
    let [b, g, r] = color.bgr();
    Scalar::new(b as f64, g as f64, r as f64, 0.0)
}
