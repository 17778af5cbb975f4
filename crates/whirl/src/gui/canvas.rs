use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use orbit::{Canvas, ItemColor, Point, Size};
use palette::Srgba;
use std::f64::consts::PI;

pub struct CairoCanvas<'a> {
    cr: &'a Context,
}

impl<'a> CairoCanvas<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }
}

impl Canvas for CairoCanvas<'_> {
    type Image = Pixbuf;
    type Error = cairo::Error;

    fn fill_ellipse(
        &mut self,
        center: Point,
        size: Size,
        color: ItemColor,
    ) -> Result<(), cairo::Error> {
        // cairo rejects a degenerate scale matrix
        if size.is_empty() {
            return Ok(());
        }

        self.cr.save()?;
        self.cr.translate(center.x, center.y);
        self.cr.scale(size.width / 2.0, size.height / 2.0);
        self.cr.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
        self.cr.restore()?;

        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
        self.cr.fill()
    }

    fn draw_image(
        &mut self,
        pixbuf: &Pixbuf,
        center: Point,
        size: Size,
    ) -> Result<(), cairo::Error> {
        if size.is_empty() || pixbuf.width() <= 0 || pixbuf.height() <= 0 {
            return Ok(());
        }

        let (sx, sy) = (
            size.width / pixbuf.width() as f64,
            size.height / pixbuf.height() as f64,
        );

        self.cr.save()?;
        self.cr
            .translate(center.x - size.width / 2.0, center.y - size.height / 2.0);
        self.cr.scale(sx, sy);
        self.cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        self.cr.paint()?;
        self.cr.restore()
    }
}

/// Soft disc behind the items.
pub fn draw_backdrop(
    cr: &Context,
    center: Point,
    radius: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    cr.fill()
}
