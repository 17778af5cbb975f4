use crate::animator::ItemFrame;
use crate::color::ItemColor;
use crate::geometry::{Point, Size};

/// Drawing primitives the host exposes to the indicator.
pub trait Canvas {
    type Image;
    type Error;

    fn fill_ellipse(
        &mut self,
        center: Point,
        size: Size,
        color: ItemColor,
    ) -> Result<(), Self::Error>;

    /// Draws `image` scaled to `size`, centered on `center`.
    fn draw_image(
        &mut self,
        image: &Self::Image,
        center: Point,
        size: Size,
    ) -> Result<(), Self::Error>;
}

#[derive(Debug)]
pub enum ItemVisual<'a, I> {
    Image(&'a I),
    Color(ItemColor),
}

impl<'a, I> ItemVisual<'a, I> {
    /// An image always wins over the fill color.
    pub fn resolve(image: Option<&'a I>, color: ItemColor) -> Self {
        image.map_or(Self::Color(color), Self::Image)
    }
}

pub fn paint_items<C: Canvas>(
    canvas: &mut C,
    frames: &[ItemFrame],
    visual: ItemVisual<'_, C::Image>,
) -> Result<(), C::Error> {
    for frame in frames {
        match visual {
            ItemVisual::Image(image) => canvas.draw_image(image, frame.position, frame.size)?,
            ItemVisual::Color(color) => canvas.fill_ellipse(frame.position, frame.size, color)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::IndicatorAnimator;
    use crate::clock::ManualClock;

    #[derive(Debug, PartialEq)]
    enum Call {
        Ellipse(Point, Size, ItemColor),
        Image(&'static str, Point, Size),
    }

    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<Call>,
    }

    impl Canvas for RecordingCanvas {
        type Image = &'static str;
        type Error = std::convert::Infallible;

        fn fill_ellipse(
            &mut self,
            center: Point,
            size: Size,
            color: ItemColor,
        ) -> Result<(), Self::Error> {
            self.calls.push(Call::Ellipse(center, size, color));
            Ok(())
        }

        fn draw_image(
            &mut self,
            image: &Self::Image,
            center: Point,
            size: Size,
        ) -> Result<(), Self::Error> {
            self.calls.push(Call::Image(*image, center, size));
            Ok(())
        }
    }

    #[test]
    fn test_image_takes_priority() {
        let image = "dot.png";
        let red = ItemColor::new(1.0, 0.0, 0.0, 1.0);
        assert!(matches!(
            ItemVisual::resolve(Some(&image), red),
            ItemVisual::Image(&"dot.png")
        ));
        assert!(matches!(
            ItemVisual::<&str>::resolve(None, red),
            ItemVisual::Color(c) if c == red
        ));
    }

    #[test]
    fn test_paints_one_shape_per_item() {
        let animator = IndicatorAnimator::new(ManualClock::default());
        let frames = animator.tick(0.4);
        let mut canvas = RecordingCanvas::default();

        paint_items(
            &mut canvas,
            &frames,
            ItemVisual::Color(ItemColor::white()),
        )
        .unwrap();

        assert_eq!(canvas.calls.len(), frames.len());
        assert_eq!(
            canvas.calls[0],
            Call::Ellipse(frames[0].position, frames[0].size, ItemColor::white())
        );
    }

    #[test]
    fn test_paints_images_at_item_size() {
        let animator = IndicatorAnimator::new(ManualClock::default());
        let frames = animator.tick(1.0);
        let mut canvas = RecordingCanvas::default();
        let image = "dot.png";

        paint_items(&mut canvas, &frames, ItemVisual::Image(&image)).unwrap();

        let last = frames.last().unwrap();
        assert_eq!(
            canvas.calls.last(),
            Some(&Call::Image("dot.png", last.position, last.size))
        );
    }

    #[test]
    fn test_no_items_paints_nothing() {
        let mut animator = IndicatorAnimator::new(ManualClock::default());
        animator.config_mut().set_item_count(0);
        let mut canvas = RecordingCanvas::default();

        paint_items(
            &mut canvas,
            &animator.tick(3.0),
            ItemVisual::Color(ItemColor::white()),
        )
        .unwrap();
        assert!(canvas.calls.is_empty());
    }
}
