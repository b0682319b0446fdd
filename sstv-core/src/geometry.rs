//! Aspect-preserving letterbox geometry.

/// An integer rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Compute the largest `rect`-aspect-ratio box that fits centered inside a
/// `box_width` x `box_height` area, for letterboxing a source image into a
/// mode's fixed scan geometry.
pub fn create_letterbox(box_width: i32, box_height: i32, rect: Rect) -> Rect {
    let mut ret = Rect { x: 0, y: 0, w: box_width, h: box_height };

    let aspect_box = box_width as f32 / box_height as f32;
    let aspect_rect = rect.w as f32 / rect.h as f32;
    let scalar = aspect_box / aspect_rect;

    if rect.w > rect.h {
        ret.h = (box_height as f32 * scalar) as i32;
        ret.y = (box_height - ret.h) / 2;
    } else {
        ret.w = (box_height as f32 * (aspect_box / scalar)) as i32;
        ret.x = (box_width - ret.w) / 2;
    }

    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_box_matching_rect_aspect_fills_fully() {
        let lb = create_letterbox(100, 100, Rect { x: 0, y: 0, w: 4, h: 4 });
        assert_eq!(lb, Rect { x: 0, y: 0, w: 100, h: 100 });
    }

    #[test]
    fn wide_source_gets_horizontal_bars() {
        let lb = create_letterbox(100, 100, Rect { x: 0, y: 0, w: 16, h: 9 });
        assert!(lb.h < 100);
        assert_eq!(lb.x, 0);
        assert!(lb.y > 0);
    }

    #[test]
    fn tall_source_gets_vertical_bars() {
        let lb = create_letterbox(100, 100, Rect { x: 0, y: 0, w: 9, h: 16 });
        assert!(lb.w < 100);
        assert_eq!(lb.y, 0);
        assert!(lb.x > 0);
    }
}
