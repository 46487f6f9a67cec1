/// An integer rectangle with exclusive right and bottom edges.
///
/// Used to restrict a conversion pass to a sub-region of an image, so the
/// edges are stored directly rather than as origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Panics if `right < left` or `bottom < top`.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        assert!(
            right >= left && bottom >= top,
            "degenerate rect: ({left},{top})-({right},{bottom})"
        );
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The full-image rect for an image of the given dimensions.
    pub fn of_image(width: usize, height: usize) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Clamp the rect into the bounds of a `width` x `height` image,
    /// preserving the edge-ordering invariant.
    pub fn clamped(&self, width: usize, height: usize) -> Rect {
        let w = width as i32;
        let h = height as i32;
        let left = self.left.clamp(0, w);
        let top = self.top.clamp(0, h);
        Rect {
            left,
            top,
            right: self.right.clamp(left, w),
            bottom: self.bottom.clamp(top, h),
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}
