//! Integer screen geometry and per-pixel hit masks.

/// Maximum number of columns a [`HitMask`] can hold (one `u64` per row).
pub const MAX_MASK_WIDTH: u16 = 64;

/// Axis-aligned integer rectangle in screen coordinates.
///
/// The y axis grows downward. `right()` and `bottom()` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the rectangle of a sprite whose top-left corner sits at `(x, y)`.
    ///
    /// Sub-pixel positions are truncated toward negative infinity.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn from_position(x: f32, y: f32, width: u16, height: u16) -> Self {
        Self::new(
            x.floor() as i32,
            y.floor() as i32,
            i32::from(width),
            i32::from(height),
        )
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns the overlapping area of two rectangles, or `None` if they only
    /// touch or are disjoint.
    #[must_use]
    pub fn clip(&self, other: &Rect) -> Option<Rect> {
        let left = i32::max(self.x, other.x);
        let top = i32::max(self.y, other.y);
        let right = i32::min(self.right(), other.right());
        let bottom = i32::min(self.bottom(), other.bottom());
        (left < right && top < bottom).then(|| Rect::new(left, top, right - left, bottom - top))
    }
}

/// Per-pixel solidity of a sprite.
///
/// Each row is stored as a `u64` bitset where bit `x` is column `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitMask {
    width: u16,
    rows: &'static [u64],
}

impl HitMask {
    /// Creates a mask from static row data.
    ///
    /// # Panics
    ///
    /// Panics if `width` exceeds [`MAX_MASK_WIDTH`] or the row count does not
    /// fit in a `u16`.
    #[must_use]
    pub const fn new(width: u16, rows: &'static [u64]) -> Self {
        assert!(width <= MAX_MASK_WIDTH);
        assert!(rows.len() <= u16::MAX as usize);
        Self { width, rows }
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn height(&self) -> u16 {
        self.rows.len() as u16
    }

    #[must_use]
    pub fn is_solid(&self, x: u16, y: u16) -> bool {
        x < self.width
            && self
                .rows
                .get(usize::from(y))
                .is_some_and(|row| (row >> x) & 1 == 1)
    }

    /// Returns `len` bits of row `row` starting at column `offset`.
    #[expect(clippy::cast_sign_loss)]
    fn span(&self, row: i32, offset: i32, len: i32) -> u64 {
        debug_assert!(row >= 0 && offset >= 0 && len > 0);
        let bits = self.rows[row as usize] >> offset;
        if len >= 64 {
            bits
        } else {
            bits & ((1 << len) - 1)
        }
    }
}

/// Collision shape of an entity: its bounding box size plus an optional mask.
///
/// Without a mask, any bounding-box overlap counts as a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    width: u16,
    height: u16,
    mask: Option<HitMask>,
}

impl Shape {
    /// A shape that collides on bounding-box overlap alone.
    #[must_use]
    pub const fn boxed(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            mask: None,
        }
    }

    /// A shape whose bounding box is the size of `mask`.
    #[must_use]
    pub const fn masked(mask: HitMask) -> Self {
        Self {
            width: mask.width(),
            height: mask.height(),
            mask: Some(mask),
        }
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub const fn mask(&self) -> Option<&HitMask> {
        self.mask.as_ref()
    }

    #[must_use]
    pub fn rect_at(&self, x: f32, y: f32) -> Rect {
        Rect::from_position(x, y, self.width, self.height)
    }
}

/// Tests whether two placed shapes intersect.
///
/// Bounding boxes are compared first; if both shapes carry masks, the
/// overlapping region is then checked row by row.
#[must_use]
pub fn shapes_collide(a: Rect, a_shape: &Shape, b: Rect, b_shape: &Shape) -> bool {
    let Some(clip) = a.clip(&b) else {
        return false;
    };
    let (Some(a_mask), Some(b_mask)) = (a_shape.mask(), b_shape.mask()) else {
        return true;
    };
    let a_offset = clip.x() - a.x();
    let b_offset = clip.x() - b.x();
    (0..clip.height()).any(|dy| {
        let a_row = a_mask.span(clip.y() - a.y() + dy, a_offset, clip.width());
        let b_row = b_mask.span(clip.y() - b.y() + dy, b_offset, clip.width());
        a_row & b_row != 0
    })
}

const fn full_row(width: u16) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1 << width) - 1
    }
}

/// Rows of an ellipse inscribed in a `width × H` box.
#[expect(clippy::cast_possible_wrap)]
pub const fn ellipse_rows<const H: usize>(width: u16) -> [u64; H] {
    let w = width as i64;
    let h = H as i64;
    let mut rows = [0; H];
    let mut y = 0;
    while y < H {
        let dy = 2 * y as i64 - h + 1;
        let mut row = 0;
        let mut x = 0;
        while x < w {
            let dx = 2 * x - w + 1;
            if dx * dx * h * h + dy * dy * w * w <= w * w * h * h {
                row |= 1 << x;
            }
            x += 1;
        }
        rows[y] = row;
        y += 1;
    }
    rows
}

/// Rows of a pipe sprite: a full-width cap of `cap` rows on the gap side and a
/// body inset by `inset` columns on both sides.
pub const fn pipe_rows<const H: usize>(
    width: u16,
    cap: usize,
    inset: u16,
    cap_on_top: bool,
) -> [u64; H] {
    let body = full_row(width - 2 * inset) << inset;
    let cap_row = full_row(width);
    let mut rows = [0; H];
    let mut y = 0;
    while y < H {
        let in_cap = if cap_on_top { y < cap } else { y >= H - cap };
        rows[y] = if in_cap { cap_row } else { body };
        y += 1;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    static SQUARE: [u64; 4] = [0b1111; 4];
    static DOT: [u64; 4] = [0, 0b0100, 0, 0];

    #[test]
    fn clip_of_disjoint_or_touching_rects_is_none() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.clip(&Rect::new(10, 0, 5, 5)), None);
        assert_eq!(a.clip(&Rect::new(0, 20, 5, 5)), None);
        assert_eq!(a.clip(&Rect::new(8, 8, 5, 5)), Some(Rect::new(8, 8, 2, 2)));
    }

    #[test]
    fn from_position_floors_negative_coordinates() {
        let rect = Rect::from_position(-0.5, 3.9, 4, 2);
        assert_eq!(rect, Rect::new(-1, 3, 4, 2));
    }

    #[test]
    fn masks_only_collide_on_shared_solid_pixels() {
        let square = Shape::masked(HitMask::new(4, &SQUARE));
        let dot = Shape::masked(HitMask::new(4, &DOT));

        // The dot occupies (2, 1) of its own box.
        let at_origin = Rect::new(0, 0, 4, 4);
        assert!(shapes_collide(at_origin, &square, at_origin, &dot));

        // Shift the dot box so its solid pixel lands outside the square.
        let shifted = Rect::new(2, 0, 4, 4);
        assert!(!shapes_collide(at_origin, &square, shifted, &dot));

        // Boxes still overlap, so an unmasked shape collides.
        let boxed = Shape::boxed(4, 4);
        assert!(shapes_collide(at_origin, &square, shifted, &boxed));
    }

    #[test]
    fn ellipse_rows_are_inside_the_box_and_symmetric() {
        let rows: [u64; 24] = ellipse_rows(34);
        assert!(rows.iter().all(|row| row >> 34 == 0));
        assert!(rows.iter().all(|&row| row != 0));
        assert_eq!(rows[0], rows[23]);
        assert_eq!(rows[12], full_row(34));
        // corners are transparent
        let mask = HitMask::new(34, Box::leak(Box::new(rows)));
        assert!(!mask.is_solid(0, 0));
        assert!(!mask.is_solid(33, 23));
        assert!(mask.is_solid(17, 12));
    }

    #[test]
    fn pipe_rows_place_cap_on_gap_side() {
        let lower: [u64; 8] = pipe_rows(6, 2, 1, true);
        assert_eq!(lower[0], 0b11_1111);
        assert_eq!(lower[1], 0b11_1111);
        assert_eq!(lower[2], 0b01_1110);

        let upper: [u64; 8] = pipe_rows(6, 2, 1, false);
        assert_eq!(upper[0], 0b01_1110);
        assert_eq!(upper[7], 0b11_1111);
    }
}
