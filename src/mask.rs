//! Per-pixel collision masks.
//!
//! A `Mask` records which pixels of a sprite are opaque.  Two entities
//! collide when, after placing their masks at their positions, at least one
//! opaque pixel of each lands on the same spot.  Transparent corners of a
//! sprite never register a hit.

/// Anything that occupies space on the play field.
pub trait Hitbox {
    /// Top-left anchor in logical pixels.
    fn origin(&self) -> (i32, i32);
    fn mask(&self) -> &Mask;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    /// Row-major opacity, `width * height` entries.
    bits: Vec<bool>,
}

impl Mask {
    /// A fully transparent mask.
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Mask {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// A fully opaque rectangle.
    pub fn filled(width: i32, height: i32) -> Self {
        let mut mask = Mask::new(width, height);
        mask.bits.fill(true);
        mask
    }

    /// Build a mask from ASCII art.  Every non-space character is opaque and
    /// covers a `scale`×`scale` block.  Short rows are padded with
    /// transparency up to the longest row.
    pub fn from_art(rows: &[&str], scale: i32) -> Self {
        let scale = scale.max(1);
        let cols = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let mut mask = Mask::new(cols * scale, rows.len() as i32 * scale);

        for (ry, row) in rows.iter().enumerate() {
            for (rx, ch) in row.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let (px, py) = (rx as i32 * scale, ry as i32 * scale);
                for y in py..py + scale {
                    for x in px..px + scale {
                        mask.set(x, y, true);
                    }
                }
            }
        }
        mask
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Opacity at `(x, y)`; anything outside the mask is transparent.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, opaque: bool) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        self.bits[(y * self.width + x) as usize] = opaque;
    }

    /// Number of opaque pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// True if `other`, placed at `(dx, dy)` relative to this mask's
    /// top-left corner, shares at least one opaque pixel with it.
    pub fn overlap(&self, other: &Mask, dx: i32, dy: i32) -> bool {
        // Intersection of the two rectangles in this mask's coordinates
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + other.width).min(self.width);
        let y1 = (dy + other.height).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        (y0..y1).any(|y| (x0..x1).any(|x| self.get(x, y) && other.get(x - dx, y - dy)))
    }
}

/// Pixel-accurate hit test between two entities.
pub fn collide(a: &impl Hitbox, b: &impl Hitbox) -> bool {
    let (ax, ay) = a.origin();
    let (bx, by) = b.origin();
    a.mask().overlap(b.mask(), bx - ax, by - ay)
}
