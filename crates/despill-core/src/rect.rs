//! Pixel regions.
//!
//! A [`Rect`] restricts the row driver to a window of the frame; pixels
//! outside it are copied through untouched.
//!
//! Coordinates use the image convention: origin at the top-left, X to the
//! right, Y downward. Left/top edges are inclusive, right/bottom exclusive.
//!
//! ```rust
//! use despill_core::Rect;
//!
//! let window: Rect = "10,20,100,50".parse().unwrap();
//! assert_eq!(window.right(), 110);
//!
//! let frame = Rect::from_size(64, 64);
//! assert_eq!(window.intersect(&frame), Some(Rect::new(10, 20, 54, 44)));
//! ```

use std::fmt;
use std::str::FromStr;

/// A rectangle defined by origin (x, y) and dimensions (width, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Full-frame rectangle at the origin.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the overlap of two rectangles, `None` when they are disjoint.
    #[inline]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}x{}", self.x, self.y, self.width, self.height)
    }
}

/// Parses `x,y,w,h`. Zero width or height is rejected.
impl FromStr for Rect {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(crate::Error::other(format!(
                "expected region as x,y,w,h, got '{}'",
                s
            )));
        }
        let mut v = [0u32; 4];
        for (slot, part) in v.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| crate::Error::other(format!("invalid region value '{}'", part)))?;
        }
        let rect = Rect::new(v[0], v[1], v[2], v[3]);
        if rect.is_empty() {
            return Err(crate::Error::other(format!("region '{}' is empty", s)));
        }
        Ok(rect)
    }
}
