//! Axis-aligned bounding boxes in XYXY format.

use super::coord::Coord;

/// An axis-aligned bounding box in XYXY format (xmin, ymin, xmax, ymax).
///
/// The `TSpace` parameter should be either [`Mm`](super::Mm) or
/// [`Page`](super::Page).
///
/// Note: This type does NOT enforce that min < max in the constructor. Boxes
/// produced by transforms are always ordered; hand-built ones are checked with
/// [`BBox::is_ordered`] where it matters.
pub struct BBox<TSpace> {
    pub min: Coord<TSpace>,
    pub max: Coord<TSpace>,
}

impl<TSpace> BBox<TSpace> {
    /// Creates a new bounding box from min and max coordinates.
    #[inline]
    pub fn new(min: Coord<TSpace>, max: Coord<TSpace>) -> Self {
        Self { min, max }
    }

    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            min: Coord::new(xmin, ymin),
            max: Coord::new(xmax, ymax),
        }
    }

    /// Creates a bounding box from a corner and a size.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_xyxy(x, y, x + width, y + height)
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Coord<TSpace>>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self::new(p, p),
                Some(b) => Self::from_xyxy(
                    b.xmin().min(p.x),
                    b.ymin().min(p.y),
                    b.xmax().max(p.x),
                    b.ymax().max(p.y),
                ),
            })
        })
    }

    /// Returns the minimum x coordinate.
    #[inline]
    pub fn xmin(&self) -> f64 {
        self.min.x
    }

    /// Returns the minimum y coordinate.
    #[inline]
    pub fn ymin(&self) -> f64 {
        self.min.y
    }

    /// Returns the maximum x coordinate.
    #[inline]
    pub fn xmax(&self) -> f64 {
        self.max.x
    }

    /// Returns the maximum y coordinate.
    #[inline]
    pub fn ymax(&self) -> f64 {
        self.max.y
    }

    /// Returns the width of the bounding box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the height of the bounding box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the four corners, clockwise from `min`.
    pub fn corners(&self) -> [Coord<TSpace>; 4] {
        [
            self.min,
            Coord::new(self.max.x, self.min.y),
            self.max,
            Coord::new(self.min.x, self.max.y),
        ]
    }

    /// Returns true if all coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns true if the box is properly ordered (min <= max for both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self::from_xyxy(
            self.xmin().min(other.xmin()),
            self.ymin().min(other.ymin()),
            self.xmax().max(other.xmax()),
            self.ymax().max(other.ymax()),
        )
    }

    /// Half-open overlap test: the boxes must overlap on both axes at once.
    ///
    /// Boxes that merely touch along an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.xmin() < other.xmax()
            && self.xmax() > other.xmin()
            && self.ymin() < other.ymax()
            && self.ymax() > other.ymin()
    }

    /// Minimum penetration depth of two intersecting boxes.
    ///
    /// Returns the smaller of the x and y overlap extents; meaningful only
    /// when [`BBox::intersects`] holds.
    pub fn penetration(&self, other: &Self) -> f64 {
        let dx = self.xmax().min(other.xmax()) - self.xmin().max(other.xmin());
        let dy = self.ymax().min(other.ymax()) - self.ymin().max(other.ymin());
        dx.min(dy)
    }

    /// Returns true if `other` lies inside this box, allowing `tolerance` on
    /// every side.
    pub fn contains(&self, other: &Self, tolerance: f64) -> bool {
        other.xmin() >= self.xmin() - tolerance
            && other.ymin() >= self.ymin() - tolerance
            && other.xmax() <= self.xmax() + tolerance
            && other.ymax() <= self.ymax() + tolerance
    }
}

impl<TSpace> Clone for BBox<TSpace> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<TSpace> Copy for BBox<TSpace> {}

impl<TSpace> PartialEq for BBox<TSpace> {
    fn eq(&self, other: &Self) -> bool {
        self.min == other.min && self.max == other.max
    }
}

impl<TSpace> std::fmt::Debug for BBox<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBox")
            .field("xmin", &self.min.x)
            .field("ymin", &self.min.y)
            .field("xmax", &self.max.x)
            .field("ymax", &self.max.y)
            .finish()
    }
}

impl<TSpace> std::fmt::Display for BBox<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}, {:.3}, {:.3})",
            self.xmin(),
            self.ymin(),
            self.xmax(),
            self.ymax()
        )
    }
}

impl<TSpace> Default for BBox<TSpace> {
    fn default() -> Self {
        Self::from_xyxy(0.0, 0.0, 0.0, 0.0)
    }
}
