//! Point types shared by partitioning, tracing and export

/// Continuous position in pixel coordinates
///
/// Used for sites (stipple points) and cell centroids. A site is not required
/// to lie inside the image until it is exported.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Check whether the point lies in `[0, width) x [0, height)`
    pub const fn is_within(self, width: usize, height: usize) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x < width as f64 && self.y < height as f64
    }
}

impl From<Pixel> for Point {
    fn from(pixel: Pixel) -> Self {
        Self::new(pixel.x as f64, pixel.y as f64)
    }
}

/// Unit step between 8-connected pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    /// Horizontal component (-1, 0 or 1)
    pub dx: i32,
    /// Vertical component (-1, 0 or 1), positive downwards
    pub dy: i32,
}

impl Direction {
    /// Integer dot product of the two step vectors
    pub const fn dot(self, other: Self) -> i32 {
        self.dx * other.dx + self.dy * other.dy
    }
}

/// The 8 neighbour directions, starting north and turning clockwise
pub const NEIGHBOR_DIRECTIONS: [Direction; 8] = [
    Direction { dx: 0, dy: -1 },
    Direction { dx: 1, dy: -1 },
    Direction { dx: 1, dy: 0 },
    Direction { dx: 1, dy: 1 },
    Direction { dx: 0, dy: 1 },
    Direction { dx: -1, dy: 1 },
    Direction { dx: -1, dy: 0 },
    Direction { dx: -1, dy: -1 },
];

/// Integer pixel position inside a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
}

impl Pixel {
    /// Create a pixel position
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Step one pixel in `direction`, returning `None` outside `width x height`
    pub fn step(self, direction: Direction, width: usize, height: usize) -> Option<Self> {
        let x = self.x.checked_add_signed(direction.dx as isize)?;
        let y = self.y.checked_add_signed(direction.dy as isize)?;
        (x < width && y < height).then_some(Self { x, y })
    }

    /// In-bounds 8-neighbours in clockwise order from north
    pub fn neighbors(self, width: usize, height: usize) -> impl Iterator<Item = Self> {
        NEIGHBOR_DIRECTIONS
            .into_iter()
            .filter_map(move |direction| self.step(direction, width, height))
    }

    /// Check whether `other` is one of the 8 neighbours of this pixel
    pub const fn is_adjacent_to(self, other: Self) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx <= 1 && dy <= 1 && (dx + dy) > 0
    }
}
