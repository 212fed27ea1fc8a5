//! Fixed-size 2D cell store with clamped, defaulted and rectangular access.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridParts<T>")]
pub struct BoundedGrid<T> {
    width: usize,
    height: usize,
    default: T,
    cells: Vec<T>,
}

/// Unvalidated wire form of a [`BoundedGrid`].
#[derive(Deserialize)]
struct GridParts<T> {
    width: usize,
    height: usize,
    default: T,
    cells: Vec<T>,
}

impl<T> TryFrom<GridParts<T>> for BoundedGrid<T> {
    type Error = String;

    fn try_from(parts: GridParts<T>) -> Result<Self, Self::Error> {
        let GridParts { width, height, default, cells } = parts;
        if width == 0 || height == 0 {
            return Err(format!("grid dimensions must be positive, got {width}x{height}"));
        }
        if cells.len() != width * height {
            return Err(format!(
                "grid {width}x{height} needs {} cells, found {}",
                width * height,
                cells.len()
            ));
        }
        Ok(Self { width, height, default, cells })
    }
}

impl<T: Copy> BoundedGrid<T> {
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize, default: T) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self { width, height, default, cells: vec![default; width * height] }
    }

    /// Rebuilds a grid from raw cells, returning `None` when the count does not
    /// match the dimensions.
    pub fn from_cells(width: usize, height: usize, default: T, cells: Vec<T>) -> Option<Self> {
        Self::try_from(GridParts { width, height, default, cells }).ok()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn default_value(&self) -> T {
        self.default
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn reset(&mut self) {
        self.cells.fill(self.default);
    }

    pub fn within(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Writes to the nearest in-bounds cell.
    pub fn set(&mut self, x: i32, y: i32, value: T) {
        let index = self.clamped_index(x, y);
        self.cells[index] = value;
    }

    /// Reads the nearest in-bounds cell.
    pub fn get(&self, x: i32, y: i32) -> T {
        self.cells[self.clamped_index(x, y)]
    }

    /// Reads `(x, y)` without clamping, yielding `fallback` off-grid.
    pub fn get_or(&self, x: i32, y: i32, fallback: T) -> T {
        if self.within(x, y) { self.cells[self.index(x as usize, y as usize)] } else { fallback }
    }

    /// Writes `value` over the part of the `w`x`h` rectangle at `(x, y)` that
    /// lies inside the grid. Non-positive extents write nothing.
    pub fn fill(&mut self, x: i32, y: i32, w: i32, h: i32, value: T) {
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(w)).min(self.width as i64);
        let y1 = (i64::from(y) + i64::from(h)).min(self.height as i64);
        for cy in y0..y1 {
            for cx in x0..x1 {
                self.set(cx as i32, cy as i32, value);
            }
        }
    }

    /// Iterates `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, T)> + '_ {
        self.cells.iter().enumerate().map(move |(index, &value)| {
            ((index % self.width) as i32, (index / self.width) as i32, value)
        })
    }

    fn clamped_index(&self, x: i32, y: i32) -> usize {
        let cx = x.clamp(0, self.width as i32 - 1) as usize;
        let cy = y.clamp(0, self.height as i32 - 1) as usize;
        self.index(cx, cy)
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}
