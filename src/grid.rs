use crate::color::Rgb;

/// Fixed-size row-major color buffer. Index of `(x, y)` is `x + y * w`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    w: usize,
    h: usize,
    cells: Vec<Rgb>,
}

impl Grid {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            cells: vec![Rgb::BLACK; w * h],
        }
    }

    pub fn from_cells(w: usize, h: usize, cells: Vec<Rgb>) -> Self {
        assert_eq!(
            cells.len(),
            w * h,
            "grid of {w}x{h} needs {} cells, got {}",
            w * h,
            cells.len()
        );
        Self { w, h, cells }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.w && y < self.h,
            "pixel ({x}, {y}) outside {}x{} grid",
            self.w,
            self.h
        );
        x + y * self.w
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.cells[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, c: Rgb) {
        let i = self.idx(x, y);
        self.cells[i] = c;
    }

    pub fn fill(&mut self, c: Rgb) {
        self.cells.fill(c);
    }

    pub fn cells(&self) -> &[Rgb] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Rgb] {
        &mut self.cells
    }

    /// Channel sums over the in-bounds 8-neighborhood of `(x, y)` and how
    /// many neighbors contributed: 3 at corners, 5 on edges, 8 inside.
    pub fn neighbor_sum(&self, x: usize, y: usize) -> ([f64; 3], usize) {
        let mut sum = [0.0f64; 3];
        let mut n = 0usize;
        for dx in -1isize..=1 {
            for dy in -1isize..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if !self.contains(nx, ny) {
                    continue;
                }
                let c = self.cells[nx as usize + ny as usize * self.w];
                sum[0] += c.r as f64;
                sum[1] += c.g as f64;
                sum[2] += c.b as f64;
                n += 1;
            }
        }
        (sum, n)
    }

    pub fn neighbor_count(&self, x: usize, y: usize) -> usize {
        self.neighbor_sum(x, y).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn neighbor_counts_follow_position() {
        let g = Grid::new(4, 3);
        assert_eq!(g.neighbor_count(0, 0), 3);
        assert_eq!(g.neighbor_count(3, 2), 3);
        assert_eq!(g.neighbor_count(1, 0), 5);
        assert_eq!(g.neighbor_count(0, 1), 5);
        assert_eq!(g.neighbor_count(1, 1), 8);
        assert_eq!(g.neighbor_count(2, 1), 8);
    }

    #[test]
    fn single_row_and_single_cell() {
        let row = Grid::new(3, 1);
        assert_eq!(row.neighbor_count(0, 0), 1);
        assert_eq!(row.neighbor_count(1, 0), 2);
        assert_eq!(Grid::new(1, 1).neighbor_count(0, 0), 0);
    }

    #[test]
    fn neighbor_sum_excludes_center() {
        let mut g = Grid::new(3, 3);
        g.fill(Rgb::new(1, 2, 3));
        g.set(1, 1, Rgb::new(100, 100, 100));
        let (sum, n) = g.neighbor_sum(1, 1);
        assert_eq!(n, 8);
        assert_eq!(sum, [8.0, 16.0, 24.0]);
    }

    #[test]
    fn row_major_layout() {
        let mut g = Grid::new(3, 2);
        g.set(2, 1, Rgb::new(9, 9, 9));
        assert_eq!(g.cells()[2 + 3], Rgb::new(9, 9, 9));
        assert_eq!(g.idx(1, 1), 4);
    }

    #[test]
    #[should_panic(expected = "outside 3x2 grid")]
    fn out_of_bounds_access_panics() {
        let g = Grid::new(3, 2);
        let _ = g.get(3, 0);
    }
}
