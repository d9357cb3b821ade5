use crate::color::Rgb;
use crate::grid::Grid;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Seeded pixels that keep their color when statics are preserved.
#[derive(Clone, Debug)]
pub struct StaticPixels {
    w: usize,
    mask: Vec<bool>,
    entries: Vec<((usize, usize), Rgb)>,
}

impl StaticPixels {
    pub fn empty(w: usize, h: usize) -> Self {
        Self {
            w,
            mask: vec![false; w * h],
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.mask[x + y * self.w]
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<Rgb> {
        if !self.contains(x, y) {
            return None;
        }
        self.entries
            .iter()
            .find(|(p, _)| *p == (x, y))
            .map(|&(_, c)| c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seeds in the order they were placed.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), Rgb)> + '_ {
        self.entries.iter().copied()
    }

    fn insert(&mut self, x: usize, y: usize, c: Rgb) -> bool {
        let i = x + y * self.w;
        if self.mask[i] {
            return false;
        }
        self.mask[i] = true;
        self.entries.push(((x, y), c));
        true
    }
}

pub fn static_count(w: usize, h: usize, density: f64) -> usize {
    ((w * h) as f64 * density).round() as usize
}

/// Black grid with `round(w*h*density)` random seeds written into it.
///
/// Positions are drawn with reject-and-retry, so `density` must already be
/// bounded well below 1.
pub fn seed_grid(w: usize, h: usize, density: f64, seed: u64) -> (Grid, StaticPixels) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::new(w, h);
    let mut statics = StaticPixels::empty(w, h);

    let n = static_count(w, h, density);
    for _ in 0..n {
        let (x, y) = loop {
            let x = rng.gen_range(0..w);
            let y = rng.gen_range(0..h);
            if !statics.contains(x, y) {
                break (x, y);
            }
        };
        let c = random_lit_color(&mut rng);
        grid.set(x, y, c);
        statics.insert(x, y, c);
    }

    (grid, statics)
}

fn random_lit_color(rng: &mut StdRng) -> Rgb {
    loop {
        let c = Rgb::new(rng.gen(), rng.gen(), rng.gen());
        if !c.is_black() {
            return c;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_log::test;

    #[test]
    fn seeds_expected_count_without_collisions() {
        let (grid, statics) = seed_grid(40, 30, 0.05, 7);
        assert_eq!(statics.len(), 60);

        let unique: HashSet<_> = statics.iter().map(|(p, _)| p).collect();
        assert_eq!(unique.len(), 60);

        for ((x, y), c) in statics.iter() {
            assert!(!c.is_black());
            assert_eq!(grid.get(x, y), c);
            assert_eq!(statics.color_at(x, y), Some(c));
        }
    }

    #[test]
    fn non_static_cells_start_black() {
        let (grid, statics) = seed_grid(20, 10, 0.1, 3);
        for y in 0..10 {
            for x in 0..20 {
                if !statics.contains(x, y) {
                    assert_eq!(grid.get(x, y), Rgb::BLACK);
                    assert_eq!(statics.color_at(x, y), None);
                }
            }
        }
    }

    #[test]
    fn count_rounds_to_nearest() {
        assert_eq!(static_count(540, 405, 0.01), 2187);
        assert_eq!(static_count(3, 3, 0.05), 0);
        assert_eq!(static_count(3, 3, 0.06), 1);
        assert_eq!(static_count(10, 10, 0.0), 0);
    }

    #[test]
    fn same_seed_same_layout() {
        let (a, sa) = seed_grid(32, 16, 0.02, 99);
        let (b, sb) = seed_grid(32, 16, 0.02, 99);
        assert_eq!(a, b);
        assert!(sa.iter().eq(sb.iter()));

        let (c, _) = seed_grid(32, 16, 0.02, 100);
        assert_ne!(a, c);
    }
}
