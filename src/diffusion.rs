use crate::color::{quantize, ChannelPolicy, Rgb, RoundingMode};
use crate::grid::Grid;
use crate::statics::StaticPixels;

/// Order in which a step reads and writes pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanMode {
    /// Every neighbor read sees the previous frame.
    #[default]
    DoubleBuffered,
    /// Single column-major pass over the live buffer; later pixels see
    /// neighbors already updated this frame.
    InPlace,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
    pub saturation: f64,
    pub preserve_statics: bool,
    pub rounding: RoundingMode,
    pub channels: ChannelPolicy,
}

/// Relaxation of one channel toward its neighbor mean:
/// `old + (1/n) * (sum + (s - 2) - n*old) * s`.
#[inline]
pub fn relax(old: f64, sum: f64, n: usize, saturation: f64) -> f64 {
    let n = n as f64;
    old + (1.0 / n) * (sum + (saturation - 2.0) - n * old) * saturation
}

fn next_color(src: &Grid, x: usize, y: usize, p: &StepParams) -> Rgb {
    let old = src.get(x, y);
    let (sum, n) = src.neighbor_sum(x, y);
    if n == 0 {
        return old;
    }
    let mut out = [0u8; 3];
    for (c, (&o, &s)) in old.channels().iter().zip(sum.iter()).enumerate() {
        out[c] = quantize(relax(o as f64, s, n, p.saturation), p.rounding, p.channels);
    }
    Rgb::from_channels(out)
}

/// Computes the next frame of `src` into `dst`. `dst` must match `src` in size.
pub fn step_into(src: &Grid, dst: &mut Grid, statics: &StaticPixels, p: &StepParams) {
    assert_eq!(
        (src.width(), src.height()),
        (dst.width(), dst.height()),
        "back buffer size mismatch"
    );
    let w = src.width();
    let out = dst.cells_mut();
    for y in 0..src.height() {
        for x in 0..w {
            let i = x + y * w;
            out[i] = if p.preserve_statics && statics.contains(x, y) {
                src.get(x, y)
            } else {
                next_color(src, x, y, p)
            };
        }
    }
}

/// Single-buffer pass, x outer and y inner, reading pixels already
/// written earlier in the same pass.
pub fn step_in_place(grid: &mut Grid, statics: &StaticPixels, p: &StepParams) {
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            if p.preserve_statics && statics.contains(x, y) {
                continue;
            }
            let c = next_color(grid, x, y, p);
            grid.set(x, y, c);
        }
    }
}

/// One diffusion step. `back` is scratch space for double buffering and is
/// swapped with `front` afterwards.
pub fn step(
    front: &mut Grid,
    back: &mut Grid,
    statics: &StaticPixels,
    p: &StepParams,
    scan: ScanMode,
) {
    match scan {
        ScanMode::DoubleBuffered => {
            step_into(front, back, statics, p);
            std::mem::swap(front, back);
        }
        ScanMode::InPlace => step_in_place(front, statics, p),
    }
}
