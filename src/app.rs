use crate::input::{poll_actions, Action};
use crate::render::{draw_line, grid_to_cells, Terminal};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::style::Color;
use log::info;
use pixelated::{
    config::{DEFAULT_HEIGHT, DEFAULT_STATIC_DENSITY, DEFAULT_WIDTH},
    ChannelPolicy, DiffusionField, FieldConfig, Phase, RoundingMode, ScanMode,
};
use std::io::{self, Write};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

const HUD_ROWS: u16 = 1;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum RoundingArg {
    Nearest,
    Truncate,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum ChannelArg {
    Clamp,
    Wrap,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum ScanArg {
    Double,
    InPlace,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "pixelated")]
#[command(about = "Breathing diffusion-field color toy. Seizure warning: it flashes.", long_about = None)]
pub(crate) struct Args {
    /// RNG seed for static pixel placement (default: current time)
    #[arg(long)]
    seed: Option<u64>,

    /// FPS cap for the terminal view
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// grid width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// grid height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// fraction of pixels seeded as static color sources
    #[arg(long, default_value_t = DEFAULT_STATIC_DENSITY)]
    density: f64,

    /// how computed channels become integers
    #[arg(long, value_enum, default_value_t = RoundingArg::Truncate)]
    rounding: RoundingArg,

    /// what happens to channels outside 0..=255
    #[arg(long, value_enum, default_value_t = ChannelArg::Clamp)]
    channels: ChannelArg,

    /// double-buffered update or a single in-place pass
    #[arg(long, value_enum, default_value_t = ScanArg::Double)]
    scan: ScanArg,

    /// let static pixels blend like every other pixel
    #[arg(long, default_value_t = false)]
    no_preserve_statics: bool,

    /// run N frames without a terminal and print one summary line per frame
    #[arg(long)]
    frames: Option<u64>,

    /// seconds per frame in headless mode
    #[arg(long, default_value_t = 1.0 / 30.0)]
    dt: f64,
}

impl Args {
    fn field_config(&self) -> FieldConfig {
        let seed = self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or(Duration::from_secs(0))
                .as_secs()
        });
        FieldConfig {
            width: self.width,
            height: self.height,
            static_density: self.density,
            seed,
            preserve_statics: !self.no_preserve_statics,
            rounding: match self.rounding {
                RoundingArg::Nearest => RoundingMode::Nearest,
                RoundingArg::Truncate => RoundingMode::Truncate,
            },
            channels: match self.channels {
                ChannelArg::Clamp => ChannelPolicy::Clamp,
                ChannelArg::Wrap => ChannelPolicy::Wrap,
            },
            scan: match self.scan {
                ScanArg::Double => ScanMode::DoubleBuffered,
                ScanArg::InPlace => ScanMode::InPlace,
            },
            ..FieldConfig::default()
        }
    }
}

pub(crate) fn run(args: Args) -> Result<()> {
    let cfg = args.field_config();
    info!("starting with {cfg:?}");
    let field = DiffusionField::new(cfg).context("invalid field configuration")?;

    match args.frames {
        Some(n) => run_headless(field, n, args.dt),
        None => run_interactive(field, args.fps),
    }
}

fn phase_name(p: Phase) -> &'static str {
    match p {
        Phase::Running => "running",
        Phase::Holding => "holding",
    }
}

/* -----------------------------
   Headless: fixed dt, stdout summaries
------------------------------ */

fn run_headless(mut field: DiffusionField, frames: u64, dt: f64) -> Result<()> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(anyhow!("--dt must be a non-negative number of seconds, got {dt}"));
    }
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for _ in 0..frames {
        field.tick(dt);
        let s = field.stats();
        writeln!(
            out,
            "frame:{:<6} t:{:>8.3} sat:{:+.4} phase:{} lit:{:<7} mean:({:.2}, {:.2}, {:.2})",
            field.frames(),
            field.oscillator().elapsed(),
            s.saturation,
            phase_name(s.phase),
            s.lit,
            s.mean[0],
            s.mean[1],
            s.mean[2]
        )?;
    }
    writeln!(out, "checksum:{:016x}", fnv1a(&field.to_rgb_bytes()))?;
    out.flush()?;
    Ok(())
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x0100_0000_01b3);
    }
    h
}

/* -----------------------------
   Interactive terminal view
------------------------------ */

fn run_interactive(mut field: DiffusionField, fps: u32) -> Result<()> {
    let fps = fps.clamp(1, 240);
    let frame_dt = Duration::from_secs_f64(1.0 / fps as f64);

    let mut term = Terminal::begin().context("could not set up the terminal")?;

    let mut last_frame = Instant::now();
    let mut fps_timer = Instant::now();
    let mut frames: u32 = 0;
    let mut shown_fps: f32 = 0.0;

    'frames: loop {
        let frame_start = Instant::now();
        term.resize_if_needed()?;

        for action in poll_actions(frame_dt)? {
            match action {
                Action::Quit => break 'frames,
            }
        }

        let now = Instant::now();
        let dt = now.saturating_duration_since(last_frame);
        last_frame = now;
        field.tick(dt.as_secs_f64());

        grid_to_cells(field.snapshot(), &mut term.cur, HUD_ROWS);
        let s = field.stats();
        let osc = field.oscillator();
        let hud = format!(
            "sat:{:+.3}  {}  hold:{:>4.1}s  t:{:>6.1}s  lit:{}  fps:{:>5.1}  (q quit)",
            s.saturation,
            phase_name(s.phase),
            osc.hold_remaining().max(0.0),
            osc.elapsed(),
            s.lit,
            shown_fps
        );
        draw_line(&mut term.cur, 0, &hud, Color::DarkGrey, Color::Black);
        term.present()?;

        frames += 1;
        if fps_timer.elapsed() >= Duration::from_millis(500) {
            shown_fps = frames as f32 / fps_timer.elapsed().as_secs_f32();
            fps_timer = Instant::now();
            frames = 0;
        }

        let spent = frame_start.elapsed();
        if spent < frame_dt {
            std::thread::sleep(frame_dt - spent);
        }
    }

    term.end()?;
    info!("stopped after {} frames", field.frames());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pixelated").chain(argv.iter().copied()))
            .expect("args parse")
    }

    #[test]
    fn defaults_match_field_defaults() {
        let cfg = parse(&["--seed", "7"]).field_config();
        let mut expected = FieldConfig::default();
        expected.seed = 7;
        assert_eq!(cfg, expected);
    }

    #[test]
    fn policy_flags_map_through() {
        let cfg = parse(&[
            "--seed",
            "1",
            "--rounding",
            "nearest",
            "--channels",
            "wrap",
            "--scan",
            "in-place",
            "--no-preserve-statics",
        ])
        .field_config();
        assert_eq!(cfg.rounding, RoundingMode::Nearest);
        assert_eq!(cfg.channels, ChannelPolicy::Wrap);
        assert_eq!(cfg.scan, ScanMode::InPlace);
        assert!(!cfg.preserve_statics);
    }

    #[test]
    fn headless_rejects_bad_dt() {
        let field = DiffusionField::initialize(4, 4, 0.0, 0).unwrap();
        assert!(run_headless(field, 1, -1.0).is_err());
    }

    #[test]
    fn fnv1a_known_values() {
        assert_eq!(fnv1a(b""), 0xcbf29ce484222325);
        assert_eq!(fnv1a(b"a"), 0xaf63dc4c8601ec8c);
    }
}
