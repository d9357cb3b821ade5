use std::f64::consts::TAU;

/// Saturation the oscillator pins to while a climax is held.
pub const CLIMAX_SATURATION: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Holding,
}

/// Something the state machine did on a tick worth reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    ClimaxStarted,
    ClimaxEnded,
    Rearmed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OscillatorParams {
    /// Seconds for one full saturation cycle.
    pub max_cycle_time: f64,
    /// Seconds saturation stays pinned once a climax starts.
    pub hold_duration: f64,
    /// Climax fires once `CLIMAX_SATURATION - saturation` drops below this.
    pub climax_threshold: f64,
}

impl Default for OscillatorParams {
    fn default() -> Self {
        Self {
            max_cycle_time: 80.0,
            hold_duration: 20.0,
            climax_threshold: 0.05,
        }
    }
}

/// Saturation cycles through [-1, 3]; near its peak it freezes at 2 for a
/// dwell period, then resumes. The detector re-arms once saturation dips
/// below zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Oscillator {
    params: OscillatorParams,
    elapsed: f64,
    saturation: f64,
    hold_remaining: f64,
    climaxed: bool,
}

impl Oscillator {
    pub fn new(params: OscillatorParams) -> Self {
        Self {
            params,
            elapsed: 0.0,
            saturation: 1.0,
            hold_remaining: 0.0,
            climaxed: false,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn hold_remaining(&self) -> f64 {
        self.hold_remaining
    }

    pub fn climaxed(&self) -> bool {
        self.climaxed
    }

    pub fn phase(&self) -> Phase {
        if self.hold_remaining > 0.0 {
            Phase::Holding
        } else {
            Phase::Running
        }
    }

    /// Raw oscillator curve at time `t`, ignoring any hold.
    pub fn saturation_at(&self, t: f64) -> f64 {
        1.0 + (t / self.params.max_cycle_time * TAU).sin() * 2.0
    }

    pub fn advance(&mut self, dt: f64) -> Option<Transition> {
        let was = self.phase();
        let mut transition = None;

        if was == Phase::Running {
            self.elapsed += dt;
            self.saturation = self.saturation_at(self.elapsed);

            if CLIMAX_SATURATION - self.saturation < self.params.climax_threshold
                && !self.climaxed
            {
                self.saturation = CLIMAX_SATURATION;
                self.hold_remaining = self.params.hold_duration;
                self.climaxed = true;
                transition = Some(Transition::ClimaxStarted);
            }

            if self.saturation < 0.0 && self.climaxed {
                self.climaxed = false;
                transition = Some(Transition::Rearmed);
            }
        }

        self.hold_remaining -= dt;

        if was == Phase::Holding && self.phase() == Phase::Running {
            transition = Some(Transition::ClimaxEnded);
        }
        transition
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new(OscillatorParams::default())
    }
}
