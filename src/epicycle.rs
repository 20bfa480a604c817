//! Tick-driven epicycle synthesis.
//!
//! [`Epicycles`] turns a sketched curve into a chain of rotating phasors.
//! Construction pads the curve to soften the jump between its last and first
//! points, clones it for reference rendering, and takes its
//! [direct transform](crate::dft::direct_transform). Every [`tick`] then
//! advances each phasor by a fixed angle, draws the partial-sum chain, and
//! appends the chain's tip to the trace. After `points_per_interval · N`
//! ticks the trace has covered one period and is cleared.
//!
//! `tick` takes `&mut self`: the phasor state left by one call is the input of
//! the next, so ticks on one engine are strictly serial.
//!
//! [`tick`]: Epicycles::tick

use alloc::vec::Vec;

use crate::config::{EpicycleConfig, SynthesisStrategy};
use crate::dft::{direct_transform, FrequencyTable};
use crate::draw::{draw_polygon_circle, draw_polyline, Canvas, CommandRecorder, DrawCommand, Style};
use crate::error::FourierError;
use crate::num::{Complex, TAU};
use crate::sequence::ComplexSequence;

/// Everything one tick produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    /// Tip of the full partial sum, also appended to the trace.
    pub trace_point: Complex,
}

/// Append interpolated points from the last point toward the first.
///
/// With `gap = first − last` and `l = config.gibbs_steps(|gap|)`, `l − 1`
/// points are appended, each one `gap / l` beyond the previous, leaving a
/// final step of `gap / l` back to the start. Returns the number of points
/// appended.
pub fn gibbs_padding(points: &mut ComplexSequence, config: &EpicycleConfig) -> usize {
    let (first, last) = match (points.first(), points.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return 0,
    };
    let gap = first.sub(last);
    let l = config.gibbs_steps(gap.magnitude());
    if l < 2 {
        return 0;
    }
    let step = gap.scale(1.0 / l as f64);
    let mut cursor = last;
    for _ in 1..l {
        cursor.add_by(step);
        points.push(cursor);
    }
    l - 1
}

/// Bins in the order the chain visits them: `1, N−1, 2, N−2, …` for
/// `i < N/2`, then `N/2` when `N` is even. Bin 0 is the chain's anchor.
fn visit_order(n: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(n.saturating_sub(1));
    for i in 1..n / 2 {
        order.push(i);
        order.push(n - i);
    }
    if n % 2 == 0 && n >= 2 {
        order.push(n / 2);
    }
    order
}

/// Trace capacity reserved up front; longer periods grow the trace on demand.
const MAX_TRACE_RESERVE: usize = 4096;

/// `exp(j·omega·speed)` for each bin.
fn stepped_rotors(omegas: &[f64], speed: i32) -> Vec<Complex> {
    omegas
        .iter()
        .map(|&w| Complex::expi(w * speed as f64))
        .collect()
}

/// `phase + step` modulo `period`, for `phase, step < period`.
fn advance_phase(phase: usize, step: usize, period: usize) -> usize {
    let room = period - phase;
    if step >= room {
        step - room
    } else {
        phase + step
    }
}

#[derive(Clone, Debug)]
pub struct Epicycles {
    config: EpicycleConfig,
    amplitudes: ComplexSequence,
    initial: Vec<Complex>,
    /// Per-step phase advance of each bin.
    omegas: Vec<f64>,
    /// Per-tick rotor of each bin at the current speed.
    rotors: Vec<Complex>,
    original: ComplexSequence,
    trace: ComplexSequence,
    frequencies: FrequencyTable,
    order: Vec<usize>,
    period: usize,
    /// Phase position in `0..period`, used by [`SynthesisStrategy::AbsoluteTime`].
    phase: usize,
    /// Steps covered by the current trace.
    progress: usize,
    ticks: u64,
}

impl Epicycles {
    /// Engine with the default configuration.
    pub fn new(points: &[Complex]) -> Result<Self, FourierError> {
        Self::with_config(points, EpicycleConfig::default())
    }

    pub fn with_config(points: &[Complex], config: EpicycleConfig) -> Result<Self, FourierError> {
        Self::from_sequence(ComplexSequence::from(points), config)
    }

    /// Engine from `(x, y)` pairs.
    pub fn from_points(points: &[(f64, f64)], config: EpicycleConfig) -> Result<Self, FourierError> {
        Self::from_sequence(points.iter().map(|&p| Complex::from(p)).collect(), config)
    }

    pub fn from_sequence(
        mut points: ComplexSequence,
        mut config: EpicycleConfig,
    ) -> Result<Self, FourierError> {
        if points.is_empty() {
            return Err(FourierError::EmptyInput);
        }
        config.points_per_interval = config.points_per_interval.max(1);
        let sketched = points.len();
        let padded = gibbs_padding(&mut points, &config);
        let n = points.len();
        let period = config
            .points_per_interval
            .checked_mul(n)
            .ok_or(FourierError::PeriodOverflow {
                points_per_interval: config.points_per_interval,
                len: n,
            })?;
        let original = points.clone();
        let amplitudes = direct_transform(&points);
        let frequencies = FrequencyTable::new(n);
        let omegas: Vec<f64> = frequencies
            .iter()
            .map(|&f| -(f as f64) * TAU / period as f64)
            .collect();
        let rotors = stepped_rotors(&omegas, config.speed);
        log::debug!(
            "epicycles: {} sketched points, {} padded, period {} ticks",
            sketched,
            padded,
            period
        );
        Ok(Self {
            config,
            initial: amplitudes.as_slice().to_vec(),
            amplitudes,
            omegas,
            rotors,
            original,
            trace: ComplexSequence::with_capacity(period.min(MAX_TRACE_RESERVE)),
            frequencies,
            order: visit_order(n),
            period,
            phase: 0,
            progress: 0,
            ticks: 0,
        })
    }

    /// Advance one tick and return the primitives it drew.
    pub fn tick(&mut self) -> Frame {
        let estimate = self.original.len() + 2 * self.order.len() + self.trace.len() + 1;
        let mut recorder = CommandRecorder::with_capacity(estimate);
        let trace_point = self.tick_into(&mut recorder);
        Frame {
            commands: recorder.into_commands(),
            trace_point,
        }
    }

    /// Advance one tick, drawing straight onto `canvas`. Returns the new trace
    /// point.
    pub fn tick_into<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> Complex {
        canvas.set_style(Style::ReferenceCurve);
        draw_polyline(canvas, self.original.as_slice());

        let speed = self.config.speed;
        let step = (speed as i128).rem_euclid(self.period as i128) as usize;
        self.phase = advance_phase(self.phase, step, self.period);

        let limit = self.config.max_epicycles.unwrap_or(usize::MAX);
        let amplitudes = self.amplitudes.as_mut_slice();
        let mut chain = amplitudes[0];
        for (visited, &index) in self.order.iter().enumerate() {
            match self.config.strategy {
                SynthesisStrategy::Accumulated => amplitudes[index].mul_by(self.rotors[index]),
                SynthesisStrategy::AbsoluteTime => {
                    amplitudes[index] = self.initial[index]
                        .mul(Complex::expi(self.omegas[index] * self.phase as f64));
                }
            }
            if visited >= limit {
                continue;
            }
            let amplitude = amplitudes[index];
            let mut next = chain.add(amplitude);
            canvas.set_style(Style::EpicycleChain);
            canvas.line(chain, next);
            canvas.set_style(Style::EpicycleOutline);
            match self.config.circle_segments {
                Some(segments) => {
                    draw_polygon_circle(canvas, chain, amplitude.magnitude(), segments)
                }
                None => canvas.circle(chain, amplitude.magnitude()),
            }
            Complex::swap(&mut chain, &mut next);
        }

        // A paused engine would only repeat its last point.
        if speed != 0 {
            self.trace.push(chain);
        }
        canvas.set_style(Style::Trace);
        draw_polyline(canvas, self.trace.as_slice());
        self.progress = self
            .progress
            .saturating_add(speed.unsigned_abs() as usize);
        self.ticks += 1;
        if self.progress >= self.period {
            log::debug!("epicycles: period complete after {} ticks", self.ticks);
            self.trace.clear();
            self.progress = 0;
        }
        chain
    }

    /// Rewind to the state right after construction. Speed and the epicycle
    /// limit keep their current values.
    pub fn restart(&mut self) {
        self.amplitudes = self.initial.clone().into();
        self.trace.clear();
        self.phase = 0;
        self.progress = 0;
        self.ticks = 0;
    }

    /// Change how many bins are summed and drawn from the next tick on.
    pub fn set_max_epicycles(&mut self, max: Option<usize>) {
        self.config.max_epicycles = max;
    }

    /// Change the number of phase steps per tick. `0` pauses the animation
    /// and negative values play it backwards.
    pub fn set_speed(&mut self, speed: i32) {
        if speed != self.config.speed {
            self.config.speed = speed;
            self.rotors = stepped_rotors(&self.omegas, speed);
        }
    }

    pub fn speed(&self) -> i32 {
        self.config.speed
    }

    /// Current (rotated) spectral amplitudes.
    pub fn amplitudes(&self) -> &ComplexSequence {
        &self.amplitudes
    }

    /// The padded input curve.
    pub fn original(&self) -> &ComplexSequence {
        &self.original
    }

    pub fn trace(&self) -> &ComplexSequence {
        &self.trace
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// Number of bins, i.e. the padded curve length.
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Steps in one full period, `points_per_interval · len()`.
    pub fn period(&self) -> usize {
        self.period
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &EpicycleConfig {
        &self.config
    }
}
