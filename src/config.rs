//! Tuning knobs for the epicycle engine.
//!
//! Every constant here has a documented default; [`EpicycleConfig::from_env`]
//! lets a host override them without recompiling.

/// Animation ticks per original sample step.
pub const DEFAULT_POINTS_PER_INTERVAL: usize = 4;

/// Scale factor of the Gibbs padding heuristic
/// `l = floor(gap · scale / distance)`.
pub const DEFAULT_GIBBS_SCALE: f64 = 10.0;

/// Distance divisor of the Gibbs padding heuristic.
pub const DEFAULT_GIBBS_DISTANCE: f64 = 300.0;

/// Upper bound on the Gibbs step count `l`, so far-apart endpoints cannot
/// blow up the padded curve.
pub const DEFAULT_MAX_GIBBS_STEPS: usize = 256;

/// Phase steps advanced per tick. Negative values play backwards.
pub const DEFAULT_SPEED: i32 = 1;

/// How phasor positions are advanced from one tick to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SynthesisStrategy {
    /// Multiply each amplitude by its fixed per-tick rotor. Rounding error
    /// accumulates over very long sessions.
    #[default]
    Accumulated,
    /// Recompute each amplitude as `initial · exp(jωt)` from the phase
    /// position, kept modulo one period.
    AbsoluteTime,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpicycleConfig {
    /// Ticks per original sample step; one period is `points_per_interval · N`
    /// ticks.
    pub points_per_interval: usize,
    pub gibbs_scale: f64,
    pub gibbs_distance: f64,
    /// Cap on the Gibbs step count.
    pub max_gibbs_steps: usize,
    /// Sum and draw only this many bins (after DC). All bins keep rotating.
    pub max_epicycles: Option<usize>,
    /// Draw epicycles as polygons with this many sides instead of circle
    /// primitives.
    pub circle_segments: Option<usize>,
    pub strategy: SynthesisStrategy,
    /// Phase steps per tick; `0` pauses, negative values reverse.
    pub speed: i32,
}

impl Default for EpicycleConfig {
    fn default() -> Self {
        Self {
            points_per_interval: DEFAULT_POINTS_PER_INTERVAL,
            gibbs_scale: DEFAULT_GIBBS_SCALE,
            gibbs_distance: DEFAULT_GIBBS_DISTANCE,
            max_gibbs_steps: DEFAULT_MAX_GIBBS_STEPS,
            max_epicycles: None,
            circle_segments: None,
            strategy: SynthesisStrategy::Accumulated,
            speed: DEFAULT_SPEED,
        }
    }
}

impl EpicycleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values of zero are clamped to one.
    pub fn with_points_per_interval(mut self, points: usize) -> Self {
        self.points_per_interval = points.max(1);
        self
    }

    /// Gibbs padding strength. A non-positive `distance` disables padding.
    pub fn with_gibbs(mut self, scale: f64, distance: f64) -> Self {
        self.gibbs_scale = scale;
        self.gibbs_distance = distance;
        self
    }

    pub fn without_gibbs(self) -> Self {
        self.with_gibbs(0.0, 0.0)
    }

    pub fn with_max_gibbs_steps(mut self, max: usize) -> Self {
        self.max_gibbs_steps = max;
        self
    }

    pub fn with_max_epicycles(mut self, max: usize) -> Self {
        self.max_epicycles = Some(max);
        self
    }

    /// Values below 3 fall back to circle primitives.
    pub fn with_circle_segments(mut self, segments: usize) -> Self {
        self.circle_segments = if segments >= 3 { Some(segments) } else { None };
        self
    }

    pub fn with_strategy(mut self, strategy: SynthesisStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    /// Number of interpolation steps `l` for a gap of length `gap`, at most
    /// `max_gibbs_steps`.
    pub fn gibbs_steps(&self, gap: f64) -> usize {
        if self.gibbs_distance.is_nan() || self.gibbs_distance <= 0.0 || !gap.is_finite() {
            return 0;
        }
        let l = libm::floor(gap * self.gibbs_scale / self.gibbs_distance);
        if l.is_nan() || l <= 0.0 {
            0
        } else if l >= self.max_gibbs_steps as f64 {
            self.max_gibbs_steps
        } else {
            l as usize
        }
    }

    /// Defaults overridden by `EPICYCLES_POINTS_PER_INTERVAL`,
    /// `EPICYCLES_GIBBS_SCALE`, `EPICYCLES_GIBBS_DISTANCE`,
    /// `EPICYCLES_MAX_GIBBS_STEPS` and `EPICYCLES_SPEED`.
    /// Unparsable values are ignored.
    #[cfg(feature = "std")]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let points = std::env::var("EPICYCLES_POINTS_PER_INTERVAL")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.points_per_interval);
        let scale = std::env::var("EPICYCLES_GIBBS_SCALE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(defaults.gibbs_scale);
        let distance = std::env::var("EPICYCLES_GIBBS_DISTANCE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(defaults.gibbs_distance);
        let max_steps = std::env::var("EPICYCLES_MAX_GIBBS_STEPS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.max_gibbs_steps);
        let speed = std::env::var("EPICYCLES_SPEED")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(defaults.speed);
        defaults
            .with_points_per_interval(points)
            .with_gibbs(scale, distance)
            .with_max_gibbs_steps(max_steps)
            .with_speed(speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gibbs_steps_default_heuristic() {
        let cfg = EpicycleConfig::default();
        assert_eq!(cfg.gibbs_steps(0.0), 0);
        assert_eq!(cfg.gibbs_steps(29.9), 0);
        assert_eq!(cfg.gibbs_steps(60.0), 2);
        assert_eq!(cfg.gibbs_steps(300.0), 10);
        assert_eq!(cfg.without_gibbs().gibbs_steps(300.0), 0);
        assert_eq!(cfg.with_gibbs(10.0, f64::NAN).gibbs_steps(300.0), 0);
    }

    #[test]
    fn gibbs_steps_are_capped() {
        let cfg = EpicycleConfig::default();
        assert_eq!(cfg.gibbs_steps(1e13), DEFAULT_MAX_GIBBS_STEPS);
        assert_eq!(cfg.gibbs_steps(f64::MAX), DEFAULT_MAX_GIBBS_STEPS);
        assert_eq!(cfg.with_max_gibbs_steps(5).gibbs_steps(300.0), 5);
        assert_eq!(cfg.with_max_gibbs_steps(0).gibbs_steps(300.0), 0);
    }

    #[test]
    fn builder_clamps() {
        let cfg = EpicycleConfig::new()
            .with_points_per_interval(0)
            .with_circle_segments(2);
        assert_eq!(cfg.points_per_interval, 1);
        assert_eq!(cfg.circle_segments, None);
    }
}
