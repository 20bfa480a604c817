//! Drawing boundary between the epicycle engine and a renderer.
//!
//! The engine never touches a real surface. It calls a [`Canvas`], which may
//! be a renderer adapter or the [`CommandRecorder`] that collects
//! [`DrawCommand`]s for later replay.

use alloc::vec::Vec;

use crate::num::{Complex, TAU};

/// Which part of the picture a primitive belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    /// Faint rendering of the sketched curve.
    ReferenceCurve,
    /// Radius vectors from one epicycle centre to the next.
    EpicycleChain,
    /// The circles themselves.
    EpicycleOutline,
    /// Path traced by the tip of the chain.
    Trace,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Complex,
        to: Complex,
        style: Style,
    },
    Circle {
        center: Complex,
        radius: f64,
        style: Style,
    },
}

impl DrawCommand {
    pub fn style(&self) -> Style {
        match self {
            DrawCommand::Line { style, .. } | DrawCommand::Circle { style, .. } => *style,
        }
    }
}

/// A surface that accepts style changes and primitives in order.
pub trait Canvas {
    fn set_style(&mut self, style: Style);
    fn line(&mut self, from: Complex, to: Complex);
    fn circle(&mut self, center: Complex, radius: f64);
}

/// Canvas that records every primitive with the style active when it was
/// drawn.
#[derive(Clone, Debug)]
pub struct CommandRecorder {
    style: Style,
    commands: Vec<DrawCommand>,
}

impl Default for CommandRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self {
            style: Style::ReferenceCurve,
            commands: Vec::new(),
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            style: Style::ReferenceCurve,
            commands: Vec::with_capacity(n),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Canvas for CommandRecorder {
    fn set_style(&mut self, style: Style) {
        self.style = style;
    }
    fn line(&mut self, from: Complex, to: Complex) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            style: self.style,
        });
    }
    fn circle(&mut self, center: Complex, radius: f64) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            style: self.style,
        });
    }
}

/// Vertices of a closed polygon approximating a circle, starting at angle 0.
/// The first vertex is repeated at the end.
pub fn circle_outline(center: Complex, radius: f64, segments: usize) -> Vec<Complex> {
    (0..=segments)
        .map(|k| {
            let angle = if k == segments {
                0.0
            } else {
                TAU * k as f64 / segments as f64
            };
            center.add(Complex::expi(angle).scale(radius))
        })
        .collect()
}

/// Draw a circle as `segments` line segments.
pub fn draw_polygon_circle<C: Canvas + ?Sized>(
    canvas: &mut C,
    center: Complex,
    radius: f64,
    segments: usize,
) {
    let vertices = circle_outline(center, radius, segments);
    for pair in vertices.windows(2) {
        canvas.line(pair[0], pair[1]);
    }
}

/// Draw segments between consecutive points of `points`.
pub fn draw_polyline<C: Canvas + ?Sized>(canvas: &mut C, points: &[Complex]) {
    for pair in points.windows(2) {
        canvas.line(pair[0], pair[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_tags_primitives_with_current_style() {
        let mut rec = CommandRecorder::new();
        rec.set_style(Style::EpicycleChain);
        rec.line(Complex::zero(), Complex::new(1.0, 0.0));
        rec.set_style(Style::EpicycleOutline);
        rec.circle(Complex::zero(), 2.0);
        let cmds = rec.into_commands();
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].style(), Style::EpicycleChain);
        assert_eq!(
            cmds[1],
            DrawCommand::Circle {
                center: Complex::zero(),
                radius: 2.0,
                style: Style::EpicycleOutline
            }
        );
    }

    #[test]
    fn polygon_circle_is_closed() {
        let pts = circle_outline(Complex::new(1.0, 1.0), 3.0, 40);
        assert_eq!(pts.len(), 41);
        assert_eq!(pts[0], pts[40]);
        for p in &pts {
            assert!((p.sub(Complex::new(1.0, 1.0)).magnitude() - 3.0).abs() < 1e-12);
        }
        let mut rec = CommandRecorder::new();
        draw_polygon_circle(&mut rec, Complex::zero(), 1.0, 6);
        assert_eq!(rec.commands().len(), 6);
    }

    #[test]
    fn polyline_needs_two_points() {
        let mut rec = CommandRecorder::new();
        draw_polyline(&mut rec, &[Complex::zero()]);
        assert!(rec.commands().is_empty());
        draw_polyline(&mut rec, &[Complex::zero(), Complex::new(1.0, 0.0), Complex::new(1.0, 1.0)]);
        assert_eq!(rec.commands().len(), 2);
    }
}
