use super::surface::{DrawSurface, StrokeStyle};
use crate::domain::errors::RenderingResult;
use serde::Serialize;
use std::fmt::Write;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Polyline { points: Vec<(f64, f64)>, color: String, width: f64 },
    Circle { center: (f64, f64), radius: f64, color: String },
    Line { from: (f64, f64), to: (f64, f64), color: String, width: f64, dash: Option<f64> },
}

/// Headless surface that keeps every call, for tests and debugging dumps.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands other than `Clear`
    pub fn primitives(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| !matches!(c, DrawCommand::Clear { .. }))
    }

    /// One line per command, coordinates rounded to 0.1 px.
    pub fn to_text(&self) -> String {
        let pt = |(x, y): (f64, f64)| format!("({x:.1}, {y:.1})");
        let mut out = String::new();
        for command in &self.commands {
            let _ = match command {
                DrawCommand::Clear { width, height } => writeln!(out, "clear {width:.0}x{height:.0}"),
                DrawCommand::Polyline { points, color, width } => {
                    let path: Vec<String> = points.iter().copied().map(pt).collect();
                    writeln!(out, "polyline {color} w={width:.1} {}", path.join(" "))
                }
                DrawCommand::Circle { center, radius, color } => {
                    writeln!(out, "circle {color} r={radius:.1} {}", pt(*center))
                }
                DrawCommand::Line { from, to, color, width, dash } => {
                    let dash = dash.map(|d| format!(" dash={d:.1}")).unwrap_or_default();
                    writeln!(out, "line {color} w={width:.1}{dash} {} -> {}", pt(*from), pt(*to))
                }
            };
        }
        out
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Clear { width, height });
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)], style: &StrokeStyle) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            color: style.color.clone(),
            width: style.width,
        });
        Ok(())
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: &str) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Circle { center, radius, color: color.to_string() });
        Ok(())
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), style: &StrokeStyle) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color: style.color.clone(),
            width: style.width,
            dash: style.dash,
        });
        Ok(())
    }
}
