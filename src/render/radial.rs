//! Radial impact chart
//!
//! A half-circle gauge for the score with the factors scattered around the
//! center like a radar plot. Everything is redrawn from scratch on each call.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use image::Rgba;

use super::{colors, ArcStroke, Paint, Point, Surface, TextAlign, TextStyle};
use crate::models::{Factor, ImpactAssessment, ImpactLevel};

/// Gap between the disc and the surface edge
const MARGIN: f64 = 20.0;
const TRACK_WIDTH: f64 = 20.0;
/// Inset of the factor plot from the disc edge
const FACTOR_INSET: f64 = 40.0;
const LABEL_OFFSET: f64 = 15.0;
const DOT_RADIUS: f64 = 6.0;

const GAUGE_START: f64 = PI;
const ANGLE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub center: Point,
    pub radius: f64,
}

impl ChartGeometry {
    /// None when the surface is too small to hold the disc
    pub fn for_size(width: u32, height: u32) -> Option<Self> {
        let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
        let radius = cx.min(cy) - MARGIN;
        (radius > 0.0).then(|| Self {
            center: Point::new(cx, cy),
            radius,
        })
    }

    fn track_radius(&self) -> f64 {
        self.radius - TRACK_WIDTH / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactorPlacement {
    pub angle: f64,
    pub point: Point,
    pub label_at: Point,
    pub align: TextAlign,
}

pub fn level_color(level: ImpactLevel) -> Rgba<u8> {
    match level {
        ImpactLevel::High => colors::RED,
        ImpactLevel::Medium => colors::AMBER,
        ImpactLevel::Low => colors::EMERALD,
    }
}

/// Angle where the filled part of the gauge stops
pub fn gauge_end_angle(score: u8) -> f64 {
    GAUGE_START + PI * (score.min(100) as f64 / 100.0)
}

/// Left-aligned on the right half of the circle, right-aligned on the left
pub fn label_align(angle: f64) -> TextAlign {
    // normalize into (-PI, PI]
    let mut a = angle.rem_euclid(TAU);
    if a > PI {
        a -= TAU;
    }

    if a.abs() <= FRAC_PI_2 + ANGLE_EPSILON {
        TextAlign::Left
    } else {
        TextAlign::Right
    }
}

pub fn factor_layout(geometry: &ChartGeometry, factors: &[Factor]) -> Vec<FactorPlacement> {
    if factors.is_empty() {
        return Vec::new();
    }

    let step = TAU / factors.len() as f64;
    let reach = geometry.radius - FACTOR_INSET;

    factors
        .iter()
        .enumerate()
        .map(|(index, factor)| {
            let angle = index as f64 * step;
            let value = factor.value.clamp(0.0, 100.0);
            FactorPlacement {
                angle,
                point: geometry.center.polar(angle, reach * value / 100.0),
                label_at: geometry.center.polar(angle, geometry.radius + LABEL_OFFSET),
                align: label_align(angle),
            }
        })
        .collect()
}

/// Paint `assessment` onto `surface`; a missing or empty surface is a no-op
pub fn render<S: Surface + ?Sized>(surface: Option<&mut S>, assessment: &ImpactAssessment) {
    let Some(surface) = surface else {
        tracing::debug!("No chart surface, skipping render");
        return;
    };

    let Some(geometry) = ChartGeometry::for_size(surface.width(), surface.height()) else {
        tracing::debug!(
            "Chart surface {}x{} too small, skipping render",
            surface.width(),
            surface.height()
        );
        return;
    };

    surface.clear();

    let center = geometry.center;
    surface.fill_circle(center, geometry.radius, colors::SLATE_100);

    let track = ArcStroke {
        center,
        radius: geometry.track_radius(),
        start_angle: GAUGE_START,
        end_angle: GAUGE_START + PI,
        width: TRACK_WIDTH,
    };
    surface.stroke_arc(&track, &Paint::Solid(colors::SLATE_200));

    let filled = ArcStroke {
        end_angle: gauge_end_angle(assessment.score),
        ..track
    };
    let gradient = Paint::HorizontalGradient {
        x0: 0.0,
        x1: surface.width() as f64,
        from: colors::ORANGE,
        to: level_color(assessment.level),
    };
    surface.stroke_arc(&filled, &gradient);

    let heading = |size, align| TextStyle {
        size,
        color: colors::SLATE_900,
        align,
    };
    surface.fill_text(
        &assessment.score.to_string(),
        Point::new(center.x, center.y - 10.0),
        &heading(32.0, TextAlign::Center),
    );
    surface.fill_text(
        &assessment.level.as_str().to_uppercase(),
        Point::new(center.x, center.y + 20.0),
        &heading(16.0, TextAlign::Center),
    );

    for (placement, factor) in factor_layout(&geometry, &assessment.factors)
        .iter()
        .zip(&assessment.factors)
    {
        surface.fill_circle(placement.point, DOT_RADIUS, colors::ORANGE);
        surface.stroke_line(center, placement.point, 1.0, colors::SLATE_300);
        surface.fill_text(
            &factor.name,
            placement.label_at,
            &TextStyle {
                size: 12.0,
                color: colors::SLATE_500,
                align: placement.align,
            },
        );
    }
}
