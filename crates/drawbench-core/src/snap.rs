//! Object snap: resolves a pointer position to nearby shape geometry or grid.

use crate::geometry::{distance, distance_squared};
use crate::shapes::{Shape, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default snap tolerance in pixels.
pub const DEFAULT_SNAP_DISTANCE: f64 = 10.0;

/// Default grid cell size in pixels.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Snap engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapSettings {
    /// Master switch; when off, queries return the input unchanged.
    pub enabled: bool,
    /// Snap tolerance in pixels. Candidates at or beyond this distance lose.
    pub snap_distance: f64,
    /// Grid snapping switch.
    pub grid_snap: bool,
    /// Grid cell size in pixels.
    pub grid_size: f64,
    /// Produce corner (endpoint) candidates.
    pub endpoints: bool,
    /// Produce edge-midpoint candidates.
    pub midpoints: bool,
    /// Produce bounding-box-center candidates.
    pub centers: bool,
    /// Produce intersection candidates (reserved; never produced).
    pub intersections: bool,
    /// Whether the UI should draw snap indicators.
    pub show_indicators: bool,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            snap_distance: DEFAULT_SNAP_DISTANCE,
            grid_snap: true,
            grid_size: DEFAULT_GRID_SIZE,
            endpoints: true,
            midpoints: true,
            centers: true,
            intersections: false,
            show_indicators: true,
        }
    }
}

/// Partial update for [`SnapSettings`]; `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapSettingsPatch {
    pub enabled: Option<bool>,
    pub snap_distance: Option<f64>,
    pub grid_snap: Option<bool>,
    pub grid_size: Option<f64>,
    pub endpoints: Option<bool>,
    pub midpoints: Option<bool>,
    pub centers: Option<bool>,
    pub intersections: Option<bool>,
    pub show_indicators: Option<bool>,
}

impl SnapSettings {
    /// Merge a patch into the settings.
    pub fn apply(&mut self, patch: SnapSettingsPatch) {
        if let Some(v) = patch.enabled {
            self.enabled = v;
        }
        if let Some(v) = patch.snap_distance {
            self.snap_distance = v;
        }
        if let Some(v) = patch.grid_snap {
            self.grid_snap = v;
        }
        if let Some(v) = patch.grid_size {
            self.grid_size = v;
        }
        if let Some(v) = patch.endpoints {
            self.endpoints = v;
        }
        if let Some(v) = patch.midpoints {
            self.midpoints = v;
        }
        if let Some(v) = patch.centers {
            self.centers = v;
        }
        if let Some(v) = patch.intersections {
            self.intersections = v;
        }
        if let Some(v) = patch.show_indicators {
            self.show_indicators = v;
        }
    }
}

/// Kind of snap candidate, for visual feedback and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapPointKind {
    /// Corner of a shape's bounding box.
    Endpoint,
    /// Midpoint of a bounding-box edge.
    Midpoint,
    /// Center of a shape's bounding box.
    Center,
    /// Intersection of two shapes (not produced by this engine).
    Intersection,
    /// Foot of a perpendicular (not produced by this engine).
    Perpendicular,
    /// Tangent point (not produced by this engine).
    Tangent,
}

/// A computed point of interest on a shape. Ephemeral; recomputed per query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoint {
    /// Candidate location.
    pub position: Point,
    /// What kind of point this is.
    pub kind: SnapPointKind,
    /// Owning shape.
    pub shape_id: ShapeId,
    /// Distance to the query point, filled in by the nearest-match query.
    pub distance: Option<f64>,
}

/// How a snap query resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapSource {
    /// Nothing qualified; the input position is returned unchanged.
    None,
    /// Snapped to a grid cell.
    Grid,
    /// Snapped to shape geometry.
    Object(SnapPoint),
}

/// Result of [`ObjectSnap::snapped_position`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapOutcome {
    /// The resolved position.
    pub position: Point,
    /// What, if anything, the position snapped to.
    pub source: SnapSource,
}

impl SnapOutcome {
    pub fn is_snapped(&self) -> bool {
        !matches!(self.source, SnapSource::None)
    }
}

/// Snap engine over a shape collection.
#[derive(Debug, Clone, Default)]
pub struct ObjectSnap {
    settings: SnapSettings,
}

impl ObjectSnap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SnapSettings) -> Self {
        Self { settings }
    }

    /// Current settings, as a copy.
    pub fn settings(&self) -> SnapSettings {
        self.settings
    }

    /// Merge a settings patch.
    pub fn update_settings(&mut self, patch: SnapSettingsPatch) {
        self.settings.apply(patch);
    }

    /// Generate snap candidates for every shape, per the enabled kinds.
    ///
    /// Order is the tie-break rule: shapes in list order, and per shape
    /// corners, then edge midpoints, then the center.
    pub fn snap_points(&self, shapes: &[Shape]) -> Vec<SnapPoint> {
        let mut points = Vec::new();
        for shape in shapes {
            let bounds = shape.bounds();
            let id = shape.id();

            if self.settings.endpoints {
                for corner in [
                    Point::new(bounds.x0, bounds.y0),
                    Point::new(bounds.x1, bounds.y0),
                    Point::new(bounds.x1, bounds.y1),
                    Point::new(bounds.x0, bounds.y1),
                ] {
                    points.push(SnapPoint {
                        position: corner,
                        kind: SnapPointKind::Endpoint,
                        shape_id: id,
                        distance: None,
                    });
                }
            }

            if self.settings.midpoints {
                let mid_x = (bounds.x0 + bounds.x1) / 2.0;
                let mid_y = (bounds.y0 + bounds.y1) / 2.0;
                for midpoint in [
                    Point::new(mid_x, bounds.y0),
                    Point::new(bounds.x1, mid_y),
                    Point::new(mid_x, bounds.y1),
                    Point::new(bounds.x0, mid_y),
                ] {
                    points.push(SnapPoint {
                        position: midpoint,
                        kind: SnapPointKind::Midpoint,
                        shape_id: id,
                        distance: None,
                    });
                }
            }

            if self.settings.centers {
                points.push(SnapPoint {
                    position: bounds.center(),
                    kind: SnapPointKind::Center,
                    shape_id: id,
                    distance: None,
                });
            }
        }
        points
    }

    /// Find the closest candidate strictly within the snap tolerance.
    ///
    /// Candidates belonging to `exclude` are skipped (self-snap prevention).
    /// The first candidate at the minimum distance wins.
    pub fn find_nearest(
        &self,
        target: Point,
        candidates: &[SnapPoint],
        exclude: Option<ShapeId>,
    ) -> Option<SnapPoint> {
        let threshold_sq = self.settings.snap_distance * self.settings.snap_distance;
        let mut best: Option<SnapPoint> = None;
        let mut best_dist_sq = threshold_sq;

        for candidate in candidates {
            if Some(candidate.shape_id) == exclude {
                continue;
            }
            let dist_sq = distance_squared(target, candidate.position);
            if dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                best = Some(*candidate);
            }
        }

        best.map(|mut point| {
            point.distance = Some(best_dist_sq.sqrt());
            point
        })
    }

    /// Round a position to the nearest grid cell, per axis.
    /// Identity when grid snapping is disabled.
    pub fn snap_to_grid(&self, position: Point) -> Point {
        if !self.settings.grid_snap {
            return position;
        }
        let grid = self.settings.grid_size;
        Point::new(
            (position.x / grid).round() * grid,
            (position.y / grid).round() * grid,
        )
    }

    /// Resolve a target position against the shape collection.
    ///
    /// Object snap takes priority over grid snap; a grid cell only wins when
    /// no object candidate qualifies and the cell itself is within the snap
    /// tolerance. Otherwise the target is returned unchanged.
    pub fn snapped_position(
        &self,
        target: Point,
        shapes: &[Shape],
        exclude: Option<ShapeId>,
    ) -> SnapOutcome {
        if !self.settings.enabled {
            return SnapOutcome {
                position: target,
                source: SnapSource::None,
            };
        }

        let candidates = self.snap_points(shapes);
        if let Some(point) = self.find_nearest(target, &candidates, exclude) {
            return SnapOutcome {
                position: point.position,
                source: SnapSource::Object(point),
            };
        }

        if self.settings.grid_snap {
            let grid_point = self.snap_to_grid(target);
            if distance(target, grid_point) < self.settings.snap_distance {
                return SnapOutcome {
                    position: grid_point,
                    source: SnapSource::Grid,
                };
            }
        }

        SnapOutcome {
            position: target,
            source: SnapSource::None,
        }
    }
}
