//! Public descriptor and geometry types.
//!
//! These are intentionally lightweight and `Clone`-friendly: the engine copies what it needs into
//! its internal arena and never mutates caller-visible data, so `layout` stays a pure function of
//! (graph, configuration).

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Direction in which layers (ranks) grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    North,
    #[default]
    South,
    East,
    West,
}

/// Tunables for one layout invocation. Defaults are applied here, at the call boundary; the
/// engine carries no process-wide mutable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub orientation: Orientation,
    /// Vertical gap between consecutive ranks (along the growth axis).
    pub inter_rank_spacing: f64,
    /// Minimum gap between two real nodes sharing a rank.
    pub intra_rank_spacing: f64,
    /// Number of alternating crossing-minimization sweeps.
    pub crossing_sweep_count: usize,
    /// Iteration bound for the x-coordinate relaxation.
    pub coordinate_relaxation_iterations: usize,
    /// Inset between a group's border and its children's bounding box.
    pub group_padding: f64,
    /// Minimum gap around dummy (edge-routing) nodes, and the offset step for
    /// self-loop routing.
    pub parallel_edge_spacing: f64,
    /// How a node's target x is aggregated from its neighbors during relaxation.
    pub alignment: Alignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Average,
    Median,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::South,
            inter_rank_spacing: 50.0,
            intra_rank_spacing: 20.0,
            crossing_sweep_count: 8,
            coordinate_relaxation_iterations: 4,
            group_padding: 10.0,
            parallel_edge_spacing: 10.0,
            alignment: Alignment::Average,
        }
    }
}

impl LayoutConfig {
    /// Rejects negative or non-finite metric options before any stage runs.
    pub fn validate(&self) -> Result<()> {
        let checks: [(&'static str, f64); 4] = [
            ("inter_rank_spacing", self.inter_rank_spacing),
            ("intra_rank_spacing", self.intra_rank_spacing),
            ("group_padding", self.group_padding),
            ("parallel_edge_spacing", self.parallel_edge_spacing),
        ];
        for (option, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::ConfigurationOutOfRange { option, value });
            }
        }
        Ok(())
    }
}

/// One caller vertex. A non-empty `children` list makes the vertex a group: its children form a
/// nested sub-model that is laid out independently and composed into the parent's cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexDescriptor {
    pub id: String,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VertexDescriptor>,
}

impl VertexDescriptor {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDescriptor {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl EdgeDescriptor {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// The caller's graph: a vertex forest (groups may nest) plus a flat edge list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub vertices: Vec<VertexDescriptor>,
    pub edges: Vec<EdgeDescriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A vertex with its final top-left corner in the chosen orientation. `width`/`height` echo the
/// input except for groups (grown to contain their children) and East/West orientations (axes
/// swapped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedVertex {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// An edge with its routed waypoints, ordered from the original source toward the original
/// target. Empty for edges that span a single rank step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedEdge {
    pub id: String,
    pub waypoints: Vec<Point>,
}

/// Final geometry. Vertices are emitted in input (pre-order) order and edges in input order, so
/// identical inputs produce byte-identical results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub width: f64,
    pub height: f64,
    pub vertices: Vec<PositionedVertex>,
    pub edges: Vec<RoutedEdge>,
}
