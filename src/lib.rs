//! Hierarchical (layered) directed-graph layout.
//!
//! The engine assigns every vertex to a discrete layer, permutes layers to reduce edge crossings,
//! and computes final coordinates (the Sugiyama framework). Input graphs may contain cycles,
//! disconnected components, parallel edges, self-loops, and nested groups. [`layout`] is a pure,
//! synchronous function of (graph, configuration): no rendering, no I/O, no shared mutable state,
//! and byte-identical output for identical input.
//!
//! ```
//! use sirenia::{EdgeDescriptor, GraphDescription, LayoutConfig, VertexDescriptor, layout};
//!
//! let graph = GraphDescription {
//!     vertices: vec![
//!         VertexDescriptor::new("a", 40.0, 30.0),
//!         VertexDescriptor::new("b", 40.0, 30.0),
//!     ],
//!     edges: vec![EdgeDescriptor::new("e1", "a", "b")],
//! };
//! let result = layout(&graph, &LayoutConfig::default()).unwrap();
//! assert_eq!(result.vertices[1].y, 30.0 + 50.0);
//! ```

pub mod acyclic;
pub mod builder;
pub mod coordinate_system;
pub mod error;
pub mod graph;
pub mod model;
pub mod normalize;
pub mod order;
pub mod pipeline;
pub mod position;
pub mod rank;

pub use error::{LayoutError, Result};
pub use model::{
    Alignment, EdgeDescriptor, GraphDescription, LayoutConfig, LayoutResult, Orientation, Point,
    PositionedVertex, RoutedEdge, VertexDescriptor,
};
pub use pipeline::layout;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
