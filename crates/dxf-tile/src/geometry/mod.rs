//! Geometry extraction and measurement
//!
//! This module turns drawing entities into uniform primitives:
//! - Primitive types (polylines, circles, arcs, flattened curves, points)
//! - Curve flattening (circles, arcs, bulges, ellipses, splines)
//! - Entity extraction with layer and linetype filtering
//! - Bounding boxes

mod bounds;
mod extract;
mod flatten;
mod types;

pub use bounds::*;
pub use extract::*;
pub use flatten::*;
pub use types::*;
