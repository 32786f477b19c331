//! Orientation handling.
//!
//! The pipeline always lays out in the south frame (ranks grow downward). For East/West the
//! builder swaps node extents up front; this module undoes that and maps the finished geometry
//! into the requested orientation, mirroring the adjust/undo split so no stage ever branches on
//! orientation internally.

use crate::model::{LayoutResult, Orientation};

/// Map a finished south-frame result into the configured orientation.
pub fn undo(result: &mut LayoutResult, orientation: Orientation) {
    match orientation {
        Orientation::South => {}
        Orientation::North => flip_y(result),
        Orientation::East => swap_xy(result),
        Orientation::West => {
            flip_y(result);
            swap_xy(result);
        }
    }
}

fn flip_y(result: &mut LayoutResult) {
    let total = result.height;
    for v in &mut result.vertices {
        v.y = total - v.y - v.height;
    }
    for e in &mut result.edges {
        for p in &mut e.waypoints {
            p.y = total - p.y;
        }
    }
}

fn swap_xy(result: &mut LayoutResult) {
    for v in &mut result.vertices {
        (v.x, v.y) = (v.y, v.x);
        (v.width, v.height) = (v.height, v.width);
    }
    for e in &mut result.edges {
        for p in &mut e.waypoints {
            (p.x, p.y) = (p.y, p.x);
        }
    }
    (result.width, result.height) = (result.height, result.width);
}
