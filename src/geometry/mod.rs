//! Planar geometry: sample sets, orientation predicates and closed-path
//! utilities.

pub mod clip;
pub mod polygon;
pub mod predicates;
pub mod samples;

pub use clip::{ClippedTopology, clip_half_plane};
pub use polygon::{
    check_and_fix_self_intersection, check_self_intersection, fill, fill_region, inside, link,
    polygon_area, region_area,
};
pub use samples::{Axis, PlanarSamples};
