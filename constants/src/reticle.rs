/// Inner radius of the reticle ring, metres.
pub const RETICLE_INNER_RADIUS: f32 = 0.15;

/// Outer radius of the reticle ring, metres.
pub const RETICLE_OUTER_RADIUS: f32 = 0.2;

/// Segment count of the ring mesh.
pub const RETICLE_RESOLUTION: u32 = 32;
