use bevy::prelude::{Color, Vec3};

/// Vertical field of view of the perspective camera, degrees.
pub const CAMERA_FOV_DEGREES: f32 = 70.0;

/// Near clip plane. Very close so small models survive AR-scale framing.
pub const CAMERA_NEAR: f32 = 0.001;

/// Far clip plane, metres.
pub const CAMERA_FAR: f32 = 200.0;

/// Directional key light color, a near-white grey.
pub const DIRECTIONAL_LIGHT_COLOR: Color = Color::srgb(0.87, 0.87, 0.87);

/// Directional key light intensity, lux.
pub const DIRECTIONAL_ILLUMINANCE: f32 = 3_000.0;

/// Ambient fill color, a dark grey.
pub const AMBIENT_LIGHT_COLOR: Color = Color::srgb(0.13, 0.13, 0.13);

/// Ambient fill brightness.
pub const AMBIENT_BRIGHTNESS: f32 = 80.0;

/// Environment map contribution once the environment stage completes.
pub const ENVIRONMENT_INTENSITY: f32 = 900.0;

/// Closest the orbit camera may approach its target, metres.
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;

/// Furthest the orbit camera may retreat from its target, metres.
pub const ORBIT_MAX_DISTANCE: f32 = 10.0;

/// Fraction of angular velocity retained per 60 Hz frame. Matches the
/// inertia feel of a damping factor of 0.05.
pub const ORBIT_DAMPING: f32 = 0.95;

/// Radians of orbit per pixel of mouse drag.
pub const ORBIT_DRAG_SENSITIVITY: f32 = 0.005;

/// Metres of dolly per scroll line.
pub const ORBIT_ZOOM_SENSITIVITY: f32 = 0.25;

/// Point the camera orbits before any model has been loaded.
pub const DEFAULT_ORBIT_TARGET: Vec3 = Vec3::new(0.0, 0.0, -0.2);
