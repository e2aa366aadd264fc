/// Width of the model selection panel when open, pixels. Matches the
/// DOM side navigation used by the web frontend.
pub const PANEL_OPEN_WIDTH: f32 = 250.0;

/// Width of the model selection panel when collapsed, pixels.
pub const PANEL_CLOSED_WIDTH: f32 = 0.0;
