//! Model selection panel for native builds.
//!
//! On the web the sidenav overlay in `web/index.html` renders these
//! controls in the DOM and drives the engine over JSON-RPC. Native
//! builds have no DOM, so this panel reproduces the same surface
//! in-engine: one selector button per catalog entry plus a place
//! button, inside a collapsible side panel.
//!
//! The panel starts collapsed at zero width, matching the web sidenav;
//! the `N` key toggles it.
//!
//! ## Data Flow
//!
//! ```text
//! ModelCatalog (Asset)
//!   └─> populate_model_buttons() spawns one ModelButton per entry
//!
//! ModelButton press  ─> SelectModelEvent ─> loading pipeline
//! PlaceButton press  ─> PlaceModelEvent  ─> placement tool
//! ```

/// Button interactions and the panel toggle shortcut.
pub mod interactions;

/// Panel state resource and marker components.
pub mod state;

/// Panel spawning, catalog button population, and collapse layout.
pub mod ui;

use bevy::prelude::*;

pub use state::ModelPanelState;

#[cfg(not(target_arch = "wasm32"))]
use interactions::{
    collapse_button_interaction, model_button_interaction, place_button_interaction,
    toggle_panel_shortcut,
};
#[cfg(not(target_arch = "wasm32"))]
use ui::{apply_collapse_state, populate_model_buttons, spawn_model_panel};

// Registers the model panel resources and, on native, its systems.
pub struct ModelPanelPlugin;

impl Plugin for ModelPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModelPanelState>();

        // The web frontend owns these controls on WASM builds.
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.add_systems(Startup, spawn_model_panel);
            app.add_systems(
                Update,
                (
                    populate_model_buttons,
                    collapse_button_interaction,
                    model_button_interaction,
                    place_button_interaction,
                    toggle_panel_shortcut,
                    apply_collapse_state,
                ),
            );
        }
    }
}
