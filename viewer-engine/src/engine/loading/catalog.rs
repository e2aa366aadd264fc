use bevy::prelude::*;
use serde::Deserialize;

use constants::asset_path::CATALOG_PATH;

use crate::rpc::web_rpc::WebRpcInterface;

/// One selectable model. `id` is the glTF base file name; `label` is
/// the human-readable name shown on selector buttons.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    pub label: String,
}

/// Catalog manifest as a Bevy asset. Mirrors `models/catalog.json`.
#[derive(Asset, Debug, Clone, Deserialize, TypePath)]
pub struct ModelCatalog {
    pub models: Vec<ModelEntry>,
}

impl ModelCatalog {
    pub fn contains(&self, id: &str) -> bool {
        self.models.iter().any(|entry| entry.id == id)
    }

    /// Catalog entries as the JSON shape shared with the frontend.
    pub fn to_params(&self) -> serde_json::Value {
        serde_json::json!({
            "models": self
                .models
                .iter()
                .map(|entry| serde_json::json!({ "id": entry.id, "label": entry.label }))
                .collect::<Vec<_>>(),
        })
    }
}

#[derive(Resource, Default)]
pub struct CatalogLoader {
    handle: Option<Handle<ModelCatalog>>,
    pub loaded: bool,
}

impl CatalogLoader {
    /// Parsed catalog, once it has arrived.
    pub fn get<'a>(&self, catalogs: &'a Assets<ModelCatalog>) -> Option<&'a ModelCatalog> {
        catalogs.get(self.handle.as_ref()?)
    }
}

/// Kick off the catalog fetch at startup.
pub fn start_catalog_load(mut loader: ResMut<CatalogLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load(CATALOG_PATH));
}

/// Announce the catalog to the frontend once it parses.
pub fn poll_catalog(
    mut loader: ResMut<CatalogLoader>,
    catalogs: Res<Assets<ModelCatalog>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if loader.loaded {
        return;
    }
    let Some(handle) = loader.handle.as_ref() else {
        return;
    };
    if let Some(catalog) = catalogs.get(handle) {
        loader.loaded = true;
        info!("Model catalog loaded: {} models", catalog.models.len());
        rpc_interface.send_notification("catalog", catalog.to_params());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_parses_from_manifest_json() {
        let raw = r#"{
            "models": [
                { "id": "chair", "label": "Chair" },
                { "id": "table", "label": "Table" }
            ]
        }"#;
        let catalog: ModelCatalog = serde_json::from_str(raw).unwrap();
        assert_eq!(catalog.models.len(), 2);
        assert!(catalog.contains("chair"));
        assert!(!catalog.contains("sofa"));
    }
}
