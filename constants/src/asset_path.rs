/// Directory holding environment textures, relative to the asset root.
pub const TEXTURES_PATH: &'static str = "textures";

/// Prefiltered diffuse irradiance cubemap, generated offline from the
/// photo_studio_01_1k HDR. `EnvironmentMapLight` binds cubemap views,
/// so the equirectangular source is never loaded at runtime.
pub const ENVIRONMENT_DIFFUSE: &'static str = "photo_studio_01_1k_diffuse.ktx2";

/// Prefiltered specular radiance cubemap from the same HDR, one mip
/// chain per roughness level.
pub const ENVIRONMENT_SPECULAR: &'static str = "photo_studio_01_1k_specular.ktx2";

/// Directory holding binary glTF models, relative to the asset root.
pub const MODELS_PATH: &'static str = "models";

/// Model file extension. Model ids in the catalog and the frontend's
/// selector buttons are base file names without this extension.
pub const MODEL_EXTENSION: &'static str = "glb";

/// Catalog manifest enumerating the selectable models.
pub const CATALOG_PATH: &'static str = "models/catalog.json";

/// Asset path of the diffuse environment cubemap.
pub fn environment_diffuse_path() -> String {
    format!("{}/{}", TEXTURES_PATH, ENVIRONMENT_DIFFUSE)
}

/// Asset path of the specular environment cubemap.
pub fn environment_specular_path() -> String {
    format!("{}/{}", TEXTURES_PATH, ENVIRONMENT_SPECULAR)
}

/// Asset path of a model's binary glTF file.
pub fn model_path(model_id: &str) -> String {
    format!("{}/{}.{}", MODELS_PATH, model_id, MODEL_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_path_appends_directory_and_extension() {
        assert_eq!(model_path("chair"), "models/chair.glb");
    }

    #[test]
    fn environment_paths_point_at_prefiltered_cubemaps() {
        assert_eq!(
            environment_diffuse_path(),
            "textures/photo_studio_01_1k_diffuse.ktx2"
        );
        assert_eq!(
            environment_specular_path(),
            "textures/photo_studio_01_1k_specular.ktx2"
        );
        assert!(environment_diffuse_path().ends_with(".ktx2"));
        assert!(environment_specular_path().ends_with(".ktx2"));
    }
}
