/// glTF model, relative to the asset root.
pub const MODEL_PATH: &str = "plants.gltf";

/// Runtime overrides for the scene, relative to the asset root.
pub const SCENE_CONFIG_PATH: &str = "plants.config.json";

/// Canvas selector used on wasm32.
pub const CANVAS_SELECTOR: &str = "#bevy";
