pub mod settings;

pub use settings::{
    GameSettings, HotbarSettings, PlayerSettings, SettingsError, WorldSettings,
    default_settings_path, load_or_default, load_settings, save_settings,
};
