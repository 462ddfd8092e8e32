pub mod paths;

pub use paths::{
    config_path_from_env, default_config_path, resolve_config_path, CONFIG_ENV_VAR,
    CONFIG_FILE_NAME,
};
