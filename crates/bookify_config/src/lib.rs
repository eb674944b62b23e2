use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
pub mod models;
use dotenv;
pub use models::*;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "BKF".to_string());

    let root = config_root();
    let default_path = root.join("config/default");
    let env_path = root.join(format!("config/{}", run_env));

    eprintln!("load_config: config_root: {}", root.display());
    eprintln!("load_config: default_path: {}", default_path.display());
    eprintln!("load_config: env_path: {}", env_path.display());

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let config: AppConfig = builder.build()?.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

/// Cross-field checks that serde defaults cannot express.
///
/// Runs as part of [`load_config`] so a misconfigured deployment fails
/// before the server binds instead of on the first calendar request.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.use_gcal {
        let gcal = config.gcal.as_ref().ok_or_else(|| {
            ConfigError::Message("use_gcal is set but the gcal section is missing".into())
        })?;
        if gcal.client_id.is_none() && env::var("GOOGLE_CLIENT_ID").is_err() {
            return Err(ConfigError::Message(
                "use_gcal is set but no Google client id was found (gcal.client_id or GOOGLE_CLIENT_ID)"
                    .into(),
            ));
        }
        if env::var("GOOGLE_CLIENT_SECRET").is_err() {
            return Err(ConfigError::Message(
                "use_gcal is set but GOOGLE_CLIENT_SECRET is not set".into(),
            ));
        }
    }
    Ok(())
}

/// Resolves the directory holding `config/`.
///
/// Walks up from `CARGO_MANIFEST_DIR` (set when run through cargo, including
/// for workspace members under `crates/services/`) and takes the first
/// ancestor carrying a `config/` directory. Deployed binaries fall back to
/// the working directory.
fn config_root() -> PathBuf {
    let start = env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    let found = start
        .ancestors()
        .find(|dir| dir.join("config").is_dir())
        .map(Path::to_path_buf);
    found.unwrap_or(start)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// Loads at most once per process. The file defaults to ".env" and can be
/// overridden with the `DOTENV_OVERRIDE` env var or a leading command line
/// argument that starts with ".env".
///
/// Returns the path that was used for the load attempt.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = std::env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
