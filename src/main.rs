use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use music_library_server::auth::TokenIssuer;
use music_library_server::config::{AppConfig, CliConfig, FileConfig};
use music_library_server::logging::init_logging;
use music_library_server::server::state::{GuardedLibraryStore, GuardedUserStore};
use music_library_server::server::{ServerConfig, ServerState};
use music_library_server::user::CredentialHasher;
use music_library_server::{
    run_server, MemoryLibraryStore, MemoryUserStore, RequestsLoggingLevel, SqliteLibraryStore,
    SqliteUserStore,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory holding `library.db` and `user.db`. Data is kept in memory when omitted.
    #[clap(long, env = "DB_DIR", value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Argon2 iteration count used when hashing passwords.
    #[clap(long, env = "CRYPT_SALT", default_value_t = 2)]
    pub hash_cost: u32,

    /// Secret used to sign access tokens.
    #[clap(long, env = "JWT_SECRET_KEY", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Secret used to sign refresh tokens.
    #[clap(long, env = "JWT_SECRET_REFRESH_KEY", hide_env_values = true)]
    pub jwt_refresh_secret: Option<String>,

    /// Access token lifetime, e.g. `30m`, `1h`.
    #[clap(long, env = "TOKEN_EXPIRE_TIME", default_value = "1h")]
    pub token_expire_time: String,

    /// Refresh token lifetime.
    #[clap(long, env = "TOKEN_REFRESH_EXPIRE_TIME", default_value = "24h")]
    pub token_refresh_expire_time: String,

    /// Directory for `app.log` and `error.log`.
    #[clap(long, env = "LOG_DIR", default_value = "logs", value_parser = parse_path)]
    pub log_dir: PathBuf,

    /// Size in KB after which a log file is rotated.
    #[clap(long, env = "LOG_MAX_FILE_SIZE", default_value_t = 1024)]
    pub log_max_file_size: u64,

    /// Optional TOML config file. Its values override command line arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_dir: self.db_dir.clone(),
            port: self.port,
            logging_level: self.logging_level.clone(),
            hash_cost: self.hash_cost,
            jwt_secret: self.jwt_secret.clone(),
            jwt_refresh_secret: self.jwt_refresh_secret.clone(),
            token_expire_time: self.token_expire_time.clone(),
            token_refresh_expire_time: self.token_refresh_expire_time.clone(),
            log_dir: self.log_dir.clone(),
            log_max_file_size_kb: self.log_max_file_size,
        }
    }
}

fn open_stores(config: &AppConfig) -> Result<(GuardedLibraryStore, GuardedUserStore)> {
    match (config.library_db_path(), config.user_db_path()) {
        (Some(library_db), Some(user_db)) => {
            info!("Opening SQLite library database at {:?}...", library_db);
            let library_store: GuardedLibraryStore = Arc::new(SqliteLibraryStore::new(&library_db)?);
            info!("Opening SQLite user database at {:?}...", user_db);
            let user_store: GuardedUserStore = Arc::new(SqliteUserStore::new(&user_db)?);
            Ok((library_store, user_store))
        }
        _ => {
            info!("No database directory configured, data will be kept in memory");
            let library_store: GuardedLibraryStore = Arc::new(MemoryLibraryStore::new());
            let user_store: GuardedUserStore = Arc::new(MemoryUserStore::new());
            Ok((library_store, user_store))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let app_config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    init_logging(&app_config.log)?;

    let (library_store, user_store) = open_stores(&app_config)?;

    let state = ServerState::new(
        ServerConfig {
            requests_logging_level: app_config.logging_level.clone(),
            port: app_config.port,
        },
        library_store,
        user_store,
        CredentialHasher::new(app_config.hash_cost),
        TokenIssuer::new(&app_config.auth),
    );

    info!("Starting server on port {}...", app_config.port);
    run_server(state).await
}
