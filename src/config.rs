use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    // MongoDB connection string; the database name is taken from its path
    pub db_connection_string: String,

    // Frontend origin allowed by CORS
    #[serde(default = "default_client_url")]
    pub client_url: String,

    // Root of the pre-built frontend bundle
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    // How long a graceful drain may run before remaining connections are dropped
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Config>()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            db_connection_string: String::new(), // Must be provided via environment
            client_url: default_client_url(),
            static_dir: default_static_dir(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_client_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_static_dir() -> String {
    "client/dist".to_string()
}

fn default_shutdown_timeout_secs() -> u64 {
    10
}
