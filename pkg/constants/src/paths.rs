//! Filesystem path and listen-address constants.

/// Default config file path for the server.
pub const DEFAULT_SERVER_CONFIG: &str = "/etc/okra/config.yaml";

/// Default data directory for the server state store.
pub const DEFAULT_SERVER_DATA_DIR: &str = "/tmp/okra-data";

/// Default API listen port.
pub const DEFAULT_API_PORT: u16 = 6550;
