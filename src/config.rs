use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "clinica";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory (~/.local/share/clinica or platform equivalent)
pub fn app_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_NAME)
}

/// Path of the SQLite database file. Overridable with `CLINICA_DB`.
pub fn database_path() -> PathBuf {
    match std::env::var("CLINICA_DB") {
        Ok(path) => PathBuf::from(path),
        Err(_) => app_data_dir().join("clinica.db"),
    }
}

/// Address the HTTP server binds to. Overridable with `CLINICA_ADDR`.
pub fn bind_addr() -> SocketAddr {
    std::env::var("CLINICA_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8080)))
}

/// Default log filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    format!("info,{APP_NAME}=debug")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_ends_with_app_name() {
        assert!(app_data_dir().ends_with(APP_NAME));
    }

    #[test]
    fn default_bind_addr_is_loopback() {
        let addr = bind_addr();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
