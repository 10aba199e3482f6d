//! We can have a little hard-coded config, [as a
//! snack](https://knowyourmeme.com/memes/cats-can-have-a-little-salami).
//! Everything that differs between environments comes from the process
//! environment (or `.env`, via dotenvy in `main`).
use super::url;
use anyhow::{Context, Result};
use std::{env, net::SocketAddr};

/// Items per page on the item list.
pub const ITEM_PAGE_SIZE: usize = 20;

/// Editables that do not name a container are placed here.
pub const DEFAULT_CONTAINER: &str = "content";

#[derive(Clone, Debug)]
pub struct Config {
    /// The application root stored urls are relative to, e.g. `/` or
    /// `/intranet`.
    pub app_path: String,
    pub addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_path: String::from("/"),
            addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let app_path = match env::var("APP_PATH") {
            Ok(path) => url::validate_app_path(&path)?.to_string(),
            Err(_) => defaults.app_path,
        };
        let addr = match env::var("PORT") {
            Ok(port) => {
                let port: u16 = port
                    .parse()
                    .with_context(|| format!("PORT is not a port: {port}"))?;
                SocketAddr::from(([127, 0, 0, 1], port))
            }
            Err(_) => defaults.addr,
        };
        Ok(Self { app_path, addr })
    }
}
