use std::{env, net::{SocketAddr, ToSocketAddrs as _}};

use sea_orm::ConnectOptions;
use tracing::info;

use crate::consts;

pub struct Config {
    pub host_address: SocketAddr,

    pub database_opt: ConnectOptions,

    pub jwt_key: String,

    pub setoran: SetoranSettings,
}

/// Knobs consumed by the setoran pipeline, attached as app data.
#[derive(Debug, Clone)]
pub struct SetoranSettings {
    pub price_per_liter: f64,
    /// When set, a failed derived posting fails the whole request instead of
    /// being downgraded to a warning.
    pub strict_posting: bool,
}

pub fn load() -> Config {
    Config {
        host_address: load_host_address(),
        database_opt: load_database_opt().into(),
        jwt_key: load_jwt_key(),
        setoran: SetoranSettings {
            price_per_liter: load_price_per_liter(),
            strict_posting: load_strict_posting(),
        },
    }
}

fn load_host_address() -> SocketAddr {
    info!("Loading environment `HOST_ADDRESS`");

    let var = env::var("HOST_ADDRESS").unwrap_or_else(|_| "127.0.0.1:0".to_string());

    var.to_socket_addrs()
        .expect("`HOST_ADDRESS` is not in a valid format").nth(0)
        .expect("unable to resolve host from `HOST_ADDRESS`")
}

fn load_database_opt() -> impl Into<ConnectOptions> {
    info!("Loading environment `DATABASE_URL`");

    let var = env::var("DATABASE_URL").expect("Environment `DATABASE_URL` is required to be set");

    var
}

fn load_jwt_key() -> String {
    info!("Loading environment `JWT_SECRET`");

    let var = env::var("JWT_SECRET").expect("Environment `JWT_SECRET` is required to be set");

    var
}

fn load_price_per_liter() -> f64 {
    info!("Loading environment `PRICE_PER_LITER`");

    let Ok(var) = env::var("PRICE_PER_LITER") else {
        return consts::DEFAULT_PRICE_PER_LITER;
    };

    var.parse().expect("`PRICE_PER_LITER` is not a valid number")
}

fn load_strict_posting() -> bool {
    info!("Loading environment `SETORAN_STRICT_POSTING`");

    env::var("SETORAN_STRICT_POSTING")
        .map(|var| matches!(var.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
