use std::net::Ipv4Addr;

use crate::feeds::DEFAULT_HERMES_URL;

const SERVER_PORT: &str = "PRICEWATCH_PORT";

const DEFAULT_PORT: u16 = 8080;

pub fn get_default_port() -> u16 {
    DEFAULT_PORT
}

pub fn get_port() -> u16 {
    let port_from_env = std::env::var(SERVER_PORT);
    port_from_env.map_or(DEFAULT_PORT, |res| res.parse().unwrap_or(DEFAULT_PORT))
}

const SERVER_ADDR: &str = "PRICEWATCH_ADDR";

const DEFAULT_ADDR: Ipv4Addr = Ipv4Addr::new(0, 0, 0, 0);

pub fn get_addr() -> Ipv4Addr {
    let addr_from_env = std::env::var(SERVER_ADDR);
    addr_from_env.map_or(DEFAULT_ADDR, |res| res.parse().unwrap_or(DEFAULT_ADDR))
}

const HERMES_URL: &str = "HERMES_URL";

pub fn get_hermes_url() -> String {
    std::env::var(HERMES_URL).unwrap_or_else(|_| DEFAULT_HERMES_URL.to_string())
}
