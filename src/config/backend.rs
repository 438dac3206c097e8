use std::time::Duration;

use crate::config::constants::reconnect;

pub struct EndpointConfig {
    pub live_ws_path: &'static str,
    pub history_path: &'static str,
    pub default_server_url: &'static str,
}

pub struct WsConfig {
    pub initial_reconnect_delay: Duration,
    pub max_reconnect_delay: Duration,
}

pub struct HttpConfig {
    pub timeout: Duration,
}

pub struct BackendConfig {
    pub endpoints: EndpointConfig,
    pub ws: WsConfig,
    pub http: HttpConfig,
}

pub const BACKEND: BackendConfig = BackendConfig {
    endpoints: EndpointConfig {
        live_ws_path: "/ws/live",
        history_path: "/api/history",
        default_server_url: "http://localhost:8000",
    },
    ws: WsConfig {
        initial_reconnect_delay: reconnect::INITIAL_DELAY,
        max_reconnect_delay: reconnect::MAX_DELAY,
    },
    http: HttpConfig {
        timeout: Duration::from_secs(10),
    },
};

/// Swap `http(s)://` for `ws(s)://` so the live feed follows the same host as the REST API.
pub fn live_ws_url(server_url: &str) -> String {
    let base = server_url.trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        base.to_string()
    };
    format!("{}{}", ws_base, BACKEND.endpoints.live_ws_path)
}

pub fn history_url(server_url: &str) -> String {
    format!(
        "{}{}",
        server_url.trim_end_matches('/'),
        BACKEND.endpoints.history_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_url_follows_http_scheme() {
        assert_eq!(live_ws_url("http://localhost:8000"), "ws://localhost:8000/ws/live");
        assert_eq!(live_ws_url("https://rps.example.com/"), "wss://rps.example.com/ws/live");
    }

    #[test]
    fn history_url_strips_trailing_slash() {
        assert_eq!(history_url("http://host:1/"), "http://host:1/api/history");
    }
}
