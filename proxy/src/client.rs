use reqwest::Url;
use std::time::Duration;
use utility::{Error, Result};

/// TransportConfig connection settings for talking to the provider.
/// Keep-alive is off so idle sockets don't pile up across many functions
/// that are each queried at a low rate.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportConfig {
    pub connect_timeout: Duration,
    pub idle_conn_timeout: Duration,
    pub max_idle_conns: usize,
    pub disable_keep_alives: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            connect_timeout: Duration::from_secs(3),
            idle_conn_timeout: Duration::from_millis(120),
            max_idle_conns: 1,
            disable_keep_alives: true,
        }
    }
}

//makes a HTTP client for the provider, proxy settings are read from the environment
pub fn make_http_client(transport: &TransportConfig) -> Result<reqwest::Client> {
    let max_idle = if transport.disable_keep_alives {
        0
    } else {
        transport.max_idle_conns
    };

    let client = reqwest::ClientBuilder::new()
        .connect_timeout(transport.connect_timeout)
        .pool_idle_timeout(transport.idle_conn_timeout)
        .pool_max_idle_per_host(max_idle)
        .tcp_keepalive(None::<Duration>)
        .build()?;
    Ok(client)
}

/// parses the provider url, the path always ends with '/' so that
/// endpoint paths are appended to it rather than replacing its last segment
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(Error::Custom(format!(
                "unsupported scheme {} for provider url {}",
                scheme, raw
            )))
        }
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    Ok(url)
}

/// builds {base}{path}/{function_name}?{params}, function_name is percent-encoded
/// as a single path segment
pub fn create_function_endpoint(
    base: &Url,
    path: &str,
    function_name: &str,
    params: &[(&str, &str)],
) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| Error::Custom(format!("provider url {} can't be a base", base)))?;
        segments.pop_if_empty();
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        segments.push(function_name);
    }
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, val) in params {
            pairs.append_pair(key, val);
        }
    }
    Ok(url)
}
