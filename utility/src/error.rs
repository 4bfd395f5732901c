use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Custom(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    ///transport level failure (dns, connect, timeout, read)
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("{0}")]
    Parse(#[from] url::ParseError),
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unable to marshal request: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("unable to unmarshal: {body:?}, {source}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("server returned non-200 status code ({status}) for function, {function}, body: {body}")]
    UnexpectedStatus {
        status: u16,
        function: String,
        body: String,
    },
    #[error("error scaling HTTP code {status}, {url}")]
    ScaleStatus { status: u16, url: String },
    #[error("bad scaling factor: {0}, is not in range of [1 - 100]")]
    BadScalingFactor(u64),
    #[error("deadline exceeded waiting for function {function}")]
    DeadlineExceeded { function: String },
}

pub type Result<T> = std::result::Result<T, crate::Error>;
