pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("User is not logged in (requested {endpoint})")]
    NeedLogin { endpoint: String },

    #[error("Failed to parse as URL '{url}'")]
    InvalidUrl {
        url: String,

        #[source]
        source: url::ParseError,
    },

    #[error("Response from {url} has no '{field}' field")]
    MissingField { url: String, field: &'static str },

    #[error("Unexpected response from {url}: {body}")]
    UnexpectedResponse {
        url: String,
        body: String,

        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported code language '{0}'")]
    UnsupportedLanguage(String),

    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
