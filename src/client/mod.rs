pub mod blocking;
pub mod config;
pub mod http;
pub mod session;

pub use blocking::BlockingIcodeClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use http::IcodeClient;
pub use session::Session;

use log::debug;
use serde::de::DeserializeOwned;

use crate::api::DataResponse;
use crate::error::{Error, Result};

fn decode<T: DeserializeOwned>(url: &str, body: String) -> Result<T> {
    debug!("{url} -> {body}");
    serde_json::from_str(&body).map_err(|source| Error::UnexpectedResponse {
        url: url.to_owned(),
        body,
        source,
    })
}

fn take_data<T>(url: &str, resp: DataResponse<T>) -> Result<T> {
    resp.data.ok_or_else(|| Error::MissingField {
        url: url.to_owned(),
        field: "data",
    })
}
