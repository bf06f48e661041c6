//! # icode-api
//!
//! Client for the iCode community site (icodeshequ.youdao.com) plus a few
//! batch tools built on it.
//!
//! ## Modules
//!
//! - `api`: request layouts, parameter enums and response types
//! - `client`: async and blocking clients sharing one session model
//! - `tools`: work download, view inflation, lyric commenting, comment cleanup
//! - `links`: id extraction from share links
//!
//! ## Basic usage
//!
//! ```rust,no_run
//! use icode_api::{ClientConfig, IcodeClient};
//! use icode_api::api::WorkQuery;
//!
//! #[tokio::main]
//! async fn main() -> icode_api::Result<()> {
//!     let client = IcodeClient::connect(ClientConfig::new("your_cookie_here")).await?;
//!     if let Some(me) = client.info() {
//!         println!("Logged in as {}", me.user_id);
//!     }
//!
//!     for work in client.get_works(&WorkQuery::default()).await? {
//!         println!("{} {}", work.id, work.title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Blocking client
//!
//! ```rust,no_run
//! use icode_api::{BlockingIcodeClient, ClientConfig};
//!
//! fn main() -> icode_api::Result<()> {
//!     let client = BlockingIcodeClient::new(ClientConfig::default())?;
//!     let detail = client.get_work_detail("a1f09b5eb34a48dfbdc8dee59d130ec6", false)?;
//!     println!("{} ({:?})", detail.title, detail.code_language);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod links;
pub mod tools;

pub use client::{BlockingIcodeClient, ClientConfig, IcodeClient};
pub use error::{Error, Result};
