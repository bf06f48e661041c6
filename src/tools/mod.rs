//! Batch jobs built on top of the clients.

pub mod cleaner;
pub mod download;
pub mod sing;
pub mod views;

pub use cleaner::{PageSelection, clean_comments};
pub use download::{download_work, package_sb3};
pub use sing::{SongEvent, Singer, sing};
pub use views::{ViewReport, inflate_views};
