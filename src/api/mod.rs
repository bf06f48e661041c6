pub mod endpoints;
pub mod params;
pub mod project;
pub mod submission;
pub mod types;

pub use endpoints::{ApiRequest, Body, Endpoints};
pub use params::*;
pub use project::ScratchProject;
pub use submission::WorkSubmission;
pub use types::*;
