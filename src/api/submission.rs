use crate::api::params::{PublishAction, WorkKind};
use crate::api::types::{SubmitInfo, WorkDetail};
use crate::error::{Error, Result};

pub const DEFAULT_TITLE: &str = "Scratch Project";
pub const DEFAULT_DESCRIPTION: &str = "Project Description";
pub const DEFAULT_THUMBNAIL: &str = "http://ydschool-online.nosdn.127.net/svg/0c3a986d5266bd5a186014aebd219e05c9696de777dea2b5dfe658dc661e572c.png";

/// A scratch or python work to publish, save or resubmit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSubmission {
    pub kind: WorkKind,
    pub code: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub publish: PublishAction,
    pub allow_fork: bool,
    /// Python only: store the work without publishing it.
    pub save_only: bool,
    /// Set when resubmitting an existing work.
    pub work_id: Option<String>,
}

impl Default for WorkSubmission {
    fn default() -> Self {
        Self {
            kind: WorkKind::Scratch,
            code: String::new(),
            title: DEFAULT_TITLE.to_owned(),
            description: DEFAULT_DESCRIPTION.to_owned(),
            thumbnail: DEFAULT_THUMBNAIL.to_owned(),
            publish: PublishAction::Publish,
            allow_fork: false,
            save_only: false,
            work_id: None,
        }
    }
}

impl WorkSubmission {
    pub fn new(kind: WorkKind, code: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn scratch(project_json: impl Into<String>) -> Self {
        Self::new(WorkKind::Scratch, project_json)
    }

    pub fn python(source: impl Into<String>) -> Self {
        Self::new(WorkKind::Python, source)
    }

    /// Rebuilds a submission from a fetched work, e.g. to copy or republish it.
    pub fn from_existing(detail: &WorkDetail, info: &SubmitInfo) -> Result<Self> {
        let kind = match detail.code_language.as_deref() {
            Some("scratch") => WorkKind::Scratch,
            Some("python") => WorkKind::Python,
            _ => return Err(Error::invalid("Invalid workDetail.")),
        };
        let code = detail
            .code
            .clone()
            .ok_or_else(|| Error::invalid("Invalid workDetail."))?;
        Ok(Self {
            kind,
            code,
            title: detail.title.clone(),
            description: detail.description.clone().unwrap_or_default(),
            thumbnail: detail
                .img_url
                .clone()
                .unwrap_or_else(|| DEFAULT_THUMBNAIL.to_owned()),
            publish: detail
                .status
                .map(PublishAction::from_status)
                .unwrap_or_default(),
            allow_fork: info.fork.unwrap_or(0) != 0,
            save_only: false,
            work_id: None,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    pub fn with_publish(mut self, publish: PublishAction) -> Self {
        self.publish = publish;
        self
    }

    pub fn allow_fork(mut self, allow: bool) -> Self {
        self.allow_fork = allow;
        self
    }

    pub fn save_only(mut self, save: bool) -> Self {
        self.save_only = save;
        self
    }

    pub fn resubmit(mut self, work_id: impl Into<String>) -> Self {
        self.work_id = Some(work_id.into());
        self
    }
}
