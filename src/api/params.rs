use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Ordering of the public work index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortType {
    MostLiked,
    #[default]
    Newest,
}

impl SortType {
    /// `sortType` query value.
    pub fn code(self) -> u8 {
        match self {
            SortType::MostLiked => 1,
            SortType::Newest => 2,
        }
    }
}

impl FromStr for SortType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1" | "liked" | "most-liked" => Ok(SortType::MostLiked),
            "2" | "newest" => Ok(SortType::Newest),
            _ => Err(Error::invalid(format!(
                r#"sortType must be "liked" or "newest", not {s}"#
            ))),
        }
    }
}

/// Work theme filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    All,
    Play,
    Story,
    Art,
    Minecraft,
    Scratch,
    /// Python works.
    Turtle,
}

impl Theme {
    /// `theme` query value.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::All => "all",
            Theme::Play => "play",
            Theme::Story => "story",
            Theme::Art => "art",
            Theme::Minecraft => "minecraft",
            Theme::Scratch => "scratch",
            Theme::Turtle => "turtle",
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "all" => Theme::All,
            "play" => Theme::Play,
            "story" => Theme::Story,
            "art" => Theme::Art,
            "minecraft" => Theme::Minecraft,
            "scratch" => Theme::Scratch,
            "turtle" => Theme::Turtle,
            _ => return Err(Error::invalid(format!("unknown theme '{s}'"))),
        })
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code language filter. Also the `codeLanguage` value of a work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeLanguage {
    #[default]
    All,
    Blockly,
    Scratch,
    Python,
}

impl CodeLanguage {
    /// `codeLanguage` query value.
    pub fn as_str(self) -> &'static str {
        match self {
            CodeLanguage::All => "all",
            CodeLanguage::Blockly => "blockly",
            CodeLanguage::Scratch => "scratch",
            CodeLanguage::Python => "python",
        }
    }
}

impl FromStr for CodeLanguage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "all" => CodeLanguage::All,
            "blockly" => CodeLanguage::Blockly,
            "scratch" => CodeLanguage::Scratch,
            "python" => CodeLanguage::Python,
            _ => return Err(Error::invalid(format!("unknown code language '{s}'"))),
        })
    }
}

impl fmt::Display for CodeLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publishing status filter for the logged-in user's own works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkStatus {
    Unpublished,
    #[default]
    Published,
}

impl WorkStatus {
    /// `status` query value.
    pub fn code(self) -> u8 {
        match self {
            WorkStatus::Unpublished => 1,
            WorkStatus::Published => 2,
        }
    }
}

/// Category of the message hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Reply,
    /// Likes and enshrines.
    Enshrine,
    System,
}

impl MessageKind {
    pub(crate) fn path_segment(self) -> &'static str {
        match self {
            MessageKind::Reply => "commentMessage",
            MessageKind::Enshrine => "enshrinesMessage",
            MessageKind::System => "systemMessage",
        }
    }
}

impl FromStr for MessageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reply" => Ok(MessageKind::Reply),
            "enshrine" => Ok(MessageKind::Enshrine),
            "system" => Ok(MessageKind::System),
            _ => Err(Error::invalid(format!(
                r#"messageType must be "reply" or "enshrine" or "system", not {s}"#
            ))),
        }
    }
}

/// Tab of the message hub cleared by `read_all_messages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageTab {
    #[default]
    Comments,
    Enshrines,
    System,
}

impl MessageTab {
    /// `tab` body value.
    pub fn code(self) -> u8 {
        match self {
            MessageTab::Comments => 1,
            MessageTab::Enshrines => 2,
            MessageTab::System => 3,
        }
    }
}

impl FromStr for MessageTab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1" | "comments" | "reply" => Ok(MessageTab::Comments),
            "2" | "enshrines" | "enshrine" => Ok(MessageTab::Enshrines),
            "3" | "system" => Ok(MessageTab::System),
            _ => Err(Error::invalid(format!("tab must be 1, 2 or 3, not {s}"))),
        }
    }
}

/// Set or revoke a like, enshrine or praise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Toggle {
    #[default]
    Apply,
    Revoke,
}

impl Toggle {
    /// `type` query value: 1 sets, 2 revokes.
    pub fn code(self) -> u8 {
        match self {
            Toggle::Apply => 1,
            Toggle::Revoke => 2,
        }
    }
}

impl TryFrom<u8> for Toggle {
    type Error = Error;

    fn try_from(mode: u8) -> Result<Self> {
        match mode {
            1 => Ok(Toggle::Apply),
            2 => Ok(Toggle::Revoke),
            _ => Err(Error::invalid(format!("The mode must be 1 or 2, not {mode}"))),
        }
    }
}

/// Reason given when reporting a work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCategory {
    Plagiarism,
    Spam,
    PersonalAttack,
    Illegal,
    Explicit,
}

impl ReportCategory {
    /// `category` body value.
    pub fn code(self) -> u8 {
        match self {
            ReportCategory::Plagiarism => 1,
            ReportCategory::Spam => 2,
            ReportCategory::PersonalAttack => 3,
            ReportCategory::Illegal => 4,
            ReportCategory::Explicit => 5,
        }
    }
}

impl TryFrom<u8> for ReportCategory {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        Ok(match code {
            1 => ReportCategory::Plagiarism,
            2 => ReportCategory::Spam,
            3 => ReportCategory::PersonalAttack,
            4 => ReportCategory::Illegal,
            5 => ReportCategory::Explicit,
            _ => {
                return Err(Error::invalid(format!(
                    "report category must be within 1..=5, not {code}"
                )));
            }
        })
    }
}

/// Kind of work accepted by `submit_work`. Blockly works cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkKind {
    #[default]
    Scratch,
    Python,
}

impl FromStr for WorkKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Scratch" | "scratch" => Ok(WorkKind::Scratch),
            "Python" | "python" => Ok(WorkKind::Python),
            _ => Err(Error::invalid(format!(
                r#"The workType must be "Scratch" or "Python", not {s}"#
            ))),
        }
    }
}

/// Whether a submission goes public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishAction {
    #[default]
    Publish,
    Unpublish,
}

impl PublishAction {
    /// `publish` / `publishType` value.
    pub fn code(self) -> u8 {
        match self {
            PublishAction::Publish => 1,
            PublishAction::Unpublish => 2,
        }
    }

    /// The action that flips a work's current `status`.
    pub fn from_status(status: i64) -> Self {
        if status % 2 == 0 {
            PublishAction::Publish
        } else {
            PublishAction::Unpublish
        }
    }
}

/// A top-level comment or a reply below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentTarget {
    Comment(i64),
    Reply(i64),
}

impl CommentTarget {
    /// Builds a target from the two optional ids, preferring the comment id.
    pub fn from_ids(comment_id: Option<i64>, reply_id: Option<i64>) -> Result<Self> {
        match (comment_id, reply_id) {
            (Some(id), _) => Ok(CommentTarget::Comment(id)),
            (None, Some(id)) => Ok(CommentTarget::Reply(id)),
            (None, None) => Err(Error::invalid("Both commentId and replyId is None")),
        }
    }
}

/// Whose "more works" list to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoreWorksBy {
    User(String),
    /// Resolved to the author of the work.
    Work(String),
}

/// Query for the public work index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkQuery {
    pub page: u32,
    pub size: u32,
    pub sort: SortType,
    pub theme: Theme,
    pub language: CodeLanguage,
    pub keyword: String,
}

impl Default for WorkQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 20,
            sort: SortType::default(),
            theme: Theme::default(),
            language: CodeLanguage::default(),
            keyword: String::new(),
        }
    }
}

/// Query for the logged-in user's own works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MyWorkQuery {
    pub page: u32,
    pub size: u32,
    pub theme: Theme,
    pub language: CodeLanguage,
    pub status: WorkStatus,
    pub keyword: String,
}

impl Default for MyWorkQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 20,
            theme: Theme::default(),
            language: CodeLanguage::default(),
            status: WorkStatus::default(),
            keyword: String::new(),
        }
    }
}
