use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope of endpoints that answer with a single `data` object.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub code: Option<i64>,
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> DataResponse<T> {
    /// A missing or zero `code` means success.
    pub fn is_success(&self) -> bool {
        self.code.unwrap_or(0) == 0
    }
}

/// Envelope of paged endpoints, which answer with a `dataList` array.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub code: Option<i64>,
    #[serde(rename = "dataList")]
    pub data_list: Option<Vec<T>>,
}

impl<T> ListResponse<T> {
    pub fn into_list(self) -> Vec<T> {
        self.data_list.unwrap_or_default()
    }
}

/// Profile of the logged-in account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    pub encryption_user_id: Option<String>,
    pub user_id: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub permissions: Option<Vec<Value>>,
    pub mobile: Option<String>,
    pub has_course: Option<bool>,
    pub user_identity: Option<Value>,
    pub course_type: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkDetail {
    pub id: String,
    pub title: String,
    pub img_url: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub work_type: Option<i64>,
    pub user_id: Option<String>,
    pub status: Option<i64>,
    pub like_num: Option<i64>,
    pub browse_num: Option<i64>,
    pub enshrine_num: Option<i64>,
    /// Project JSON for scratch works, source text for python works.
    pub code: Option<String>,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
    pub have_liked: Option<bool>,
    pub have_enshrined: Option<bool>,
    pub create_time_str: Option<String>,
    pub update_time_str: Option<String>,
    pub code_language: Option<String>,
    pub short_link: Option<String>,
    pub theme: Option<String>,
    pub sub_theme: Option<String>,
    pub iframe_url: Option<String>,
    pub scratch_file: Option<String>,
    pub code_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of any work list: the index, "more works", a user's works or enshrines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkSummary {
    pub id: String,
    pub title: String,
    pub img_url: Option<String>,
    pub user_id: Option<String>,
    pub status: Option<i64>,
    pub like_num: Option<i64>,
    pub browse_num: Option<i64>,
    pub enshrine_num: Option<i64>,
    pub fork_num: Option<i64>,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
    pub code_language: Option<String>,
    pub theme: Option<String>,
    pub sub_theme: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub is_author: Option<bool>,
    pub praise_num: Option<i64>,
    pub reply_num: Option<i64>,
    /// Milliseconds since the epoch.
    pub time: Option<i64>,
    pub has_praised: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Comment {
    pub fn posted_at(&self) -> Option<DateTime<Local>> {
        millis_to_local(self.time?)
    }
}

/// Reply to a comment or to another reply. In the latter case the
/// `reply_*` fields name the user being answered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reply {
    pub id: i64,
    pub content: String,
    #[serde(rename = "type")]
    pub reply_type: Option<i64>,
    /// A number or a string depending on the reply kind.
    pub comment_id: Option<Value>,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub is_author: Option<bool>,
    pub reply_user_id: Option<String>,
    pub reply_name: Option<String>,
    pub reply_image: Option<String>,
    pub time: Option<i64>,
    pub praise_num: Option<i64>,
    pub has_praised: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Reply {
    pub fn posted_at(&self) -> Option<DateTime<Local>> {
        millis_to_local(self.time?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub id: i64,
    #[serde(rename = "type")]
    pub message_type: Option<i64>,
    pub action_user_id: Option<String>,
    pub action_user_image: Option<String>,
    pub action_user_name: Option<String>,
    pub create_time: Option<Value>,
    pub create_time_str: Option<String>,
    pub have_read: Option<bool>,
    pub works_id: Option<String>,
    pub works_title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Public statistics of a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonInfo {
    pub works_num: Option<i64>,
    pub view_num: Option<i64>,
    pub praise_num: Option<i64>,
    pub enshrines_num: Option<i64>,
    pub fork_num: Option<i64>,
    pub user_id: Option<String>,
    pub img: Option<String>,
    pub nick_name: Option<String>,
    pub intro: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Submission record kept by the lab host. Keys are lowercase on this host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitInfo {
    pub workid: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "codeType")]
    pub code_type: Option<String>,
    /// Only present for python works.
    pub code: Option<String>,
    pub commit: Option<String>,
    pub createtime: Option<Value>,
    pub fork: Option<i64>,
    pub forkcommit: Option<String>,
    pub forkfrom: Option<String>,
    pub likes: Option<i64>,
    pub owner: Option<String>,
    pub publish: Option<i64>,
    pub theme: Option<String>,
    pub subtheme: Option<String>,
    pub thumbnail: Option<String>,
    pub username: Option<String>,
    pub visits: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn millis_to_local(ms: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(ms).single()
}
