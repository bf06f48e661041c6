//! Request descriptions for every endpoint.
//!
//! Nothing here touches the network. Both clients turn an [`ApiRequest`] into a
//! real request, so URL, query and body layout live in one place.

use reqwest::Method;
use serde_json::{Value, json};
use url::Url;

use crate::api::params::{
    CommentTarget, MessageKind, MessageTab, MyWorkQuery, ReportCategory, Toggle, WorkKind,
    WorkQuery,
};
use crate::api::submission::WorkSubmission;
use crate::error::{Error, Result};

pub const COMMUNITY_HOST: &str = "https://icodeshequ.youdao.com";
pub const ACCOUNT_HOST: &str = "https://icodecontest-online-api.youdao.com";
pub const LAB_HOST: &str = "https://icode.youdao.com";
pub const ASSETS_HOST: &str = "https://ydschool-online.nosdn.127.net";
pub const UPLOAD_HOST: &str = "https://tiku-outside.youdao.com";

/// `currentWorksId` sent when the "more works" list is fetched by user id only.
pub const DEFAULT_CURRENT_WORK_ID: &str = "21a8bbf470ef4203abd549c641aac7a6";

/// Hosts the API is spread over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub community: String,
    pub account: String,
    pub lab: String,
    pub assets: String,
    pub upload: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            community: COMMUNITY_HOST.to_owned(),
            account: ACCOUNT_HOST.to_owned(),
            lab: LAB_HOST.to_owned(),
            assets: ASSETS_HOST.to_owned(),
            upload: UPLOAD_HOST.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    None,
    /// Zero-length body for POSTs that carry everything in the query.
    Empty,
    Text(String),
    Bytes(Vec<u8>),
    Json(Value),
    /// Text-only multipart form.
    Multipart(Vec<(&'static str, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub body: Body,
    pub needs_login: bool,
}

impl ApiRequest {
    fn new(method: Method, url: Url, body: Body) -> Self {
        Self {
            method,
            url,
            body,
            needs_login: false,
        }
    }

    fn get(url: Url) -> Self {
        Self::new(Method::GET, url, Body::None)
    }

    fn post(url: Url, body: Body) -> Self {
        Self::new(Method::POST, url, body)
    }

    fn authed(mut self) -> Self {
        self.needs_login = true;
        self
    }
}

fn build_url(host: &str, path: &str, query: &[(&str, String)]) -> Result<Url> {
    let raw = format!("{}{}", host.trim_end_matches('/'), path);
    let mut url = Url::parse(&raw).map_err(|source| Error::InvalidUrl {
        url: raw.clone(),
        source,
    })?;
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(url)
}

fn paging(page: u32, size: u32) -> [(&'static str, String); 2] {
    [("page", page.to_string()), ("size", size.to_string())]
}

impl Endpoints {
    /// Every host pointed at one base URL. Handy for mirrors and mock servers.
    pub fn with_base(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            community: base.clone(),
            account: base.clone(),
            lab: base.clone(),
            assets: base.clone(),
            upload: base,
        }
    }

    fn community(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        build_url(&self.community, path, query)
    }

    pub fn user_info(&self) -> Result<ApiRequest> {
        let url = build_url(&self.account, "/api/user/info", &[])?;
        Ok(ApiRequest::get(url))
    }

    pub fn work_detail(&self, work_id: &str, add_browse_num: bool) -> Result<ApiRequest> {
        let url = self.community(
            "/api/works/detail",
            &[
                ("id", work_id.to_owned()),
                ("addBrowseNum", add_browse_num.to_string()),
            ],
        )?;
        Ok(ApiRequest::get(url))
    }

    pub fn work_comments(&self, work_id: &str, page: u32, size: u32) -> Result<ApiRequest> {
        let [p, s] = paging(page, size);
        let url = self.community("/api/works/comment/list", &[("id", work_id.to_owned()), p, s])?;
        Ok(ApiRequest::get(url))
    }

    pub fn more_works(&self, user_id: &str, current_work_id: &str) -> Result<ApiRequest> {
        let url = self.community(
            "/api/user/more_works/list",
            &[
                ("userId", user_id.to_owned()),
                ("currentWorksId", current_work_id.to_owned()),
            ],
        )?;
        Ok(ApiRequest::get(url))
    }

    pub fn works(&self, query: &WorkQuery) -> Result<ApiRequest> {
        let [p, s] = paging(query.page, query.size);
        let url = self.community(
            "/api/index/works/list",
            &[
                p,
                s,
                ("sortType", query.sort.code().to_string()),
                ("theme", query.theme.to_string()),
                ("codeLanguage", query.language.to_string()),
                ("keyword", query.keyword.clone()),
            ],
        )?;
        Ok(ApiRequest::get(url))
    }

    pub fn my_works(&self, query: &MyWorkQuery) -> Result<ApiRequest> {
        let [p, s] = paging(query.page, query.size);
        let url = self.community(
            "/api/user/works/list",
            &[
                p,
                s,
                ("status", query.status.code().to_string()),
                ("theme", query.theme.to_string()),
                ("codeLanguage", query.language.to_string()),
                ("keyword", query.keyword.clone()),
            ],
        )?;
        Ok(ApiRequest::get(url).authed())
    }

    pub fn work_submit_info(&self, work_id: &str) -> Result<ApiRequest> {
        let url = build_url(&self.lab, "/api/work/get", &[("id", work_id.to_owned())])?;
        Ok(ApiRequest::get(url))
    }

    pub fn person_info(&self, user_id: &str) -> Result<ApiRequest> {
        let url = self.community(
            "/api/user/index/hisStatics",
            &[("userId", user_id.to_owned())],
        )?;
        Ok(ApiRequest::get(url))
    }

    pub fn person_works(&self, user_id: &str, page: u32, size: u32) -> Result<ApiRequest> {
        let [p, s] = paging(page, size);
        let url = self.community(
            "/api/user/works/hisWorksList",
            &[p, s, ("userId", user_id.to_owned())],
        )?;
        Ok(ApiRequest::get(url))
    }

    pub fn person_enshrines(&self, user_id: &str, page: u32, size: u32) -> Result<ApiRequest> {
        let [p, s] = paging(page, size);
        let url = self.community(
            "/api/user/works/hisEnshrines",
            &[p, s, ("userId", user_id.to_owned())],
        )?;
        Ok(ApiRequest::get(url))
    }

    pub fn replies(&self, comment_id: i64, page: u32, size: u32) -> Result<ApiRequest> {
        let [p, s] = paging(page, size);
        let url = self.community(
            "/api/works/reply/list",
            &[("commentId", comment_id.to_string()), p, s],
        )?;
        Ok(ApiRequest::get(url))
    }

    pub fn messages(&self, kind: MessageKind, page: u32, size: u32) -> Result<ApiRequest> {
        let path = format!("/api/user/message/{}", kind.path_segment());
        let url = self.community(&path, &paging(page, size))?;
        Ok(ApiRequest::get(url).authed())
    }

    pub fn scratch_asset(&self, md5ext: &str) -> Result<ApiRequest> {
        let url = build_url(&self.assets, &format!("/svg/{md5ext}"), &[])?;
        Ok(ApiRequest::get(url))
    }

    pub fn comment(&self, work_id: &str, content: &str) -> Result<ApiRequest> {
        let url = self.community("/api/works/comment", &[])?;
        let body = json!({ "id": work_id, "content": content });
        Ok(ApiRequest::post(url, Body::Json(body)).authed())
    }

    pub fn like(&self, work_id: &str, toggle: Toggle) -> Result<ApiRequest> {
        let url = self.community(
            "/api/works/like",
            &[
                ("id", work_id.to_owned()),
                ("type", toggle.code().to_string()),
            ],
        )?;
        Ok(ApiRequest::post(url, Body::Empty).authed())
    }

    pub fn enshrine(&self, work_id: &str, toggle: Toggle) -> Result<ApiRequest> {
        let action = match toggle {
            Toggle::Apply => "enshrine",
            Toggle::Revoke => "cancelEnshrine",
        };
        let url = self.community(
            &format!("/api/user/works/{action}"),
            &[("worksId", work_id.to_owned())],
        )?;
        Ok(ApiRequest::post(url, Body::Empty).authed())
    }

    pub fn report(
        &self,
        work_id: &str,
        reason: &str,
        category: ReportCategory,
    ) -> Result<ApiRequest> {
        let url = self.community("/api/works/report", &[])?;
        let body = json!({
            "worksIdStr": work_id,
            "category": category.code(),
            "description": reason,
        });
        Ok(ApiRequest::post(url, Body::Json(body)).authed())
    }

    pub fn submit_work(&self, work: &WorkSubmission) -> Result<ApiRequest> {
        let req = match work.kind {
            WorkKind::Scratch => {
                let url = build_url(&self.lab, "/api/work/submit", &[])?;
                let mut fields = vec![
                    ("category", "lab".to_owned()),
                    ("code", work.code.clone()),
                    ("codeType", "json".to_owned()),
                    ("theme", "scratch".to_owned()),
                    ("subtheme", "scratch".to_owned()),
                    ("description", work.description.clone()),
                    ("fork", u8::from(work.allow_fork).to_string()),
                    ("publish", work.publish.code().to_string()),
                    ("thumbnail", work.thumbnail.clone()),
                    ("title", work.title.clone()),
                ];
                if let Some(id) = &work.work_id {
                    fields.push(("workid", id.clone()));
                }
                ApiRequest::post(url, Body::Multipart(fields))
            }
            WorkKind::Python if work.save_only => {
                let url = self.community("/api/works/save", &[])?;
                let mut body = json!({
                    "code": work.code,
                    "description": work.description,
                    "title": work.title,
                });
                if let Some(id) = &work.work_id {
                    body["id"] = json!(id);
                }
                ApiRequest::post(url, Body::Json(body))
            }
            WorkKind::Python => {
                let url = self.community(
                    "/api/works/publish",
                    &[("publishType", work.publish.code().to_string())],
                )?;
                let mut body = json!({
                    "code": work.code,
                    "description": work.description,
                    "title": work.title,
                    "imgUrl": work.thumbnail,
                });
                if let Some(id) = &work.work_id {
                    body["id"] = json!(id);
                }
                ApiRequest::post(url, Body::Json(body))
            }
        };
        Ok(req.authed())
    }

    pub fn delete_work(&self, work_id: &str) -> Result<ApiRequest> {
        let url = self.community("/api/works/delete", &[("id", work_id.to_owned())])?;
        Ok(ApiRequest::new(Method::DELETE, url, Body::None).authed())
    }

    pub fn update_intro(&self, intro: &str) -> Result<ApiRequest> {
        let url = self.community("/api/user/updateIntro", &[])?;
        Ok(ApiRequest::post(url, Body::Text(intro.to_owned())).authed())
    }

    pub fn reply(&self, content: &str, comment_id: i64, reply_id: Option<i64>) -> Result<ApiRequest> {
        let url = self.community("/api/works/reply", &[])?;
        let body = json!({
            "commentId": comment_id,
            "content": content,
            "replyId": reply_id,
        });
        Ok(ApiRequest::post(url, Body::Json(body)).authed())
    }

    pub fn delete_comment(&self, target: CommentTarget) -> Result<ApiRequest> {
        let url = match target {
            CommentTarget::Comment(id) => self.community(
                "/api/works/comment/delete",
                &[("commentId", id.to_string())],
            )?,
            CommentTarget::Reply(id) => {
                self.community("/api/works/reply/delete", &[("replyId", id.to_string())])?
            }
        };
        Ok(ApiRequest::post(url, Body::Empty).authed())
    }

    pub fn delete_message(&self, message_id: i64) -> Result<ApiRequest> {
        let url = self.community("/api/user/message/deleteComment", &[])?;
        let body = json!({ "id": message_id });
        Ok(ApiRequest::post(url, Body::Json(body)).authed())
    }

    pub fn upload_file(&self, name: &str, suffix: &str, file: Vec<u8>) -> Result<ApiRequest> {
        let url = build_url(
            &self.upload,
            &format!("/nos/scratch/asset/{name}.{suffix}/"),
            &[],
        )?;
        Ok(ApiRequest::post(url, Body::Bytes(file)).authed())
    }

    pub fn praise_comment(&self, target: CommentTarget, toggle: Toggle) -> Result<ApiRequest> {
        let action = match toggle {
            Toggle::Apply => "praise",
            Toggle::Revoke => "cancelPraise",
        };
        let url = match target {
            CommentTarget::Comment(id) => self.community(
                &format!("/api/works/comment/{action}"),
                &[("commentId", id.to_string())],
            )?,
            CommentTarget::Reply(id) => self.community(
                &format!("/api/works/reply/{action}"),
                &[("replyId", id.to_string())],
            )?,
        };
        Ok(ApiRequest::post(url, Body::Empty).authed())
    }

    pub fn read_message(&self, message_id: i64) -> Result<ApiRequest> {
        let url = self.community("/api/user/message/read", &[("id", message_id.to_string())])?;
        Ok(ApiRequest::new(Method::PUT, url, Body::None).authed())
    }

    pub fn read_all_messages(&self, tab: MessageTab) -> Result<ApiRequest> {
        let url = self.community("/api/user/message/readAll", &[])?;
        let body = json!({ "tab": tab.code() });
        Ok(ApiRequest::post(url, Body::Json(body)).authed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::params::{CodeLanguage, PublishAction, SortType, Theme};

    fn endpoints() -> Endpoints {
        Endpoints::default()
    }

    #[test]
    fn work_detail_query() {
        let req = endpoints().work_detail("abc123", false).unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(
            req.url.as_str(),
            "https://icodeshequ.youdao.com/api/works/detail?id=abc123&addBrowseNum=false"
        );
        assert!(!req.needs_login);
    }

    #[test]
    fn login_goes_to_account_host() {
        let req = endpoints().user_info().unwrap();
        assert_eq!(
            req.url.as_str(),
            "https://icodecontest-online-api.youdao.com/api/user/info"
        );
    }

    #[test]
    fn works_query_encodes_keyword() {
        let query = WorkQuery {
            page: 3,
            size: 10,
            sort: SortType::MostLiked,
            theme: Theme::Minecraft,
            language: CodeLanguage::Python,
            keyword: "hello world".into(),
        };
        let req = endpoints().works(&query).unwrap();
        assert_eq!(
            req.url.as_str(),
            "https://icodeshequ.youdao.com/api/index/works/list?page=3&size=10&sortType=1&theme=minecraft&codeLanguage=python&keyword=hello+world"
        );
    }

    #[test]
    fn my_works_needs_login() {
        let req = endpoints().my_works(&MyWorkQuery::default()).unwrap();
        assert!(req.needs_login);
        assert_eq!(
            req.url.query(),
            Some("page=1&size=20&status=2&theme=all&codeLanguage=all&keyword=")
        );
    }

    #[test]
    fn messages_pick_path_by_kind() {
        let req = endpoints().messages(MessageKind::Enshrine, 2, 5).unwrap();
        assert_eq!(req.url.path(), "/api/user/message/enshrinesMessage");
        assert_eq!(req.url.query(), Some("page=2&size=5"));
        assert!(req.needs_login);
    }

    #[test]
    fn enshrine_and_cancel() {
        let e = endpoints();
        let on = e.enshrine("w1", Toggle::Apply).unwrap();
        let off = e.enshrine("w1", Toggle::Revoke).unwrap();
        assert_eq!(on.url.path(), "/api/user/works/enshrine");
        assert_eq!(off.url.path(), "/api/user/works/cancelEnshrine");
        assert_eq!(off.url.query(), Some("worksId=w1"));
        assert_eq!(on.body, Body::Empty);
    }

    #[test]
    fn praise_paths_for_comment_and_reply() {
        let e = endpoints();
        let req = e
            .praise_comment(CommentTarget::Comment(5), Toggle::Apply)
            .unwrap();
        assert_eq!(req.url.path(), "/api/works/comment/praise");
        assert_eq!(req.url.query(), Some("commentId=5"));

        let req = e
            .praise_comment(CommentTarget::Reply(9), Toggle::Revoke)
            .unwrap();
        assert_eq!(req.url.path(), "/api/works/reply/cancelPraise");
        assert_eq!(req.url.query(), Some("replyId=9"));
    }

    #[test]
    fn delete_comment_or_reply() {
        let e = endpoints();
        let req = e.delete_comment(CommentTarget::Reply(12)).unwrap();
        assert_eq!(
            req.url.as_str(),
            "https://icodeshequ.youdao.com/api/works/reply/delete?replyId=12"
        );
        assert_eq!(req.method, Method::POST);
    }

    #[test]
    fn reply_body_keeps_null_reply_id() {
        let req = endpoints().reply("thanks", 77, None).unwrap();
        assert_eq!(
            req.body,
            Body::Json(json!({"commentId": 77, "content": "thanks", "replyId": null}))
        );
    }

    #[test]
    fn report_body() {
        let req = endpoints()
            .report("w1", "copied", ReportCategory::Plagiarism)
            .unwrap();
        assert_eq!(
            req.body,
            Body::Json(json!({"worksIdStr": "w1", "category": 1, "description": "copied"}))
        );
    }

    #[test]
    fn scratch_submission_is_multipart() {
        let work = WorkSubmission::scratch("{\"targets\":[]}")
            .with_title("Demo")
            .allow_fork(true)
            .resubmit("w9");
        let req = endpoints().submit_work(&work).unwrap();
        assert_eq!(req.url.as_str(), "https://icode.youdao.com/api/work/submit");
        let Body::Multipart(fields) = req.body else {
            panic!("expected multipart body");
        };
        let get = |k: &str| {
            fields
                .iter()
                .find(|(name, _)| *name == k)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("category"), Some("lab"));
        assert_eq!(get("codeType"), Some("json"));
        assert_eq!(get("fork"), Some("1"));
        assert_eq!(get("publish"), Some("1"));
        assert_eq!(get("title"), Some("Demo"));
        assert_eq!(get("workid"), Some("w9"));
        assert!(req.needs_login);
    }

    #[test]
    fn python_submission_paths() {
        let e = endpoints();
        let save = e
            .submit_work(&WorkSubmission::python("print(1)").save_only(true))
            .unwrap();
        assert_eq!(save.url.path(), "/api/works/save");
        assert_eq!(
            save.body,
            Body::Json(json!({
                "code": "print(1)",
                "description": "Project Description",
                "title": "Scratch Project",
            }))
        );

        let publish = e
            .submit_work(
                &WorkSubmission::python("print(1)")
                    .with_publish(PublishAction::Unpublish)
                    .resubmit("w2"),
            )
            .unwrap();
        assert_eq!(publish.url.path(), "/api/works/publish");
        assert_eq!(publish.url.query(), Some("publishType=2"));
        let Body::Json(body) = publish.body else {
            panic!("expected json body");
        };
        assert_eq!(body["id"], json!("w2"));
        assert!(body.get("imgUrl").is_some());
    }

    #[test]
    fn upload_and_asset_hosts() {
        let e = endpoints();
        let req = e.upload_file("abc", "png", vec![1, 2, 3]).unwrap();
        assert_eq!(
            req.url.as_str(),
            "https://tiku-outside.youdao.com/nos/scratch/asset/abc.png/"
        );
        assert_eq!(req.body, Body::Bytes(vec![1, 2, 3]));

        let req = e.scratch_asset("d41d8cd9.svg").unwrap();
        assert_eq!(
            req.url.as_str(),
            "https://ydschool-online.nosdn.127.net/svg/d41d8cd9.svg"
        );
    }

    #[test]
    fn read_and_delete_use_put_and_delete() {
        let e = endpoints();
        assert_eq!(e.read_message(4).unwrap().method, Method::PUT);
        assert_eq!(e.delete_work("w").unwrap().method, Method::DELETE);
        assert_eq!(
            e.read_all_messages(MessageTab::System).unwrap().body,
            Body::Json(json!({"tab": 3}))
        );
    }

    #[test]
    fn lab_and_reply_lists() {
        let e = endpoints();
        let req = e.work_submit_info("w3").unwrap();
        assert_eq!(req.url.as_str(), "https://icode.youdao.com/api/work/get?id=w3");

        let req = e.replies(42, 1, 10).unwrap();
        assert_eq!(req.url.path(), "/api/works/reply/list");
        assert_eq!(req.url.query(), Some("commentId=42&page=1&size=10"));
        assert!(!req.needs_login);
    }

    #[test]
    fn intro_is_plain_text() {
        let req = endpoints().update_intro("我爱编程").unwrap();
        assert_eq!(req.body, Body::Text("我爱编程".into()));
        assert!(req.needs_login);
    }

    #[test]
    fn base_override_and_bad_host() {
        let e = Endpoints::with_base("http://127.0.0.1:9000/");
        let req = e.person_info("u1").unwrap();
        assert_eq!(
            req.url.as_str(),
            "http://127.0.0.1:9000/api/user/index/hisStatics?userId=u1"
        );

        let bad = Endpoints::with_base("not a url");
        assert!(matches!(bad.user_info(), Err(Error::InvalidUrl { .. })));
    }
}
