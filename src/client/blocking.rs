use log::debug;
use reqwest::blocking::Client;
use reqwest::blocking::multipart::Form;
use reqwest::header::COOKIE;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ClientConfig, Session, decode, take_data};
use crate::api::endpoints::DEFAULT_CURRENT_WORK_ID;
use crate::api::{
    ApiRequest, Body, Comment, CommentTarget, DataResponse, Endpoints, ListResponse, Message,
    MessageKind, MessageTab, MoreWorksBy, MyWorkQuery, PersonInfo, Reply, ReportCategory,
    SubmitInfo, Toggle, UserInfo, WorkDetail, WorkQuery, WorkSubmission, WorkSummary,
};
use crate::error::{Error, Result};

/// Blocking client: each call runs one request on the caller's thread.
///
/// Do not use it from inside an async runtime; use [`IcodeClient`](super::IcodeClient) there.
pub struct BlockingIcodeClient {
    http: Client,
    endpoints: Endpoints,
    session: Session,
}

impl BlockingIcodeClient {
    /// Builds a client without contacting the server. Call [`login`](Self::login)
    /// before using operations that need an account.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            http,
            endpoints: config.endpoints,
            session: Session::new(config.cookie),
        })
    }

    /// Builds a client and logs in with the configured cookie.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.login(None)?;
        Ok(client)
    }

    /// Hosts this client talks to.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Cookie and cached profile.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether the last login succeeded.
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Profile cached by the last successful login.
    pub fn info(&self) -> Option<&UserInfo> {
        self.session.info()
    }

    /// Fetches the account profile, optionally switching to a new cookie first.
    /// A rejected cookie logs a warning and yields `None`.
    pub fn login(&mut self, new_cookie: Option<&str>) -> Result<Option<UserInfo>> {
        if let Some(cookie) = new_cookie {
            self.session.set_cookie(cookie);
        }
        let req = self.endpoints.user_info()?;
        let resp: DataResponse<UserInfo> = self.fetch_json(req)?;
        Ok(self.session.apply_login(resp))
    }

    fn send(&self, req: ApiRequest) -> Result<reqwest::blocking::Response> {
        self.session.check(&req)?;
        debug!("{} {}", req.method, req.url);

        let builder = self
            .http
            .request(req.method, req.url)
            .header(COOKIE, self.session.cookie());
        let builder = match req.body {
            Body::None => builder,
            Body::Empty => builder.body(Vec::<u8>::new()),
            Body::Text(text) => builder.body(text),
            Body::Bytes(bytes) => builder.body(bytes),
            Body::Json(value) => builder.json(&value),
            Body::Multipart(fields) => {
                let form = fields
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value));
                builder.multipart(form)
            }
        };

        Ok(builder.send()?)
    }

    fn fetch_json<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T> {
        let url = req.url.to_string();
        let body = self.send(req)?.text()?;
        decode(&url, body)
    }

    fn fetch_data<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T> {
        let url = req.url.to_string();
        let resp: DataResponse<T> = self.fetch_json(req)?;
        take_data(&url, resp)
    }

    fn fetch_list<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<Vec<T>> {
        let resp: ListResponse<T> = self.fetch_json(req)?;
        Ok(resp.into_list())
    }

    /// Work detail. `add_browse_num` counts the request as a view.
    pub fn get_work_detail(&self, work_id: &str, add_browse_num: bool) -> Result<WorkDetail> {
        let req = self.endpoints.work_detail(work_id, add_browse_num)?;
        self.fetch_data(req)
    }

    /// One page of top-level comments on a work.
    pub fn get_work_comments(&self, work_id: &str, page: u32, size: u32) -> Result<Vec<Comment>> {
        let req = self.endpoints.work_comments(work_id, page, size)?;
        self.fetch_list(req)
    }

    /// The "more works" strip shown next to a work.
    pub fn get_more_works(&self, by: &MoreWorksBy) -> Result<Vec<WorkSummary>> {
        let req = match by {
            MoreWorksBy::User(user_id) => {
                self.endpoints.more_works(user_id, DEFAULT_CURRENT_WORK_ID)?
            }
            MoreWorksBy::Work(work_id) => {
                let detail = self.get_work_detail(work_id, false)?;
                let user_id = detail.user_id.ok_or_else(|| Error::MissingField {
                    url: self.endpoints.community.clone(),
                    field: "userId",
                })?;
                self.endpoints.more_works(&user_id, work_id)?
            }
        };
        self.fetch_list(req)
    }

    /// One page of the public work index.
    pub fn get_works(&self, query: &WorkQuery) -> Result<Vec<WorkSummary>> {
        let req = self.endpoints.works(query)?;
        self.fetch_list(req)
    }

    /// One page of the logged-in user's own works.
    pub fn get_my_works(&self, query: &MyWorkQuery) -> Result<Vec<WorkSummary>> {
        let req = self.endpoints.my_works(query)?;
        self.fetch_list(req)
    }

    /// Submission record of a work as stored by the lab host.
    pub fn get_work_submit_info(&self, work_id: &str) -> Result<SubmitInfo> {
        let req = self.endpoints.work_submit_info(work_id)?;
        self.fetch_json(req)
    }

    /// A user's public statistics.
    pub fn get_person_info(&self, user_id: &str) -> Result<PersonInfo> {
        let req = self.endpoints.person_info(user_id)?;
        self.fetch_data(req)
    }

    /// One page of the works a user has published.
    pub fn get_person_works(&self, user_id: &str, page: u32, size: u32) -> Result<Vec<WorkSummary>> {
        let req = self.endpoints.person_works(user_id, page, size)?;
        self.fetch_list(req)
    }

    /// One page of the works a user has enshrined.
    pub fn get_person_enshrines(
        &self,
        user_id: &str,
        page: u32,
        size: u32,
    ) -> Result<Vec<WorkSummary>> {
        let req = self.endpoints.person_enshrines(user_id, page, size)?;
        self.fetch_list(req)
    }

    /// One page of replies below a comment.
    pub fn get_replies(&self, comment_id: i64, page: u32, size: u32) -> Result<Vec<Reply>> {
        let req = self.endpoints.replies(comment_id, page, size)?;
        self.fetch_list(req)
    }

    /// One page of the message hub.
    pub fn get_messages(&self, kind: MessageKind, page: u32, size: u32) -> Result<Vec<Message>> {
        let req = self.endpoints.messages(kind, page, size)?;
        self.fetch_list(req)
    }

    /// Raw bytes of a costume or sound, addressed by its `md5ext` file name.
    /// An error status from the asset host is an [`Error::Http`].
    pub fn get_scratch_asset(&self, md5ext: &str) -> Result<Vec<u8>> {
        let req = self.endpoints.scratch_asset(md5ext)?;
        let bytes = self.send(req)?.error_for_status()?.bytes()?;
        Ok(bytes.to_vec())
    }

    /// Posts a top-level comment on a work.
    pub fn comment(&self, work_id: &str, content: &str) -> Result<Value> {
        let req = self.endpoints.comment(work_id, content)?;
        self.fetch_json(req)
    }

    /// Likes a work or takes the like back.
    pub fn like(&self, work_id: &str, toggle: Toggle) -> Result<Value> {
        let req = self.endpoints.like(work_id, toggle)?;
        self.fetch_json(req)
    }

    /// Enshrines a work or removes it from the collection.
    pub fn enshrine(&self, work_id: &str, toggle: Toggle) -> Result<Value> {
        let req = self.endpoints.enshrine(work_id, toggle)?;
        self.fetch_json(req)
    }

    /// Reports a work to the moderators.
    pub fn report(&self, work_id: &str, reason: &str, category: ReportCategory) -> Result<Value> {
        let req = self.endpoints.report(work_id, reason, category)?;
        self.fetch_json(req)
    }

    /// Publishes, saves or resubmits a work.
    pub fn submit_work(&self, work: &WorkSubmission) -> Result<Value> {
        let req = self.endpoints.submit_work(work)?;
        self.fetch_json(req)
    }

    /// Deletes one of your works.
    pub fn delete_work(&self, work_id: &str) -> Result<Value> {
        let req = self.endpoints.delete_work(work_id)?;
        self.fetch_json(req)
    }

    /// Replaces the profile introduction.
    pub fn update_intro(&self, intro: &str) -> Result<Value> {
        let req = self.endpoints.update_intro(intro)?;
        self.fetch_json(req)
    }

    /// Replies to a comment, or to another reply below it when `reply_id` is set.
    pub fn reply(&self, content: &str, comment_id: i64, reply_id: Option<i64>) -> Result<Value> {
        let req = self.endpoints.reply(content, comment_id, reply_id)?;
        self.fetch_json(req)
    }

    /// Deletes a comment or a reply.
    pub fn delete_comment(&self, target: CommentTarget) -> Result<Value> {
        let req = self.endpoints.delete_comment(target)?;
        self.fetch_json(req)
    }

    /// Deletes a message from the hub.
    pub fn delete_message(&self, message_id: i64) -> Result<Value> {
        let req = self.endpoints.delete_message(message_id)?;
        self.fetch_json(req)
    }

    /// Uploads an asset file, stored as `<name>.<suffix>`.
    pub fn upload_file(&self, name: &str, suffix: &str, file: impl Into<Vec<u8>>) -> Result<Value> {
        let req = self.endpoints.upload_file(name, suffix, file.into())?;
        self.fetch_json(req)
    }

    /// Praises a comment or reply, or takes the praise back.
    pub fn praise_comment(&self, target: CommentTarget, toggle: Toggle) -> Result<Value> {
        let req = self.endpoints.praise_comment(target, toggle)?;
        self.fetch_json(req)
    }

    /// Marks one message as read.
    pub fn read_message(&self, message_id: i64) -> Result<Value> {
        let req = self.endpoints.read_message(message_id)?;
        self.fetch_json(req)
    }

    /// Marks every message in a tab as read.
    pub fn read_all_messages(&self, tab: MessageTab) -> Result<Value> {
        let req = self.endpoints.read_all_messages(tab)?;
        self.fetch_json(req)
    }
}
