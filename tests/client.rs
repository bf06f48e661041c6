mod common;

use common::*;
use icode_api::api::{CommentTarget, MoreWorksBy, Toggle, WorkQuery, WorkSubmission};
use icode_api::{ClientConfig, Error, IcodeClient};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_sends_cookie_and_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/info"))
        .and(header("cookie", COOKIE))
        .and(header("user-agent", USER_AGENT))
        .respond_with(json_response(json!({
            "code": 0,
            "data": { "userId": "u42", "name": "Tester", "vipLevel": 3 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = IcodeClient::connect(config(&server)).await.unwrap();
    assert!(client.is_logged_in());
    let me = client.info().unwrap();
    assert_eq!(me.user_id, "u42");
    assert_eq!(me.name.as_deref(), Some("Tester"));
    assert_eq!(me.extra.get("vipLevel"), Some(&json!(3)));
}

#[tokio::test]
async fn rejected_cookie_is_not_an_error() {
    let server = MockServer::start().await;
    mount_rejected_login(&server).await;

    let mut client = IcodeClient::new(config(&server)).unwrap();
    let info = client.login(None).await.unwrap();
    assert!(info.is_none());
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn account_operations_need_login_before_any_request() {
    let server = MockServer::start().await;
    mount_rejected_login(&server).await;

    let client = IcodeClient::connect(config(&server)).await.unwrap();
    let err = client.comment("w1", "hello").await.unwrap_err();
    assert!(matches!(err, Error::NeedLogin { ref endpoint } if endpoint == "/api/works/comment"));

    // only the login request reached the server
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn login_switches_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/info"))
        .and(header("cookie", "uid=7"))
        .respond_with(json_response(json!({ "code": 0, "data": { "userId": "u7" } })))
        .mount(&server)
        .await;
    mount_rejected_login(&server).await;

    let mut client = IcodeClient::connect(config(&server)).await.unwrap();
    assert!(!client.is_logged_in());

    let info = client.login(Some("uid=7")).await.unwrap();
    assert_eq!(info.unwrap().user_id, "u7");
    assert_eq!(client.session().cookie(), "uid=7");
}

#[tokio::test]
async fn work_detail_keeps_unknown_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/works/detail"))
        .and(query_param("id", "w1"))
        .and(query_param("addBrowseNum", "false"))
        .respond_with(json_response(json!({
            "code": 0,
            "data": {
                "id": "w1",
                "title": "Snake",
                "codeLanguage": "python",
                "code": "print(1)",
                "browseNum": 12,
                "newField": "kept"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = IcodeClient::new(config(&server)).unwrap();
    let detail = client.get_work_detail("w1", false).await.unwrap();
    assert_eq!(detail.title, "Snake");
    assert_eq!(detail.browse_num, Some(12));
    assert_eq!(detail.code_language.as_deref(), Some("python"));
    assert_eq!(detail.extra.get("newField"), Some(&json!("kept")));
}

#[tokio::test]
async fn data_envelope_without_data_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(path("/api/works/detail"))
        .respond_with(json_response(json!({ "code": 500, "msg": "not found" })))
        .mount(&server)
        .await;

    let client = IcodeClient::new(config(&server)).unwrap();
    let err = client.get_work_detail("missing", false).await.unwrap_err();
    assert!(matches!(err, Error::MissingField { field: "data", .. }));
}

#[tokio::test]
async fn non_json_body_is_reported_with_its_text() {
    let server = MockServer::start().await;
    Mock::given(path("/api/user/index/hisStatics"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = IcodeClient::new(config(&server)).unwrap();
    match client.get_person_info("u1").await.unwrap_err() {
        Error::UnexpectedResponse { body, .. } => assert!(body.contains("bad gateway")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn lists_read_data_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/works/comment/list"))
        .and(query_param("id", "w1"))
        .and(query_param("page", "2"))
        .and(query_param("size", "5"))
        .respond_with(json_response(json!({
            "code": 0,
            "dataList": [
                { "id": 1, "content": "first", "time": 1_700_000_000_000i64 },
                { "id": 2, "content": "second" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(path("/api/index/works/list"))
        .respond_with(json_response(json!({ "code": 0 })))
        .mount(&server)
        .await;

    let client = IcodeClient::new(config(&server)).unwrap();
    let comments = client.get_work_comments("w1", 2, 5).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "first");
    assert!(comments[0].posted_at().is_some());
    assert!(comments[1].posted_at().is_none());

    let works = client.get_works(&WorkQuery::default()).await.unwrap();
    assert!(works.is_empty());
}

#[tokio::test]
async fn more_works_by_work_looks_up_the_author() {
    let server = MockServer::start().await;
    Mock::given(path("/api/works/detail"))
        .and(query_param("id", "w1"))
        .and(query_param("addBrowseNum", "false"))
        .respond_with(json_response(work("w1", "scratch", "{}")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/api/user/more_works/list"))
        .and(query_param("userId", "author-1"))
        .and(query_param("currentWorksId", "w1"))
        .respond_with(json_response(json!({
            "code": 0,
            "dataList": [{ "id": "w2", "title": "Other" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = IcodeClient::new(config(&server)).unwrap();
    let works = client
        .get_more_works(&MoreWorksBy::Work("w1".into()))
        .await
        .unwrap();
    assert_eq!(works.len(), 1);
    assert_eq!(works[0].id, "w2");
}

#[tokio::test]
async fn comment_posts_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/works/comment"))
        .and(header("cookie", COOKIE))
        .and(body_json(json!({ "id": "w1", "content": "nice work" })))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in(&server).await;
    let resp = client.comment("w1", "nice work").await.unwrap();
    assert_eq!(resp["code"], 0);
}

#[tokio::test]
async fn toggles_travel_in_the_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/works/like"))
        .and(query_param("id", "w1"))
        .and(query_param("type", "2"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/works/reply/praise"))
        .and(query_param("replyId", "9"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in(&server).await;
    client.like("w1", Toggle::Revoke).await.unwrap();
    client
        .praise_comment(CommentTarget::Reply(9), Toggle::Apply)
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let like = received
        .iter()
        .find(|r| r.url.path() == "/api/works/like")
        .unwrap();
    assert!(like.body.is_empty());
}

#[tokio::test]
async fn scratch_submission_is_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/work/submit"))
        .and(body_string_contains("name=\"title\""))
        .and(body_string_contains("Cat Game"))
        .and(body_string_contains("name=\"workid\""))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in(&server).await;
    let work = WorkSubmission::scratch(r#"{"targets":[]}"#)
        .with_title("Cat Game")
        .resubmit("w9");
    client.submit_work(&work).await.unwrap();
}

#[tokio::test]
async fn python_save_uses_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/works/save"))
        .and(body_json(json!({
            "code": "print(1)",
            "description": "Project Description",
            "title": "Hello"
        })))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in(&server).await;
    let work = WorkSubmission::python("print(1)")
        .with_title("Hello")
        .save_only(true);
    client.submit_work(&work).await.unwrap();
}

#[tokio::test]
async fn delete_work_uses_delete_method() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/works/delete"))
        .and(query_param("id", "w1"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in(&server).await;
    client.delete_work("w1").await.unwrap();
}

#[tokio::test]
async fn scratch_assets_come_back_raw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/svg/abc.svg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"<svg/>".to_vec()))
        .mount(&server)
        .await;

    let client = IcodeClient::new(ClientConfig::default().with_endpoints(
        icode_api::api::Endpoints::with_base(server.uri()),
    ))
    .unwrap();
    let bytes = client.get_scratch_asset("abc.svg").await.unwrap();
    assert_eq!(bytes, b"<svg/>");
}
