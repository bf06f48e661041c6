#![allow(dead_code)]

use icode_api::api::Endpoints;
use icode_api::{ClientConfig, IcodeClient};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const COOKIE: &str = "uid=42; token=abc";
pub const USER_AGENT: &str = "icode-tests/1.0";

pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(COOKIE)
        .with_user_agent(USER_AGENT)
        .with_endpoints(Endpoints::with_base(server.uri()))
}

pub fn json_response(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn ok() -> ResponseTemplate {
    json_response(json!({ "code": 0, "msg": "success" }))
}

pub async fn mount_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/user/info"))
        .respond_with(json_response(json!({
            "code": 0,
            "data": { "userId": "u42", "name": "Tester" }
        })))
        .mount(server)
        .await;
}

pub async fn mount_rejected_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/user/info"))
        .respond_with(json_response(json!({ "code": 401, "msg": "not login" })))
        .mount(server)
        .await;
}

pub async fn logged_in(server: &MockServer) -> IcodeClient {
    mount_login(server).await;
    IcodeClient::connect(config(server))
        .await
        .expect("client should connect")
}

pub fn work(id: &str, language: &str, code: &str) -> Value {
    json!({
        "code": 0,
        "data": {
            "id": id,
            "title": "My Work",
            "userId": "author-1",
            "codeLanguage": language,
            "code": code,
            "status": 2
        }
    })
}
