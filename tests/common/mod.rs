#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;

use enrollment_survey::config::Config;
use enrollment_survey::models::Catalog;

pub const ADMIN_PASSWORD: &str = "pc2025admin";

pub const CATALOG: &str = r#"[
    { "date": "7/1", "timeStart": "09:00", "timeEnd": "10:00",
      "subject": "數學", "name": "分數魔法", "lecturer": "王老師",
      "location": { "南 P&C": true, "站前": true }, "xpos": 120, "ypos": 300 },
    { "date": "7/1", "timeStart": "09:30", "timeEnd": "10:30",
      "subject": "英文", "name": "Phonics", "lecturer": "Lin",
      "location": { "南 P&C": true }, "xpos": 320, "ypos": 300 },
    { "date": "7/1", "timeStart": "10:00", "timeEnd": "11:00",
      "subject": "自然", "name": "小小實驗室", "lecturer": "陳老師",
      "location": { "美術館": true }, "xpos": 520, "ypos": 300 },
    { "date": "7/2", "timeStart": "09:00", "timeEnd": "10:00",
      "subject": "國文", "name": "閱讀理解", "lecturer": "張老師",
      "location": { "楠梓": true }, "xpos": 120, "ypos": 500 }
]"#;

/// A running test server backed by a private temporary data directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub data_file: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// POST a JSON body, return (body, status).
    pub async fn post_json(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get_json(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn login(&self, password: &str) -> (Value, StatusCode) {
        self.post_json("/api/login", &json!({ "password": password })).await
    }
}

/// A complete, clash-free form for the test catalog.
pub fn valid_form(name: &str) -> Value {
    json!({
        "studentName": name,
        "schoolGrade": "五福二",
        "parentPhone": "0912345678",
        "branch": "南 P&C",
        "diet": "葷食",
        "selectedCourses": {
            "0": { "transportation": "自行前往", "location": "" },
            "2": { "transportation": "搭乘交通車 - 來回", "location": "美術館" }
        }
    })
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Spawn a test app on a random port, letting the caller adjust the config.
pub async fn spawn_app_with(adjust: impl FnOnce(&mut Config)) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let data_file = dir.path().join("data/formData.json");

    let mut config = Config {
        admin_password: ADMIN_PASSWORD.to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        data_file: data_file.clone(),
        catalog_file: dir.path().join("courses.json"),
        max_body_size: 65_536,
        login_max_failures: 0,
        log_level: "warn".to_string(),
    };
    adjust(&mut config);

    let catalog = Catalog::from_json(CATALOG).expect("test catalog is valid");
    let (app, _state) = enrollment_survey::build_app(config, catalog);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        data_file,
        _dir: dir,
    }
}
