use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::{FromRequest, Path, Query, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use common::{
    issuer::Issuer,
    placeholder::{echo_form, PlaceholderClient},
    CoreError,
};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

async fn post_by_id(Path(id): Path<u32>) -> Json<Value> {
    Json(json!({"userId": 1, "id": id, "title": "sunt aut facere", "body": "quia et suscipit"}))
}

async fn comments(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    let post_id: u32 = q.get("postId").and_then(|v| v.parse().ok()).unwrap_or(0);
    Json(json!([
        {"postId": post_id, "id": 6, "name": "et fugit eligendi", "email": "Presley.Mueller@myrl.com", "body": "doloribus at sed"},
        {"postId": post_id, "id": 7, "name": "repellat consequatur", "email": "Dallas@ole.me", "body": "maiores sed dolores"}
    ]))
}

async fn users() -> &'static str {
    "[{\"id\":1,\"name\":\"Leanne Graham\"}]"
}

async fn slow_users() -> &'static str {
    tokio::time::sleep(Duration::from_secs(2)).await;
    "[]"
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

// Mirrors the placeholder: echo the submitted fields and assign an id.
async fn create_post(req: Request) -> Result<Json<Value>, StatusCode> {
    let mut fields: Map<String, Value> = if is_form(&req) {
        let Form(map) = Form::<HashMap<String, String>>::from_request(req, &())
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;
        map.into_iter().map(|(k, v)| (k, Value::String(v))).collect()
    } else {
        let Json(map) = Json::<Map<String, Value>>::from_request(req, &())
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;
        map
    };
    fields.insert("id".into(), json!(101));
    Ok(Json(Value::Object(fields)))
}

async fn httpbin_echo(Form(map): Form<HashMap<String, String>>) -> Json<Value> {
    Json(json!({"args": {}, "form": map, "url": "https://httpbin.org/post"}))
}

async fn spawn(app: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}

async fn stand_in() -> anyhow::Result<String> {
    let app = Router::new()
        .route("/posts", post(create_post))
        .route("/posts/:id", get(post_by_id))
        .route("/comments", get(comments))
        .route("/users", get(users))
        .route("/post", post(httpbin_echo));
    spawn(app).await
}

#[tokio::test]
async fn form_post_echoes_title() -> anyhow::Result<()> {
    let base = stand_in().await?;
    let client = PlaceholderClient::new(base, Duration::from_secs(5))?;

    let created = client
        .create_post_form(&[("title", "t"), ("body", "b"), ("userId", "999"), ("id", "9")])
        .await?;
    assert_eq!(created.title, "t");
    assert_eq!(created.body, "b");
    assert_eq!(created.user_id, "999");
    assert_eq!(created.id, 101);
    Ok(())
}

#[tokio::test]
async fn json_post_sends_json_body() -> anyhow::Result<()> {
    let base = stand_in().await?;
    let client = PlaceholderClient::new(base, Duration::from_secs(5))?;

    let raw = client
        .create_post_json(&[("userId", "100"), ("id", "101"), ("title", "ping ping ping")])
        .await?;
    let v: Value = serde_json::from_str(&raw)?;
    assert_eq!(v["title"], "ping ping ping");
    assert_eq!(v["userId"], "100");
    Ok(())
}

#[tokio::test]
async fn get_variants_return_bodies() -> anyhow::Result<()> {
    let base = stand_in().await?;
    let client = PlaceholderClient::new(base, Duration::from_secs(5))?;

    let post: common::types::Post = serde_json::from_str(&client.fetch_post(1).await?)?;
    assert_eq!(post.id, 1);

    let mut sink: Vec<u8> = Vec::new();
    let copied = client.stream_post(3, &mut sink).await?;
    assert_eq!(copied as usize, sink.len());
    let streamed: common::types::Post = serde_json::from_slice(&sink)?;
    assert_eq!(streamed.id, 3);

    let raw = client.fetch_comments_raw(2).await?;
    assert!(raw.contains("\"postId\":2"));

    let comments = client.fetch_comments(2).await?;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].name, "et fugit eligendi");

    assert!(client.fetch_users_raw().await?.contains("Leanne Graham"));
    Ok(())
}

#[tokio::test]
async fn echo_form_returns_form_member() -> anyhow::Result<()> {
    let base = stand_in().await?;
    let issuer = Issuer::new(None)?;
    let form = echo_form(&issuer, &format!("{base}/post"), &[("userId", "1"), ("id", "3")]).await?;
    assert_eq!(form["userId"], "1");
    assert_eq!(form["id"], "3");
    Ok(())
}

#[tokio::test]
async fn non_success_status_is_returned_not_raised() -> anyhow::Result<()> {
    let base = stand_in().await?;
    let issuer = Issuer::new(None)?;
    let resp = issuer.get(&format!("{base}/nope"), &[]).await?;
    assert_eq!(resp.status.as_u16(), 404);
    assert!(!resp.is_success());
    Ok(())
}

#[tokio::test]
async fn decoding_a_non_json_reply_is_a_decode_error() -> anyhow::Result<()> {
    let base = stand_in().await?;
    let issuer = Issuer::new(None)?;
    let res = issuer.get_json::<Vec<common::types::Comment>>(&format!("{base}/nope"), &[]).await;
    assert!(matches!(res, Err(CoreError::Decode(_))));
    Ok(())
}

#[tokio::test]
async fn timed_client_gives_up_after_its_budget() -> anyhow::Result<()> {
    let base = spawn(Router::new().route("/users", get(slow_users))).await?;
    let client = PlaceholderClient::new(base, Duration::from_millis(200))?;
    let res = client.fetch_users_raw().await;
    assert!(matches!(res, Err(CoreError::Transport(_))));
    Ok(())
}
