use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use migration::MigratorTrait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode as HttpStatusCode;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::auth::Claims;
use server::routes;
use server::state::{AppState, ServerAuthConfig};

const SECRET: &str = "test-secret";

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
    uploads: tempfile::TempDir,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;

    // 每个测试使用独立的上传目录
    let uploads = tempfile::tempdir()?;
    let upload = configs::UploadConfig {
        dir: uploads.path().to_string_lossy().to_string(),
        url_prefix: "/uploads".into(),
    };
    service::runtime::ensure_upload_dirs(&upload.dir).await?;

    let state = AppState::new(db, ServerAuthConfig { jwt_secret: SECRET.into() }, upload);
    let app: Router = routes::build_router(state, cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, uploads })
}

/// Client whose cookie store already holds an `auth_token` for `open_id`.
fn client_with_cookie(base_url: &str, open_id: &str) -> anyhow::Result<reqwest::Client> {
    let exp = (models::unix_now() + 3600) as usize;
    let token = encode(&Header::default(), &Claims { sub: open_id.into(), exp }, &EncodingKey::from_secret(SECRET.as_bytes()))?;
    let jar = reqwest::cookie::Jar::default();
    jar.add_cookie_str(&format!("auth_token={token}; Path=/"), &base_url.parse::<reqwest::Url>()?);
    Ok(reqwest::Client::builder().cookie_provider(Arc::new(jar)).build()?)
}

/// PNG signature plus IHDR; enough for dimension probing.
fn png_header(width: u32, height: u32) -> Vec<u8> {
    let mut v = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    v.extend_from_slice(&13u32.to_be_bytes());
    v.extend_from_slice(b"IHDR");
    v.extend_from_slice(&width.to_be_bytes());
    v.extend_from_slice(&height.to_be_bytes());
    v.extend_from_slice(&[8, 6, 0, 0, 0]);
    v.extend_from_slice(&[0, 0, 0, 0]);
    v
}

fn file_form(bytes: Vec<u8>, name: &str) -> anyhow::Result<Form> {
    let part = Part::bytes(bytes).file_name(name.to_string()).mime_str("application/octet-stream")?;
    Ok(Form::new().part("file", part))
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_upload_requires_auth() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new()
        .post(format!("{}/api/v1/upload/avatar", app.base_url))
        .multipart(file_form(png_header(200, 200), "me.png")?)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], 20004);
    Ok(())
}

#[tokio::test]
async fn e2e_avatar_upload_is_stored_and_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client_with_cookie(&app.base_url, "client-001")?;
    let png = png_header(200, 200);

    let res = c
        .post(format!("{}/api/v1/upload/avatar", app.base_url))
        .multipart(file_form(png.clone(), "Me.PNG")?)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], 200);
    let name = body["data"]["name"].as_str().unwrap_or_default().to_string();
    let url = body["data"]["url"].as_str().unwrap_or_default().to_string();
    assert!(name.ends_with(".png"), "{name}");
    assert_eq!(url, format!("/uploads/avatar/{name}"));
    assert_eq!(body["data"]["size"], png.len());
    assert!(app.uploads.path().join("avatar").join(&name).is_file());

    let served = reqwest::Client::new().get(format!("{}{}", app.base_url, url)).send().await?;
    assert_eq!(served.status(), HttpStatusCode::OK);
    assert_eq!(served.bytes().await?.to_vec(), png);
    Ok(())
}

#[tokio::test]
async fn e2e_upload_rejections() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client_with_cookie(&app.base_url, "client-001")?;

    let res = c
        .post(format!("{}/api/v1/upload/video", app.base_url))
        .multipart(file_form(png_header(200, 200), "a.png")?)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<serde_json::Value>().await?["code"], 30005);

    let res = c
        .post(format!("{}/api/v1/upload/avatar", app.base_url))
        .multipart(file_form(png_header(200, 200), "a.gif")?)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<serde_json::Value>().await?["code"], 30003);

    let res = c
        .post(format!("{}/api/v1/upload/avatar", app.base_url))
        .multipart(file_form(png_header(50, 50), "small.png")?)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<serde_json::Value>().await?["code"], 30002);

    let res = c
        .post(format!("{}/api/v1/upload/avatar", app.base_url))
        .multipart(Form::new().text("note", "no file here"))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<serde_json::Value>().await?["code"], 400);
    Ok(())
}
