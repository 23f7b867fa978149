mod common;

use activity_roster::models::{Listing, ViewResponse};
use common::{chess_roster, spawn_backend, MockBackend};
use reqwest::Client;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::time::sleep;

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        cleanup::forget(self.child.id());
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(unix)]
mod cleanup {
    use once_cell::sync::Lazy;
    use std::sync::{Mutex, Once};

    static REGISTER: Once = Once::new();
    static PIDS: Lazy<Mutex<Vec<u32>>> = Lazy::new(|| Mutex::new(Vec::new()));

    pub fn register(pid: u32) {
        if let Ok(mut pids) = PIDS.lock() {
            pids.push(pid);
        }
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    pub fn forget(pid: u32) {
        if let Ok(mut pids) = PIDS.lock() {
            pids.retain(|known| *known != pid);
        }
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = PIDS.lock() {
            for pid in pids.iter() {
                unsafe {
                    libc::kill(*pid as i32, libc::SIGTERM);
                }
            }
        }
    }
}

#[cfg(not(unix))]
mod cleanup {
    pub fn register(_pid: u32) {}
    pub fn forget(_pid: u32) {}
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn fetch_view(base_url: &str) -> ViewResponse {
    Client::new()
        .get(format!("{base_url}/api/view"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn wait_until_ready(base_url: &str) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(resp) = Client::new().get(format!("{base_url}/api/view")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(backend: &MockBackend, extra_env: &[(&str, &str)]) -> TestServer {
    let port = pick_free_port();
    let mut command = Command::new(env!("CARGO_BIN_EXE_activity_roster"));
    command
        .env("PORT", port.to_string())
        .env("ROSTER_BACKEND_URL", &backend.base_url)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    for (key, value) in extra_env {
        command.env(key, value);
    }
    let child = command.spawn().expect("failed to spawn server");
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn post_form(url: String, fields: &[(&str, &str)]) -> String {
    let response = Client::new().post(url).form(fields).send().await.unwrap();
    assert!(response.status().is_success());
    response.text().await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn http_index_renders_roster() {
    let backend = spawn_backend(chess_roster()).await;
    let server = spawn_server(&backend, &[]).await;

    let page = Client::new()
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(page.contains("9 spots left"));
    assert!(page.contains(r#"<span class="participant-name">a@x.com</span>"#));
    assert_eq!(page.matches("<option ").count(), 3);

    let view = fetch_view(&server.base_url).await;
    assert_eq!(view.listing, Listing::Loaded);
    assert_eq!(view.activities.len(), 2);
    assert!(view.fetched_at.is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn http_signup_form_updates_roster() {
    let backend = spawn_backend(chess_roster()).await;
    let server = spawn_server(&backend, &[]).await;

    let page = post_form(
        format!("{}/signup", server.base_url),
        &[("email", "b@x.com"), ("activity", "Chess Club")],
    )
    .await;

    assert!(page.contains(r#"<div id="message" class="success">Signed up</div>"#));
    assert!(page.contains("8 spots left"));
    assert!(page.contains(r#"aria-label="Remove b@x.com""#));
    assert!(page.contains(r#"name="email" required placeholder="your-email@school.edu" value="""#));
    assert_eq!(backend.state.fetch_count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn http_rejected_signup_keeps_roster() {
    let backend = spawn_backend(chess_roster()).await;
    let server = spawn_server(&backend, &[]).await;
    let before = fetch_view(&server.base_url).await.activities;

    let page = post_form(
        format!("{}/signup", server.base_url),
        &[("email", "a@x.com"), ("activity", "Chess Club")],
    )
    .await;

    assert!(page.contains(r#"<div id="message" class="error">Already signed up</div>"#));
    let view = fetch_view(&server.base_url).await;
    assert_eq!(view.activities, before);
    assert_eq!(view.draft.email, "a@x.com");
}

#[tokio::test(flavor = "multi_thread")]
async fn http_unregister_removes_participant() {
    let backend = spawn_backend(chess_roster()).await;
    let server = spawn_server(&backend, &[("ROSTER_REMOVE_CONTROL", "text")]).await;

    let page = post_form(
        format!("{}/unregister", server.base_url),
        &[("activity", "Chess Club"), ("email", "a@x.com")],
    )
    .await;

    assert!(!page.contains(r#"<span class="participant-name">a@x.com</span>"#));
    assert!(page.contains("10 spots left"));
    assert_eq!(backend.state.fetch_count(), 2);
    assert!(backend.state.participants("Chess Club").await.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn http_refresh_picks_up_backend_changes() {
    let backend = spawn_backend(chess_roster()).await;
    let server = spawn_server(&backend, &[]).await;

    backend
        .state
        .roster
        .lock()
        .await
        .get_mut("Art Studio")
        .unwrap()
        .participants
        .push("z@x.com".into());

    let page = post_form(format!("{}/refresh", server.base_url), &[]).await;
    assert!(page.contains(r#"<span class="participant-name">z@x.com</span>"#));
    assert!(page.contains("1 spots left"));
}
