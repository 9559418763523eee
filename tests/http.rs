use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Summary {
    target_days: usize,
    checked_days: usize,
    streak: u32,
}

#[derive(Debug, Deserialize)]
struct Period {
    start: String,
    end: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    date: String,
    period: Period,
    in_period: bool,
    checked_in_at: Option<String>,
    locked: bool,
    summary: Summary,
}

#[derive(Debug, Deserialize)]
struct CheckInResponse {
    date: String,
    time: String,
}

#[derive(Debug, Deserialize)]
struct RecordPoint {
    date: String,
    time: String,
}

#[derive(Debug, Deserialize)]
struct CalendarResponse {
    months: Vec<CalendarMonth>,
}

#[derive(Debug, Deserialize)]
struct CalendarMonth {
    weeks: Vec<Vec<serde_json::Value>>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/status")).send().await {
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

async fn spawn_server(envs: &[(&str, &str)]) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_attendance_tracker"))
        .env("PORT", port.to_string())
        .env("RUST_LOG", "info")
        .envs(envs.iter().copied())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    let base_url = format!("http://127.0.0.1:{port}");
    let server = TestServer { base_url, child };
    wait_until_ready(&server.base_url).await;
    server
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = spawn_server(&[("ATTENDANCE_USER", "Tester")]).await;

    #[cfg(unix)]
    cleanup::register(server.child.id());

    let server = Arc::new(server);
    *guard = Some(Arc::clone(&server));
    server
}

async fn status(client: &Client, base_url: &str) -> StatusResponse {
    client
        .get(format!("{base_url}/api/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_status_reports_default_period() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let status = status(&client, &server.base_url).await;

    assert_eq!(status.period.start, status.date);
    assert!(status.in_period);
    assert_eq!(status.summary.target_days, 41);
    assert!(!status.period.end.is_empty());
}

#[tokio::test]
async fn http_check_in_once_per_day() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let first = client
        .post(format!("{}/api/check-in", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let body: CheckInResponse = first.json().await.unwrap();
    assert_eq!(body.time.len(), 8);

    let second = client
        .post(format!("{}/api/check-in", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert!(second.text().await.unwrap().contains("already checked in"));

    let status = status(&client, &server.base_url).await;
    assert_eq!(status.checked_in_at.as_deref(), Some(body.time.as_str()));
    assert!(status.locked);
    assert_eq!(status.summary.checked_days, 1);
    assert_eq!(status.summary.streak, 1);

    let records: Vec<RecordPoint> = client
        .get(format!("{}/api/records", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date, body.date);
    assert_eq!(records[0].time, body.time);
}

#[tokio::test]
async fn http_calendar_has_whole_weeks() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let calendar: CalendarResponse = client
        .get(format!("{}/api/calendar", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(!calendar.months.is_empty() && calendar.months.len() <= 2);
    for month in &calendar.months {
        assert!(month.weeks.iter().all(|week| week.len() == 7));
    }
}

#[tokio::test]
async fn http_index_renders_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let html = client
        .get(format!("{}/?notice=out_of_period", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("Tester · Attendance"));
    assert!(html.contains("closed outside the attendance period"));
}

#[tokio::test]
async fn http_check_in_outside_period_is_forbidden() {
    let server = spawn_server(&[("ATTENDANCE_PERIOD_START", "2999-01-01")]).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/check-in", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let status = status(&client, &server.base_url).await;
    assert!(!status.in_period);
    assert_eq!(status.checked_in_at, None);
}

#[tokio::test]
async fn http_repeat_date_allows_second_check_in() {
    let server = spawn_server(&[("ATTENDANCE_ALLOW_REPEAT_ON", "today")]).await;
    let client = Client::new();

    for _ in 0..2 {
        let response = client
            .post(format!("{}/api/check-in", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let status = status(&client, &server.base_url).await;
    assert!(!status.locked);
    assert_eq!(status.summary.checked_days, 1);
}

#[tokio::test]
async fn http_form_check_in_redirects_with_notice() {
    let server = spawn_server(&[]).await;
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let first = client
        .post(format!("{}/check-in", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(first.status().is_redirection());
    assert_eq!(first.headers()["location"], "/?notice=checked_in");

    let second = client
        .post(format!("{}/check-in", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(second.headers()["location"], "/?notice=already_checked_in");
}
