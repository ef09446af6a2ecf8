use anyhow::Result;
use cloudcfg::{CloudClient, CloudClientConfig, Snapshot};
use mockito::{Mock, ServerGuard};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

const APP_NAME: &str = "rss-entry-service";

fn body(a: &str) -> String {
    format!(
        r#"{{
            "name": "{}",
            "profiles": ["prod"],
            "label": null,
            "version": null,
            "state": null,
            "propertySources": [{{"name": "app", "source": {{"a": "{}"}}}}]
        }}"#,
        APP_NAME, a
    )
}

fn mock_config(server: &mut ServerGuard, path: &str, body: &str) -> Mock {
    server
        .mock("GET", path)
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create()
}

fn config(server: &ServerGuard, profile: &str, refresh_interval: Duration) -> CloudClientConfig {
    CloudClientConfig {
        refresh_interval,
        request_timeout: Duration::from_secs(2),
        ..CloudClientConfig::new(server.url(), APP_NAME, profile)
    }
}

fn wait_until(timeout: Duration, cond: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    cond()
}

#[test]
fn test_end_to_end_update_cycle() -> Result<()> {
    let mut server = mockito::Server::new();
    let v1 = mock_config(&mut server, "/rss-entry-service/prod", &body("1"));

    let client = CloudClient::new(config(&server, "", Duration::from_secs(3600)))?;
    v1.assert();
    assert_eq!(
        client.properties(),
        Snapshot::from([("a".to_string(), "1".to_string())])
    );
    assert!(!client.has_pending_update());

    v1.remove();
    let v2 = server
        .mock("GET", "/rss-entry-service/prod")
        .with_status(200)
        .with_body(body("2"))
        .expect(2)
        .create();

    // 配置变化，发出通知
    assert!(client.refresh()?);
    assert_eq!(
        client.properties(),
        Snapshot::from([("a".to_string(), "2".to_string())])
    );
    assert!(client.has_pending_update());

    // 消费方取走通知后，相同的配置不再产生通知
    assert!(client.take_pending_update());
    assert!(!client.refresh()?);
    assert!(!client.has_pending_update());

    v2.assert();
    Ok(())
}

#[test]
fn test_profile_in_request_path() -> Result<()> {
    let mut server = mockito::Server::new();
    let dev = mock_config(&mut server, "/rss-entry-service/dev", &body("dev"));

    let client = CloudClient::new(config(&server, "dev", Duration::from_secs(3600)))?;
    dev.assert();
    assert_eq!(client.get("a").as_deref(), Some("dev"));
    Ok(())
}

#[test]
fn test_server_error_keeps_last_known_properties() -> Result<()> {
    let mut server = mockito::Server::new();
    let ok = mock_config(&mut server, "/rss-entry-service/prod", &body("1"));
    let client = CloudClient::new(config(&server, "", Duration::from_secs(3600)))?;
    ok.remove();

    let failing = server
        .mock("GET", "/rss-entry-service/prod")
        .with_status(500)
        .with_body("Internal Server Error")
        .create();

    assert!(client.refresh().is_err());
    failing.assert();
    assert_eq!(client.get("a").as_deref(), Some("1"));
    assert!(!client.has_pending_update());
    Ok(())
}

#[test]
fn test_malformed_response_keeps_last_known_properties() -> Result<()> {
    let mut server = mockito::Server::new();
    let ok = mock_config(&mut server, "/rss-entry-service/prod", &body("1"));
    let client = CloudClient::new(config(&server, "", Duration::from_secs(3600)))?;
    ok.remove();

    let malformed = mock_config(&mut server, "/rss-entry-service/prod", "{not json");

    assert!(client.refresh().is_err());
    malformed.assert();
    assert_eq!(client.get("a").as_deref(), Some("1"));
    assert!(!client.has_pending_update());
    Ok(())
}

#[test]
fn test_background_refresh_picks_up_changes() -> Result<()> {
    let mut server = mockito::Server::new();
    let v1 = mock_config(&mut server, "/rss-entry-service/prod", &body("1"));
    let client = CloudClient::new(config(&server, "", Duration::from_millis(20)))?;
    v1.remove();

    let _v2 = mock_config(&mut server, "/rss-entry-service/prod", &body("2"));

    assert!(wait_until(Duration::from_secs(5), || client.has_pending_update()));
    assert_eq!(client.get("a").as_deref(), Some("2"));
    Ok(())
}

#[test]
fn test_watch_receives_updated_properties() -> Result<()> {
    let mut server = mockito::Server::new();
    let v1 = mock_config(&mut server, "/rss-entry-service/prod", &body("1"));
    let client = CloudClient::new(config(&server, "", Duration::from_millis(20)))?;

    let (tx, rx) = mpsc::channel();
    client.watch(Duration::from_millis(10), move |props| {
        let _ = tx.send(props);
    })?;

    v1.remove();
    let _v2 = mock_config(&mut server, "/rss-entry-service/prod", &body("2"));

    let props = rx.recv_timeout(Duration::from_secs(5))?;
    assert_eq!(props.get("a").map(String::as_str), Some("2"));
    assert!(!client.has_pending_update());
    Ok(())
}
