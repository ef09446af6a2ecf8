use anyhow::Result;
use cloudcfg::{CloudClient, CloudClientConfig};
use std::time::Duration;

const LAYERED_BODY: &str = r#"{
    "name": "rss-entry-service",
    "profiles": ["dev"],
    "label": "main",
    "version": "9d1f3c2",
    "state": null,
    "propertySources": [
        {
            "name": "git:rss-entry-service-dev.yml",
            "source": {
                "ui.search.port": 8081,
                "ui.search.url": "${ui.search.host}",
                "ui.search.missing": "${not.defined}"
            }
        },
        {
            "name": "git:application.yml",
            "source": {
                "ui.search.port": 8080,
                "ui.search.host": "search.example.com",
                "ui.search.servdir": "/srv/search",
                "ui.search.enabled": true
            }
        }
    ]
}"#;

#[test]
fn test_layered_properties_over_http() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/rss-entry-service/dev")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LAYERED_BODY)
        .create();

    let client = CloudClient::new(CloudClientConfig {
        refresh_interval: Duration::from_secs(3600),
        ..CloudClientConfig::new(server.url(), "rss-entry-service", "dev")
    })?;
    mock.assert();

    let props = client.properties();
    assert_eq!(props.len(), 6);
    assert_eq!(props["ui.search.port"], "8081");
    assert_eq!(props["ui.search.url"], "search.example.com");
    assert_eq!(props["ui.search.missing"], "");
    assert_eq!(props["ui.search.servdir"], "/srv/search");
    assert_eq!(props["ui.search.enabled"], "true");

    // 相同的响应再次合并，结果不变
    assert!(!client.refresh()?);
    assert_eq!(client.properties(), props);
    Ok(())
}

#[test]
fn test_removed_keys_are_kept() -> Result<()> {
    let mut server = mockito::Server::new();
    let full = server
        .mock("GET", "/rss-entry-service/prod")
        .with_status(200)
        .with_body(r#"{"propertySources":[{"name":"app","source":{"a":"1","b":"2"}}]}"#)
        .create();

    let client = CloudClient::new(CloudClientConfig {
        refresh_interval: Duration::from_secs(3600),
        ..CloudClientConfig::new(server.url(), "rss-entry-service", "")
    })?;
    full.remove();

    let _partial = server
        .mock("GET", "/rss-entry-service/prod")
        .with_status(200)
        .with_body(r#"{"propertySources":[{"name":"app","source":{"a":"1"}}]}"#)
        .create();

    assert!(!client.refresh()?);
    assert_eq!(client.get("b").as_deref(), Some("2"));
    Ok(())
}
