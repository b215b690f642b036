//! Mock component catalog
//!
//! Routes mirror the exchange REST API:
//! - `GET /components/{name}` and `GET /components/{name}/versions/{version}`
//! - `GET /components/{name}/versions/{version}/compositeDependencies`
//! - `GET /archives/{name}-{version}.zip` (the `codeUrl`)

use super::fixtures::zip_component;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn metadata(server: &MockServer, name: &str, version: &str) -> serde_json::Value {
    json!({
        "name": name,
        "version": version,
        "codeUrl": format!("{}/archives/{}-{}.zip", server.uri(), name, version),
    })
}

/// Mount metadata (latest and pinned) plus the dependency list for `name@version`
pub async fn mount_metadata(server: &MockServer, name: &str, version: &str, deps: &[(&str, &str)]) {
    let body = metadata(server, name, version);

    Mock::given(method("GET"))
        .and(path(format!("/components/{}", name)))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/components/{}/versions/{}", name, version)))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;

    let resolved: serde_json::Map<String, serde_json::Value> = deps
        .iter()
        .map(|(dep, v)| (dep.to_string(), json!({ "availableVersion": v })))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!(
            "/components/{}/versions/{}/compositeDependencies",
            name, version
        )))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "resolvedDependencies": resolved })),
        )
        .mount(server)
        .await;
}

/// Mount the archive route and require it to be hit exactly `times`
pub async fn mount_archive(server: &MockServer, name: &str, version: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/archives/{}-{}.zip", name, version)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(zip_component(name, version)))
        .expect(times)
        .mount(server)
        .await;
}

/// A fully installable component whose archive is downloaded once
pub async fn mount_component(server: &MockServer, name: &str, version: &str, deps: &[(&str, &str)]) {
    mount_metadata(server, name, version, deps).await;
    mount_archive(server, name, version, 1).await;
}

/// A component the catalog does not know
pub async fn mount_missing(server: &MockServer, name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/components/{}", name)))
        .respond_with(ResponseTemplate::new(404).set_body_string("component not found"))
        .mount(server)
        .await;
}
