//! Publishing and labelling components on the exchange

use crate::archive;
use crate::client::ExchangeClient;
use crate::error::{Error, Result};
use crate::types::Credentials;
use ojet_core::ComponentJson;
use std::path::Path;
use tracing::info;

/// What was uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub name: String,
    pub version: String,
    pub file_name: String,
}

/// Zip `component_dir` in memory and upload it
pub async fn publish_component(
    client: &ExchangeClient,
    component_dir: &Path,
    credentials: &Credentials,
) -> Result<Published> {
    if !tokio::fs::try_exists(component_dir).await? {
        let name = component_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Err(Error::component_not_found(
            name,
            component_dir.display().to_string(),
        ));
    }

    let component = ComponentJson::load_async(component_dir).await?;
    let name = component.full_name();
    let file_name = archive::package_file_name(&name, &component.version);

    let src = component_dir.to_path_buf();
    let bytes = tokio::task::spawn_blocking(move || archive::pack_dir(&src))
        .await
        .map_err(std::io::Error::other)??;

    let token = client.authenticate(credentials).await?;
    client.publish(&token, &file_name, bytes).await?;
    info!("Published {}@{}", name, component.version);

    Ok(Published {
        name,
        version: component.version,
        file_name,
    })
}

/// Point `label` at `name@version`
pub async fn label_component(
    client: &ExchangeClient,
    credentials: &Credentials,
    name: &str,
    version: &str,
    label: &str,
) -> Result<()> {
    let token = client.authenticate(credentials).await?;
    client.label(&token, name, version, label).await?;
    info!("Labelled {}@{} as '{}'", name, version, label);
    Ok(())
}
