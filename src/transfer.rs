//! Moving items between installations as JSON. Urls are rebased on the way
//! out and on the way in, for every url editable that asks for it.
use super::{
    definitions::DefinitionRegistry,
    errors::DetailError,
    models::ContentItem,
    relativity::{rebase_item, RebaseEvent},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportedItem {
    /// The application root the item's urls are rooted at.
    pub app_path: String,
    pub item: ContentItem,
}

/// Export an item living under `from_app_path` for an installation rooted
/// at `to_app_path`.
pub fn export_item(
    item: &ContentItem,
    registry: &DefinitionRegistry,
    from_app_path: &str,
    to_app_path: &str,
) -> Result<ExportedItem, DetailError> {
    let definition = registry.get(&item.discriminator)?;
    let mut item = item.clone();
    let changed = rebase_item(
        &mut item,
        definition,
        RebaseEvent::Exporting,
        from_app_path,
        to_app_path,
    )?;
    info!(item = %item.id, rebased = changed.len(), "exported item");
    Ok(ExportedItem {
        app_path: to_app_path.to_string(),
        item,
    })
}

/// Import an exported item into the installation rooted at `app_path`.
pub fn import_item(
    exported: ExportedItem,
    registry: &DefinitionRegistry,
    app_path: &str,
) -> Result<ContentItem, DetailError> {
    let ExportedItem {
        app_path: from_app_path,
        mut item,
    } = exported;
    let definition = registry.get(&item.discriminator)?;
    let elided = definition.normalize(&mut item.details).map_err(|source| {
        DetailError::InvalidImport {
            item: item.id.to_string(),
            source: Box::new(source),
        }
    })?;
    if !elided.is_empty() {
        debug!(item = %item.id, ?elided, "dropped default details on import");
    }
    let changed = rebase_item(
        &mut item,
        definition,
        RebaseEvent::Importing,
        &from_app_path,
        app_path,
    )?;
    info!(item = %item.id, rebased = changed.len(), "imported item");
    Ok(item)
}
