//! Rewriting stored urls when content changes application root: exporting
//! to another environment, importing from one, or relocating the site.
use super::{
    definitions::ItemDefinition,
    details::Value,
    editable::Editable,
    errors::DetailError,
    models::ContentItem,
    url,
};
use serde::{Deserialize, Serialize};

/// When a url property wants to be rebased.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativityMode {
    Never,
    #[default]
    Always,
    ImportingOrExporting,
    Rebasing,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RebaseEvent {
    Exporting,
    Importing,
    Rebasing,
}

impl RelativityMode {
    pub fn applies_to(&self, event: RebaseEvent) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::ImportingOrExporting => matches!(
                event,
                RebaseEvent::Importing | RebaseEvent::Exporting
            ),
            Self::Rebasing => event == RebaseEvent::Rebasing,
        }
    }
}

/// Rebase every url detail of `item` whose editable asks for `event`.
/// Callers invoke this once per move; it has no memory of earlier calls.
/// Returns the names of the details that changed.
pub fn rebase_item(
    item: &mut ContentItem,
    definition: &ItemDefinition,
    event: RebaseEvent,
    from_app_path: &str,
    to_app_path: &str,
) -> Result<Vec<String>, DetailError> {
    url::validate_app_path(from_app_path)?;
    url::validate_app_path(to_app_path)?;

    let mut changed = Vec::new();
    for editable in definition.editables() {
        let Some(transformer) = editable.relativity_transformer() else {
            continue;
        };
        if !transformer.relative_when().applies_to(event) {
            continue;
        }
        let name = editable.name();
        let Some(current) = item.details.get::<String>(name)? else {
            continue;
        };
        let rebased =
            transformer.rebase(&current, from_app_path, to_app_path)?;
        if rebased != current {
            tracing::debug!(
                item = %item.id,
                detail = name,
                from = %current,
                to = %rebased,
                "rebased"
            );
            item.details.set_raw(name, Value::Str(rebased));
            changed.push(name.to_string());
        }
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::{EditableDate, EditableText, EditableUrl};

    fn definition() -> ItemDefinition {
        ItemDefinition::builder("Page")
            .editable(EditableUrl::new("Always"))
            .editable(
                EditableUrl::new("OnExport")
                    .relative_when(RelativityMode::ImportingOrExporting),
            )
            .editable(
                EditableUrl::new("OnMove")
                    .relative_when(RelativityMode::Rebasing),
            )
            .editable(
                EditableUrl::new("Pinned").relative_when(RelativityMode::Never),
            )
            .editable(EditableText::new("Text"))
            .editable(EditableDate::new("Date"))
            .build()
            .unwrap()
    }

    fn item() -> ContentItem {
        let mut item = ContentItem::new("Page", "Page");
        for name in ["Always", "OnExport", "OnMove", "Pinned", "Text"] {
            item.details.set(name, Some(String::from("/old/x")), None);
        }
        item
    }

    #[test]
    fn test_modes() {
        use super::RebaseEvent::*;
        assert!(RelativityMode::Always.applies_to(Rebasing));
        assert!(!RelativityMode::Never.applies_to(Exporting));
        assert!(RelativityMode::ImportingOrExporting.applies_to(Importing));
        assert!(!RelativityMode::ImportingOrExporting.applies_to(Rebasing));
        assert!(RelativityMode::Rebasing.applies_to(Rebasing));
        assert!(!RelativityMode::Rebasing.applies_to(Exporting));
    }

    #[test]
    fn test_export_rebases_matching_urls_only() {
        let mut item = item();
        let changed = rebase_item(
            &mut item,
            &definition(),
            RebaseEvent::Exporting,
            "/old",
            "/new",
        )
        .unwrap();
        assert_eq!(changed, vec!["Always", "OnExport"]);
        let get = |name: &str| item.details.get::<String>(name).unwrap().unwrap();
        assert_eq!(get("Always"), "/new/x");
        assert_eq!(get("OnExport"), "/new/x");
        assert_eq!(get("OnMove"), "/old/x");
        assert_eq!(get("Pinned"), "/old/x");
        // not a url editable
        assert_eq!(get("Text"), "/old/x");
    }

    #[test]
    fn test_relocation() {
        let mut item = item();
        let changed = rebase_item(
            &mut item,
            &definition(),
            RebaseEvent::Rebasing,
            "/old",
            "/",
        )
        .unwrap();
        assert_eq!(changed, vec!["Always", "OnMove"]);
        assert_eq!(
            item.details.get::<String>("OnMove").unwrap().as_deref(),
            Some("/x")
        );
    }

    #[test]
    fn test_relative_urls_are_untouched() {
        let mut item = ContentItem::new("Page", "Page");
        item.details.set("Always", Some(String::from("~/x")), None);
        let changed = rebase_item(
            &mut item,
            &definition(),
            RebaseEvent::Rebasing,
            "/old",
            "/new",
        )
        .unwrap();
        assert!(changed.is_empty());
    }

    #[test]
    fn test_malformed_root_fails_before_touching_anything() {
        let mut item = item();
        let err = rebase_item(
            &mut item,
            &definition(),
            RebaseEvent::Rebasing,
            "/old",
            "new",
        )
        .unwrap_err();
        assert!(matches!(err, DetailError::InvalidPath(ref p) if p == "new"));
        assert_eq!(item.details, self::item().details);
    }
}
