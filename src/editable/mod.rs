//! Editables describe how one property of a content item is edited. Each
//! one is attached to a property when a definition is registered and stays
//! read-only afterwards; the per-request state lives in the controls and
//! the `EditContext` instead.
//!
//! The lifecycle for one property is always the same three steps:
//!
//! 1. `add_editor` attaches a fresh control to a container
//! 2. `update_editor` copies the stored detail into the control
//! 3. `update_item` copies the control's value back into the detail bag
//!
//! Beyond editing, an editable can opt into extra capabilities
//! (`Displayable`, `WritingDisplayable`, `RelativityTransformer`). The
//! pipelines ask `Editor` for them instead of assuming every editable
//! supports them.

pub mod context;
pub mod date;
pub mod text;
pub mod url;

pub use context::EditContext;
pub use date::EditableDate;
pub use text::EditableText;
pub use url::{EditableUrl, UrlRelativityMode};

use super::{
    controls::{Container, Control},
    details::{Value, ValueType},
    errors::DetailError,
    models::ContentItem,
    relativity::RelativityMode,
};
use std::fmt;

/// Placement metadata. None of it affects how values are handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditableMeta {
    pub name: String,
    pub title: Option<String>,
    pub sort_order: i32,
    pub container_name: Option<String>,
}

impl EditableMeta {
    pub fn new(name: &str, sort_order: i32) -> Self {
        Self {
            name: name.to_string(),
            title: None,
            sort_order,
            container_name: None,
        }
    }

    /// The label shown to editors, falling back to the property name.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

pub trait Editable {
    fn meta(&self) -> &EditableMeta;

    fn name(&self) -> &str {
        &self.meta().name
    }

    /// Attach a new control, configured from this editable's options, and
    /// return it. Never touches the detail bag.
    fn add_editor<'c>(&self, container: &'c mut Container) -> &'c mut Control;

    /// Copy the stored value into the context's control. A missing detail
    /// is rendered as the default.
    fn update_editor(
        &self,
        context: &mut EditContext<'_>,
    ) -> Result<(), DetailError>;

    /// Copy the control's value into the detail bag, eliding defaults.
    fn update_item(
        &self,
        context: &mut EditContext<'_>,
    ) -> Result<(), DetailError>;
}

/// Read-only output of a stored value, without building an editor.
pub trait Displayable {
    /// Returns `None` (and attaches nothing) when there is nothing to show.
    fn add_to<'c>(
        &self,
        item: &ContentItem,
        detail_name: &str,
        container: &'c mut Container,
    ) -> Result<Option<&'c mut Control>, DetailError>;
}

/// Writes the raw stored value to a text sink.
pub trait WritingDisplayable {
    fn write(
        &self,
        item: &ContentItem,
        property_name: &str,
        writer: &mut dyn fmt::Write,
    ) -> fmt::Result;
}

/// Rewrites a stored path when its item moves between application roots.
pub trait RelativityTransformer {
    /// Which events should trigger `rebase`. The rewrite itself does not
    /// depend on it.
    fn relative_when(&self) -> RelativityMode;

    fn rebase(
        &self,
        current_path: &str,
        from_app_path: &str,
        to_app_path: &str,
    ) -> Result<String, DetailError>;
}

/// The raw writer shared by every editable: the stored value's canonical
/// string form, or nothing at all.
pub(crate) fn write_raw(
    item: &ContentItem,
    property_name: &str,
    writer: &mut dyn fmt::Write,
) -> fmt::Result {
    match item.detail(property_name) {
        Some(value) => write!(writer, "{value}"),
        None => Ok(()),
    }
}

/// Every kind of editable a definition can carry.
#[derive(Clone, Debug)]
pub enum Editor {
    Date(EditableDate),
    Url(EditableUrl),
    Text(EditableText),
}

impl Editor {
    fn inner(&self) -> &dyn Editable {
        match self {
            Self::Date(e) => e,
            Self::Url(e) => e,
            Self::Text(e) => e,
        }
    }

    pub fn displayable(&self) -> Option<&dyn Displayable> {
        match self {
            Self::Date(e) => Some(e),
            Self::Url(e) => Some(e),
            Self::Text(e) => Some(e),
        }
    }

    pub fn writing_displayable(&self) -> Option<&dyn WritingDisplayable> {
        match self {
            Self::Date(e) => Some(e),
            Self::Url(e) => Some(e),
            Self::Text(e) => Some(e),
        }
    }

    pub fn relativity_transformer(
        &self,
    ) -> Option<&dyn RelativityTransformer> {
        match self {
            Self::Url(e) => Some(e),
            Self::Date(_) | Self::Text(_) => None,
        }
    }

    /// The variant this editable stores.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Date(_) => ValueType::DateTime,
            Self::Url(_) | Self::Text(_) => ValueType::Str,
        }
    }

    /// The value `update_item` elides, if any.
    pub fn default_value(&self) -> Option<Value> {
        match self {
            Self::Date(_) => None,
            Self::Url(_) | Self::Text(_) => Some(Value::Str(String::new())),
        }
    }
}

impl Editable for Editor {
    fn meta(&self) -> &EditableMeta {
        self.inner().meta()
    }

    fn add_editor<'c>(&self, container: &'c mut Container) -> &'c mut Control {
        self.inner().add_editor(container)
    }

    fn update_editor(
        &self,
        context: &mut EditContext<'_>,
    ) -> Result<(), DetailError> {
        self.inner().update_editor(context)
    }

    fn update_item(
        &self,
        context: &mut EditContext<'_>,
    ) -> Result<(), DetailError> {
        self.inner().update_item(context)
    }
}

impl From<EditableDate> for Editor {
    fn from(e: EditableDate) -> Self {
        Self::Date(e)
    }
}

impl From<EditableUrl> for Editor {
    fn from(e: EditableUrl) -> Self {
        Self::Url(e)
    }
}

impl From<EditableText> for Editor {
    fn from(e: EditableText) -> Self {
        Self::Text(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{DatePicker, UrlSelector};

    fn editors() -> Vec<Editor> {
        vec![
            EditableDate::new("Published").into(),
            EditableUrl::new("Link").into(),
            EditableText::new("Footer").into(),
        ]
    }

    #[test]
    fn test_capabilities() {
        let editors = editors();
        assert!(editors.iter().all(|e| e.displayable().is_some()));
        assert!(editors.iter().all(|e| e.writing_displayable().is_some()));
        let transformers: Vec<&str> = editors
            .iter()
            .filter(|e| e.relativity_transformer().is_some())
            .map(|e| e.name())
            .collect();
        assert_eq!(transformers, vec!["Link"]);
    }

    #[test]
    fn test_stored_types_and_defaults() {
        let types: Vec<ValueType> =
            editors().iter().map(|e| e.value_type()).collect();
        assert_eq!(
            types,
            vec![ValueType::DateTime, ValueType::Str, ValueType::Str]
        );
        let empty = Some(Value::Str(String::new()));
        let defaults: Vec<Option<Value>> =
            editors().iter().map(|e| e.default_value()).collect();
        assert_eq!(defaults, vec![None, empty.clone(), empty]);
    }

    #[test]
    fn test_title_falls_back_to_name() {
        let plain = EditableDate::new("Published");
        assert_eq!(plain.meta().title(), "Published");
        let titled = EditableDate::new("Published").titled("Published on", 5);
        assert_eq!(titled.meta().title(), "Published on");
        assert_eq!(titled.meta().sort_order, 5);
    }

    #[test]
    fn test_add_editor_always_attaches_a_new_control() {
        let editor: Editor = EditableUrl::new("Link").into();
        let mut container = Container::new("content", "/");
        editor.add_editor(&mut container);
        editor.add_editor(&mut container);
        assert_eq!(container.len(), 2);
    }

    #[test]
    fn test_mismatched_control_is_rejected() {
        let mut item = ContentItem::new("StartPage", "Home");
        let date: Editor = EditableDate::new("Published").into();
        let url: Editor = EditableUrl::new("Published").into();

        let mut control = Control::UrlSelector(UrlSelector::new("Published"));
        let mut context =
            EditContext::new(&mut item, "Published", &mut control);
        let err = date.update_item(&mut context).unwrap_err();
        assert!(matches!(
            err,
            DetailError::TypeMismatch { expected: "DatePicker", found: "UrlSelector", .. }
        ));

        let mut control = Control::DatePicker(DatePicker::new("Published"));
        let mut context =
            EditContext::new(&mut item, "Published", &mut control);
        assert!(url.update_editor(&mut context).is_err());
    }

    #[test]
    fn test_raw_writer_for_missing_value_writes_nothing() {
        let item = ContentItem::new("StartPage", "Home");
        let mut out = String::new();
        for editor in editors() {
            let writer = editor.writing_displayable().unwrap();
            writer.write(&item, editor.name(), &mut out).unwrap();
        }
        assert_eq!(out, "");
    }
}
