use super::{
    write_raw, Displayable, EditContext, Editable, EditableMeta,
    RelativityTransformer, WritingDisplayable,
};
use crate::{
    controls::{Container, Control, Literal, UrlSelector, UrlSelectorMode},
    errors::DetailError,
    models::ContentItem,
    relativity::RelativityMode,
    url,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a picked url is stored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlRelativityMode {
    /// Store exactly what was picked.
    #[default]
    Absolute,
    /// Store urls under the application root as `~/...`.
    Application,
}

/// Picks a url to either a content item or a file.
#[derive(Clone, Debug)]
pub struct EditableUrl {
    meta: EditableMeta,
    pub available_modes: UrlSelectorMode,
    pub opening_mode: UrlSelectorMode,
    pub relative_to: UrlRelativityMode,
    pub relative_when: RelativityMode,
}

impl EditableUrl {
    pub const DEFAULT_SORT_ORDER: i32 = 30;

    pub fn new(name: &str) -> Self {
        Self {
            meta: EditableMeta::new(name, Self::DEFAULT_SORT_ORDER),
            available_modes: UrlSelectorMode::All,
            opening_mode: UrlSelectorMode::Items,
            relative_to: UrlRelativityMode::default(),
            relative_when: RelativityMode::default(),
        }
    }

    pub fn titled(mut self, title: &str, sort_order: i32) -> Self {
        self.meta.title = Some(title.to_string());
        self.meta.sort_order = sort_order;
        self
    }

    pub fn in_container(mut self, container_name: &str) -> Self {
        self.meta.container_name = Some(container_name.to_string());
        self
    }

    pub fn available_modes(mut self, modes: UrlSelectorMode) -> Self {
        self.available_modes = modes;
        self
    }

    pub fn opening_mode(mut self, mode: UrlSelectorMode) -> Self {
        self.opening_mode = mode;
        self
    }

    pub fn relative_to(mut self, mode: UrlRelativityMode) -> Self {
        self.relative_to = mode;
        self
    }

    pub fn relative_when(mut self, mode: RelativityMode) -> Self {
        self.relative_when = mode;
        self
    }
}

impl Editable for EditableUrl {
    fn meta(&self) -> &EditableMeta {
        &self.meta
    }

    fn add_editor<'c>(&self, container: &'c mut Container) -> &'c mut Control {
        let mut selector = UrlSelector::new(self.name());
        selector.available_modes = self.available_modes;
        selector.default_mode = self.opening_mode;
        selector.app_path = container.app_path.clone();
        container.add(Control::UrlSelector(selector))
    }

    /// The stored string goes into the selector as-is.
    fn update_editor(
        &self,
        context: &mut EditContext<'_>,
    ) -> Result<(), DetailError> {
        let stored = context.get_value::<String>()?;
        context.url_selector()?.url = stored;
        Ok(())
    }

    /// The storage policy is applied on every save, whatever shape the
    /// picked url has. Under `Absolute` a relative url is kept relative.
    fn update_item(
        &self,
        context: &mut EditContext<'_>,
    ) -> Result<(), DetailError> {
        let selector = context.url_selector()?;
        let value = selector.url.as_deref().map(|picked| {
            match self.relative_to {
                UrlRelativityMode::Absolute => picked.to_string(),
                UrlRelativityMode::Application => {
                    url::to_relative(picked, &selector.app_path)
                }
            }
        });
        context.set_value_or_default(value, String::new());
        Ok(())
    }
}

impl RelativityTransformer for EditableUrl {
    fn relative_when(&self) -> RelativityMode {
        self.relative_when
    }

    fn rebase(
        &self,
        current_path: &str,
        from_app_path: &str,
        to_app_path: &str,
    ) -> Result<String, DetailError> {
        url::rebase(current_path, from_app_path, to_app_path)
    }
}

impl Displayable for EditableUrl {
    fn add_to<'c>(
        &self,
        item: &ContentItem,
        detail_name: &str,
        container: &'c mut Container,
    ) -> Result<Option<&'c mut Control>, DetailError> {
        let Some(stored) = item.details.get::<String>(detail_name)? else {
            return Ok(None);
        };
        Ok(Some(container.add(Control::Literal(Literal {
            id: detail_name.to_string(),
            text: stored,
        }))))
    }
}

impl WritingDisplayable for EditableUrl {
    fn write(
        &self,
        item: &ContentItem,
        property_name: &str,
        writer: &mut dyn fmt::Write,
    ) -> fmt::Result {
        write_raw(item, property_name, writer)
    }
}
