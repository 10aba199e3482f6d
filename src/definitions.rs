//! Content-type definitions: which editables a kind of item has. The
//! registry is built once at start-up and only read afterwards.
use super::{
    config::DEFAULT_CONTAINER,
    controls::UrlSelectorMode,
    details::Details,
    editable::{
        Editable, EditableDate, EditableText, EditableUrl, Editor,
        UrlRelativityMode,
    },
    errors::DetailError,
};
use std::collections::{BTreeMap, HashSet};

#[derive(Clone, Debug)]
pub struct ItemDefinition {
    pub discriminator: String,
    pub title: String,
    editables: Vec<Editor>,
}

impl ItemDefinition {
    pub fn builder(discriminator: &str) -> DefinitionBuilder {
        DefinitionBuilder {
            discriminator: discriminator.to_string(),
            title: None,
            editables: Vec::new(),
        }
    }

    /// Sorted by sort order; ties keep registration order.
    pub fn editables(&self) -> &[Editor] {
        &self.editables
    }

    pub fn editable(&self, name: &str) -> Result<&Editor, DetailError> {
        self.editables
            .iter()
            .find(|e| e.name() == name)
            .ok_or_else(|| DetailError::UnknownEditable(name.to_string()))
    }

    pub fn container_of<'a>(&self, editable: &'a Editor) -> &'a str {
        editable
            .meta()
            .container_name
            .as_deref()
            .unwrap_or(DEFAULT_CONTAINER)
    }

    /// Bring details written elsewhere in line with this definition. Every
    /// key must belong to an editable and hold the variant it stores; values
    /// equal to an editable's default are dropped. Nothing is changed unless
    /// every detail passes. Returns the dropped keys.
    pub fn normalize(
        &self,
        details: &mut Details,
    ) -> Result<Vec<String>, DetailError> {
        let mut elided = Vec::new();
        for (key, value) in details.iter() {
            let editable = self.editable(key)?;
            let expected = editable.value_type();
            if value.value_type() != expected {
                return Err(DetailError::TypeMismatch {
                    key: key.clone(),
                    expected: expected.name(),
                    found: value.value_type().name(),
                });
            }
            if editable.default_value().as_ref() == Some(value) {
                elided.push(key.clone());
            }
        }
        for key in &elided {
            details.remove(key);
        }
        Ok(elided)
    }

    /// Container names in order of first appearance.
    pub fn container_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for editable in &self.editables {
            let name = self.container_of(editable);
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

pub struct DefinitionBuilder {
    discriminator: String,
    title: Option<String>,
    editables: Vec<Editor>,
}

impl DefinitionBuilder {
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn editable(mut self, editable: impl Into<Editor>) -> Self {
        self.editables.push(editable.into());
        self
    }

    pub fn build(mut self) -> Result<ItemDefinition, DetailError> {
        {
            let mut seen = HashSet::new();
            for editable in &self.editables {
                if !seen.insert(editable.name()) {
                    return Err(DetailError::DuplicateEditable(
                        editable.name().to_string(),
                    ));
                }
            }
        }
        self.editables.sort_by_key(|e| e.meta().sort_order);
        Ok(ItemDefinition {
            title: self.title.unwrap_or_else(|| self.discriminator.clone()),
            discriminator: self.discriminator,
            editables: self.editables,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct DefinitionRegistry {
    definitions: BTreeMap<String, ItemDefinition>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering a discriminator again replaces the earlier definition.
    pub fn register(&mut self, definition: ItemDefinition) {
        tracing::debug!(
            discriminator = %definition.discriminator,
            editables = definition.editables.len(),
            "registered definition"
        );
        self.definitions
            .insert(definition.discriminator.clone(), definition);
    }

    pub fn get(
        &self,
        discriminator: &str,
    ) -> Result<&ItemDefinition, DetailError> {
        self.definitions.get(discriminator).ok_or_else(|| {
            DetailError::UnknownDefinition(discriminator.to_string())
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.definitions.values()
    }
}

/// The start page: a site's root, with a publish date, a featured link and
/// some site-wide text.
pub fn start_page() -> Result<ItemDefinition, DetailError> {
    ItemDefinition::builder("StartPage")
        .title("Start Page")
        .editable(
            EditableDate::new("Published")
                .titled("Published", 10)
                .in_container("content"),
        )
        .editable(
            EditableUrl::new("PageOrDocumentUrl")
                .titled("Url to page or document", 50)
                .in_container("content")
                .relative_to(UrlRelativityMode::Application),
        )
        .editable(
            EditableUrl::new("TopImage")
                .titled("Top Image", 88)
                .in_container("content")
                .available_modes(UrlSelectorMode::Files)
                .opening_mode(UrlSelectorMode::Files),
        )
        .editable(
            EditableText::new("FooterText")
                .titled("Footer Text", 80)
                .in_container("site")
                .multi_line(4),
        )
        .build()
}

/// A dated news entry.
pub fn news_page() -> Result<ItemDefinition, DetailError> {
    ItemDefinition::builder("NewsPage")
        .title("News")
        .editable(EditableText::new("Introduction").titled("Introduction", 10))
        .editable(
            EditableDate::new("EventDate")
                .titled("Event date", 20)
                .show_time(false),
        )
        .editable(EditableUrl::new("ReadMore").titled("Read more", 30))
        .build()
}

pub fn default_registry() -> Result<DefinitionRegistry, DetailError> {
    let mut registry = DefinitionRegistry::new();
    registry.register(start_page()?);
    registry.register(news_page()?);
    Ok(registry)
}
