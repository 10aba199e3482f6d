//! Read-only output of an item's details, through the editables that
//! support it. No editor controls are built here.
use super::{
    components::Component,
    controls::Container,
    definitions::ItemDefinition,
    editable::Editable,
    errors::DetailError,
    models::ContentItem,
};
use std::fmt;

pub struct DisplayRow {
    pub name: String,
    pub title: String,
    /// `None` when nothing is stored.
    pub html: Option<String>,
}

pub fn display_rows(
    item: &ContentItem,
    definition: &ItemDefinition,
    app_path: &str,
) -> Result<Vec<DisplayRow>, DetailError> {
    let mut container = Container::new("display", app_path);
    let mut rows = Vec::new();
    for editable in definition.editables() {
        let Some(displayable) = editable.displayable() else {
            continue;
        };
        let html = displayable
            .add_to(item, editable.name(), &mut container)?
            .map(|control| control.render());
        rows.push(DisplayRow {
            name: editable.name().to_string(),
            title: editable.meta().title().to_string(),
            html,
        });
    }
    Ok(rows)
}

/// Write the raw stored value of one detail.
pub fn write_detail(
    item: &ContentItem,
    definition: &ItemDefinition,
    name: &str,
    writer: &mut dyn fmt::Write,
) -> Result<(), DetailError> {
    let writing = definition
        .editable(name)?
        .writing_displayable()
        .ok_or_else(|| DetailError::UnknownEditable(name.to_string()))?;
    writing.write(item, name, writer)?;
    Ok(())
}
