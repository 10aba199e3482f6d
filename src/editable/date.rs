use super::{
    write_raw, Displayable, EditContext, Editable, EditableMeta,
    WritingDisplayable,
};
use crate::{
    controls::{Container, Control, DatePicker, Literal},
    errors::DetailError,
    models::ContentItem,
};
use chrono::NaiveDateTime;
use std::fmt;

/// A paired date and time picker. Hiding either box only hides it; the
/// picker keeps whatever value it holds.
#[derive(Clone, Debug)]
pub struct EditableDate {
    meta: EditableMeta,
    pub show_date: bool,
    pub show_time: bool,
}

impl EditableDate {
    pub const DEFAULT_SORT_ORDER: i32 = 20;

    pub fn new(name: &str) -> Self {
        Self {
            meta: EditableMeta::new(name, Self::DEFAULT_SORT_ORDER),
            show_date: true,
            show_time: true,
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

    pub fn show_date(mut self, show: bool) -> Self {
        self.show_date = show;
        self
    }

    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }
}

impl Editable for EditableDate {
    fn meta(&self) -> &EditableMeta {
        &self.meta
    }

    fn add_editor<'c>(&self, container: &'c mut Container) -> &'c mut Control {
        let mut picker = DatePicker::new(self.name());
        picker.date_box_visible = self.show_date;
        picker.time_box_visible = self.show_time;
        container.add(Control::DatePicker(picker))
    }

    fn update_editor(
        &self,
        context: &mut EditContext<'_>,
    ) -> Result<(), DetailError> {
        let value = context.get_value::<NaiveDateTime>()?;
        context.date_picker()?.selected_date = value;
        Ok(())
    }

    fn update_item(
        &self,
        context: &mut EditContext<'_>,
    ) -> Result<(), DetailError> {
        let selected = context.date_picker()?.selected_date;
        context.set_value(selected);
        Ok(())
    }
}

impl Displayable for EditableDate {
    fn add_to<'c>(
        &self,
        item: &ContentItem,
        detail_name: &str,
        container: &'c mut Container,
    ) -> Result<Option<&'c mut Control>, DetailError> {
        let Some(date) = item.details.get::<NaiveDateTime>(detail_name)? else {
            return Ok(None);
        };
        Ok(Some(container.add(Control::Literal(Literal {
            id: detail_name.to_string(),
            text: date.to_string(),
        }))))
    }
}

impl WritingDisplayable for EditableDate {
    fn write(
        &self,
        item: &ContentItem,
        property_name: &str,
        writer: &mut dyn fmt::Write,
    ) -> fmt::Result {
        write_raw(item, property_name, writer)
    }
}
