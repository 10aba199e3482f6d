use super::{
    write_raw, Displayable, EditContext, Editable, EditableMeta,
    WritingDisplayable,
};
use crate::{
    controls::{Container, Control, Literal, TextBox},
    errors::DetailError,
    models::ContentItem,
};
use std::fmt;

/// Free text. An empty box is the default and is never stored.
#[derive(Clone, Debug)]
pub struct EditableText {
    meta: EditableMeta,
    pub multi_line: bool,
    pub rows: u16,
}

impl EditableText {
    pub const DEFAULT_SORT_ORDER: i32 = 0;

    pub fn new(name: &str) -> Self {
        Self {
            meta: EditableMeta::new(name, Self::DEFAULT_SORT_ORDER),
            multi_line: false,
            rows: 1,
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

    pub fn multi_line(mut self, rows: u16) -> Self {
        self.multi_line = true;
        self.rows = rows.max(1);
        self
    }
}

impl Editable for EditableText {
    fn meta(&self) -> &EditableMeta {
        &self.meta
    }

    fn add_editor<'c>(&self, container: &'c mut Container) -> &'c mut Control {
        let mut text = TextBox::new(self.name());
        text.multi_line = self.multi_line;
        text.rows = self.rows;
        container.add(Control::TextBox(text))
    }

    fn update_editor(
        &self,
        context: &mut EditContext<'_>,
    ) -> Result<(), DetailError> {
        let stored = context.get_value::<String>()?.unwrap_or_default();
        context.text_box()?.text = stored;
        Ok(())
    }

    fn update_item(
        &self,
        context: &mut EditContext<'_>,
    ) -> Result<(), DetailError> {
        let text = context.text_box()?.text.clone();
        context.set_value_or_default(Some(text), String::new());
        Ok(())
    }
}

impl Displayable for EditableText {
    fn add_to<'c>(
        &self,
        item: &ContentItem,
        detail_name: &str,
        container: &'c mut Container,
    ) -> Result<Option<&'c mut Control>, DetailError> {
        let Some(text) = item.details.get::<String>(detail_name)? else {
            return Ok(None);
        };
        Ok(Some(container.add(Control::Literal(Literal {
            id: detail_name.to_string(),
            text,
        }))))
    }
}

impl WritingDisplayable for EditableText {
    fn write(
        &self,
        item: &ContentItem,
        property_name: &str,
        writer: &mut dyn fmt::Write,
    ) -> fmt::Result {
        write_raw(item, property_name, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_elided_but_loads_as_empty() {
        let editable = EditableText::new("FooterText").multi_line(4);
        let mut item = ContentItem::new("StartPage", "Home");
        item.details.set("FooterText", Some(String::from("old")), None);

        let mut container = Container::new("site", "/");
        let control = editable.add_editor(&mut container);
        let mut context = EditContext::new(&mut item, "FooterText", control);
        context.text_box().unwrap().text.clear();
        editable.update_item(&mut context).unwrap();
        assert!(!context.item().details.contains("FooterText"));

        let control = editable.add_editor(&mut container);
        let mut context = EditContext::new(&mut item, "FooterText", control);
        editable.update_editor(&mut context).unwrap();
        assert_eq!(context.text_box().unwrap().text, "");
        assert!(context.text_box().unwrap().multi_line);
        assert_eq!(context.text_box().unwrap().rows, 4);
    }

    #[test]
    fn test_text_round_trips() {
        let editable = EditableText::new("FooterText");
        let mut item = ContentItem::new("StartPage", "Home");
        let mut container = Container::new("site", "/");

        let control = editable.add_editor(&mut container);
        let mut context = EditContext::new(&mut item, "FooterText", control);
        context.text_box().unwrap().text = "© 2024".to_string();
        editable.update_item(&mut context).unwrap();

        let control = editable.add_editor(&mut container);
        let mut context = EditContext::new(&mut item, "FooterText", control);
        editable.update_editor(&mut context).unwrap();
        assert_eq!(context.text_box().unwrap().text, "© 2024");
    }
}
