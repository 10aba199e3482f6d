//! The editing pipeline for one item: build an editor per editable, grouped
//! into the definition's containers, then move values between the controls
//! and the item's details.
use super::{
    controls::{Container, Control, FormValues},
    definitions::ItemDefinition,
    editable::{EditContext, Editable, Editor},
    errors::DetailError,
    models::ContentItem,
};
use tracing::debug;

pub struct ItemEditor<'d> {
    definition: &'d ItemDefinition,
    containers: Vec<Container>,
}

impl<'d> ItemEditor<'d> {
    /// Attaches one fresh control per editable. Nothing is read from the
    /// item yet.
    pub fn build(definition: &'d ItemDefinition, app_path: &str) -> Self {
        let mut containers: Vec<Container> = definition
            .container_names()
            .into_iter()
            .map(|name| Container::new(name, app_path))
            .collect();
        for editable in definition.editables() {
            let name = definition.container_of(editable);
            if let Some(container) =
                containers.iter_mut().find(|c| c.name == name)
            {
                editable.add_editor(container);
            }
        }
        debug!(
            discriminator = %definition.discriminator,
            containers = containers.len(),
            "built editors"
        );
        Self {
            definition,
            containers,
        }
    }

    pub fn definition(&self) -> &'d ItemDefinition {
        self.definition
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    fn control_for(
        &mut self,
        editable: &Editor,
    ) -> Result<&mut Control, DetailError> {
        let container_name = self.definition.container_of(editable);
        self.containers
            .iter_mut()
            .find(|c| c.name == container_name)
            .and_then(|c| c.find_mut(editable.name()))
            .ok_or_else(|| {
                DetailError::UnknownEditable(editable.name().to_string())
            })
    }

    /// Stored details into controls.
    pub fn load(&mut self, item: &mut ContentItem) -> Result<(), DetailError> {
        let definition = self.definition;
        for editable in definition.editables() {
            let control = self.control_for(editable)?;
            let mut context = EditContext::new(item, editable.name(), control);
            editable.update_editor(&mut context)?;
        }
        Ok(())
    }

    /// Posted form values into controls.
    pub fn bind_form(&mut self, form: &FormValues) -> Result<(), DetailError> {
        let definition = self.definition;
        for editable in definition.editables() {
            self.control_for(editable)?.bind_form(form)?;
        }
        Ok(())
    }

    /// Controls into stored details. Stops at the first failure, leaving
    /// the item partly updated; callers save the item only on success.
    pub fn save(&mut self, item: &mut ContentItem) -> Result<(), DetailError> {
        let definition = self.definition;
        for editable in definition.editables() {
            let control = self.control_for(editable)?;
            let mut context = EditContext::new(item, editable.name(), control);
            editable.update_item(&mut context)?;
        }
        debug!(
            item = %item.id,
            stored = ?item.details.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            "saved details"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{definitions::start_page, details::Value};
    use chrono::NaiveDate;

    fn form(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_groups_controls_by_container() {
        let definition = start_page().unwrap();
        let editor = ItemEditor::build(&definition, "/");
        let layout: Vec<(&str, Vec<&str>)> = editor
            .containers()
            .iter()
            .map(|c| {
                (
                    c.name.as_str(),
                    c.controls().iter().map(|c| c.id()).collect(),
                )
            })
            .collect();
        assert_eq!(
            layout,
            vec![
                ("content", vec!["Published", "PageOrDocumentUrl", "TopImage"]),
                ("site", vec!["FooterText"]),
            ]
        );
    }

    #[test]
    fn test_form_to_item() {
        let definition = start_page().unwrap();
        let mut item = ContentItem::new("StartPage", "Home");
        let mut editor = ItemEditor::build(&definition, "/site");
        editor
            .bind_form(&form(&[
                ("Published.date", "2024-02-29"),
                ("Published.time", "09:15"),
                ("PageOrDocumentUrl", "/site/about"),
                ("TopImage", "/upload/top.png"),
                ("FooterText", ""),
            ]))
            .unwrap();
        editor.save(&mut item).unwrap();

        assert_eq!(
            item.detail("Published"),
            Some(&Value::DateTime(
                NaiveDate::from_ymd_opt(2024, 2, 29)
                    .unwrap()
                    .and_hms_opt(9, 15, 0)
                    .unwrap()
            ))
        );
        assert_eq!(
            item.detail("PageOrDocumentUrl"),
            Some(&Value::Str("~/about".to_string()))
        );
        assert_eq!(
            item.detail("TopImage"),
            Some(&Value::Str("/upload/top.png".to_string()))
        );
        assert!(item.detail("FooterText").is_none());
    }

    #[test]
    fn test_save_then_load_on_fresh_editor() {
        let definition = start_page().unwrap();
        let mut item = ContentItem::new("StartPage", "Home");
        let mut editor = ItemEditor::build(&definition, "/");
        editor
            .bind_form(&form(&[
                ("PageOrDocumentUrl", "~/contact"),
                ("FooterText", "Bye"),
            ]))
            .unwrap();
        editor.save(&mut item).unwrap();

        let mut fresh = ItemEditor::build(&definition, "/");
        fresh.load(&mut item).unwrap();
        let content = &fresh.containers()[0];
        match content.find("PageOrDocumentUrl") {
            Some(Control::UrlSelector(s)) => {
                assert_eq!(s.url.as_deref(), Some("~/contact"))
            }
            other => panic!("unexpected control {other:?}"),
        }
        match content.find("Published") {
            Some(Control::DatePicker(p)) => assert_eq!(p.selected_date, None),
            other => panic!("unexpected control {other:?}"),
        }
        match fresh.containers()[1].find("FooterText") {
            Some(Control::TextBox(t)) => assert_eq!(t.text, "Bye"),
            other => panic!("unexpected control {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_detail_is_a_type_mismatch() {
        let definition = start_page().unwrap();
        let mut item = ContentItem::new("StartPage", "Home");
        item.details.set("Published", Some(42i64), None);
        let mut editor = ItemEditor::build(&definition, "/");
        assert!(matches!(
            editor.load(&mut item),
            Err(DetailError::TypeMismatch { ref key, .. }) if key == "Published"
        ));
    }

    #[test]
    fn test_bad_form_value_is_reported() {
        let definition = start_page().unwrap();
        let mut editor = ItemEditor::build(&definition, "/");
        assert!(matches!(
            editor.bind_form(&form(&[("Published.date", "29/02/2024")])),
            Err(DetailError::InvalidForm { .. })
        ));
    }
}
