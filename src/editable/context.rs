use crate::{
    controls::{Control, DatePicker, TextBox, UrlSelector},
    details::DetailValue,
    errors::DetailError,
    models::ContentItem,
};

/// Binds one control to one property of one item for the length of an
/// editing operation. The item is borrowed, not owned.
pub struct EditContext<'a> {
    item: &'a mut ContentItem,
    name: &'a str,
    control: &'a mut Control,
}

impl<'a> EditContext<'a> {
    pub fn new(
        item: &'a mut ContentItem,
        name: &'a str,
        control: &'a mut Control,
    ) -> Self {
        Self {
            item,
            name,
            control,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn item(&self) -> &ContentItem {
        &*self.item
    }

    pub fn control(&self) -> &Control {
        &*self.control
    }

    pub fn get_value<T: DetailValue>(&self) -> Result<Option<T>, DetailError> {
        self.item.details.get(self.name)
    }

    /// `None` clears the detail.
    pub fn set_value<T: DetailValue + PartialEq>(
        &mut self,
        value: Option<T>,
    ) -> bool {
        self.store(value, None)
    }

    /// Clears the detail when `value` equals `default`.
    pub fn set_value_or_default<T: DetailValue + PartialEq>(
        &mut self,
        value: Option<T>,
        default: T,
    ) -> bool {
        self.store(value, Some(default))
    }

    fn store<T: DetailValue + PartialEq>(
        &mut self,
        value: Option<T>,
        default: Option<T>,
    ) -> bool {
        let stored = self.item.details.set(self.name, value, default);
        if !stored {
            tracing::debug!(
                item = %self.item.id,
                detail = self.name,
                "default value, detail elided"
            );
        }
        stored
    }

    fn mismatch(
        name: &str,
        expected: &'static str,
        found: &'static str,
    ) -> DetailError {
        DetailError::TypeMismatch {
            key: name.to_string(),
            expected,
            found,
        }
    }

    pub fn date_picker(&mut self) -> Result<&mut DatePicker, DetailError> {
        let found = self.control.kind();
        match &mut *self.control {
            Control::DatePicker(picker) => Ok(picker),
            _ => Err(Self::mismatch(self.name, "DatePicker", found)),
        }
    }

    pub fn url_selector(&mut self) -> Result<&mut UrlSelector, DetailError> {
        let found = self.control.kind();
        match &mut *self.control {
            Control::UrlSelector(selector) => Ok(selector),
            _ => Err(Self::mismatch(self.name, "UrlSelector", found)),
        }
    }

    pub fn text_box(&mut self) -> Result<&mut TextBox, DetailError> {
        let found = self.control.kind();
        match &mut *self.control {
            Control::TextBox(text) => Ok(text),
            _ => Err(Self::mismatch(self.name, "TextBox", found)),
        }
    }
}
