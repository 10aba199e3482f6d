//! The UI controls editables bind to. Each control renders itself as an HTML
//! fragment and knows how to pick its own value back out of a posted form;
//! the editables only touch the typed accessors.
use super::{components::Component, errors::DetailError, url};
use ammonia::clean_text;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type FormValues = HashMap<String, String>;

/// Which kinds of target the url selector can pick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlSelectorMode {
    Items,
    Files,
    All,
}

impl UrlSelectorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Files => "files",
            Self::All => "all",
        }
    }

    pub fn includes(&self, other: UrlSelectorMode) -> bool {
        *self == UrlSelectorMode::All || *self == other
    }
}

#[derive(Clone, Debug)]
pub struct DatePicker {
    pub id: String,
    pub date_box_visible: bool,
    pub time_box_visible: bool,
    pub selected_date: Option<NaiveDateTime>,
}

#[derive(Clone, Debug)]
pub struct UrlSelector {
    pub id: String,
    pub available_modes: UrlSelectorMode,
    pub default_mode: UrlSelectorMode,
    /// Used to resolve an app-relative url into something a browser can
    /// follow; the stored value itself is never rewritten by the control.
    pub app_path: String,
    pub url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct TextBox {
    pub id: String,
    pub multi_line: bool,
    pub rows: u16,
    pub text: String,
}

/// Read-only output, produced by the display pipeline.
#[derive(Clone, Debug)]
pub struct Literal {
    pub id: String,
    pub text: String,
}

#[derive(Clone, Debug)]
pub enum Control {
    DatePicker(DatePicker),
    UrlSelector(UrlSelector),
    TextBox(TextBox),
    Literal(Literal),
}

impl Control {
    pub fn id(&self) -> &str {
        match self {
            Self::DatePicker(c) => &c.id,
            Self::UrlSelector(c) => &c.id,
            Self::TextBox(c) => &c.id,
            Self::Literal(c) => &c.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::DatePicker(_) => "DatePicker",
            Self::UrlSelector(_) => "UrlSelector",
            Self::TextBox(_) => "TextBox",
            Self::Literal(_) => "Literal",
        }
    }

    /// Pull this control's value out of a posted form. A field that was not
    /// posted at all reads as empty.
    pub fn bind_form(&mut self, form: &FormValues) -> Result<(), DetailError> {
        match self {
            Self::DatePicker(c) => c.bind_form(form),
            Self::UrlSelector(c) => {
                c.url = posted(form, &c.id).map(str::to_string);
                Ok(())
            }
            Self::TextBox(c) => {
                c.text = form
                    .get(&c.id)
                    .map(|t| t.replace("\r\n", "\n"))
                    .unwrap_or_default();
                Ok(())
            }
            Self::Literal(_) => Ok(()),
        }
    }
}

fn posted<'a>(form: &'a FormValues, field: &str) -> Option<&'a str> {
    form.get(field).map(|v| v.trim()).filter(|v| !v.is_empty())
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

impl DatePicker {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            date_box_visible: true,
            time_box_visible: true,
            selected_date: None,
        }
    }

    pub fn date_field(&self) -> String {
        format!("{}.date", self.id)
    }

    pub fn time_field(&self) -> String {
        format!("{}.time", self.id)
    }

    /// An empty date box means no selection; a date without a time means
    /// midnight.
    fn bind_form(&mut self, form: &FormValues) -> Result<(), DetailError> {
        let date_field = self.date_field();
        let Some(date) = posted(form, &date_field) else {
            self.selected_date = None;
            return Ok(());
        };
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(
            |_| DetailError::InvalidForm {
                field: date_field.clone(),
                value: date.to_string(),
            },
        )?;
        let time_field = self.time_field();
        let time = match posted(form, &time_field) {
            None => NaiveTime::MIN,
            Some(raw) => TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
                .ok_or_else(|| DetailError::InvalidForm {
                    field: time_field.clone(),
                    value: raw.to_string(),
                })?,
        };
        self.selected_date = Some(date.and_time(time));
        Ok(())
    }
}

impl UrlSelector {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            available_modes: UrlSelectorMode::All,
            default_mode: UrlSelectorMode::Items,
            app_path: String::from("/"),
            url: None,
        }
    }

    /// Where a browser should go for the current url.
    pub fn resolved_url(&self) -> Option<String> {
        self.url
            .as_deref()
            .map(|u| url::to_absolute(u, &self.app_path))
    }
}

impl TextBox {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            multi_line: false,
            rows: 1,
            text: String::new(),
        }
    }
}

impl Component for DatePicker {
    fn render(&self) -> String {
        let id = clean_text(&self.id);
        let date_name = clean_text(&self.date_field());
        let time_name = clean_text(&self.time_field());
        let date_value = self
            .selected_date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        let time_value = self
            .selected_date
            .map(|d| d.format(TIME_FORMATS[0]).to_string())
            .unwrap_or_default();
        // Hidden boxes still post their value so it survives a save.
        let date_type = if self.date_box_visible { "date" } else { "hidden" };
        let time_type = if self.time_box_visible { "time" } else { "hidden" };
        format!(
            r#"
                <div class="flex gap-2" id="{id}">
                    <input
                        class="rounded text-sm"
                        type="{date_type}"
                        name="{date_name}"
                        value="{date_value}"
                    />
                    <input
                        class="rounded text-sm"
                        type="{time_type}"
                        step="1"
                        name="{time_name}"
                        value="{time_value}"
                    />
                </div>
            "#
        )
    }
}

impl Component for UrlSelector {
    fn render(&self) -> String {
        let id = clean_text(&self.id);
        let available = self.available_modes.as_str();
        let opening = self.default_mode.as_str();
        let modes: String = [UrlSelectorMode::Items, UrlSelectorMode::Files]
            .into_iter()
            .filter(|mode| self.available_modes.includes(*mode))
            .map(|mode| {
                let selected = if mode == self.default_mode {
                    " selected"
                } else {
                    ""
                };
                format!(
                    r#"<option value="{0}"{selected}>{0}</option>"#,
                    mode.as_str()
                )
            })
            .collect();
        let value = clean_text(self.url.as_deref().unwrap_or(""));
        let link = match self.resolved_url() {
            Some(href) => format!(
                r#"<a class="text-sm underline" href="{}">open</a>"#,
                clean_text(&href)
            ),
            None => "".to_string(),
        };
        format!(
            r#"
                <div
                    class="flex gap-2 items-center"
                    data-available-modes="{available}"
                    data-opening-mode="{opening}"
                >
                    <select class="rounded text-sm" aria-label="pick from">
                        {modes}
                    </select>
                    <input
                        class="rounded text-sm w-64"
                        type="text"
                        id="{id}"
                        name="{id}"
                        value="{value}"
                    />
                    {link}
                </div>
            "#
        )
    }
}

impl Component for TextBox {
    fn render(&self) -> String {
        let id = clean_text(&self.id);
        let text = clean_text(&self.text);
        if self.multi_line {
            let rows = self.rows;
            format!(
                r#"
                    <textarea
                        class="rounded text-sm w-96"
                        id="{id}"
                        name="{id}"
                        rows="{rows}"
                    >{text}</textarea>
                "#
            )
        } else {
            format!(
                r#"
                    <input
                        class="rounded text-sm w-96"
                        type="text"
                        id="{id}"
                        name="{id}"
                        value="{text}"
                    />
                "#
            )
        }
    }
}

impl Component for Literal {
    fn render(&self) -> String {
        format!(r#"<span>{}</span>"#, clean_text(&self.text))
    }
}

impl Component for Control {
    fn render(&self) -> String {
        match self {
            Self::DatePicker(c) => c.render(),
            Self::UrlSelector(c) => c.render(),
            Self::TextBox(c) => c.render(),
            Self::Literal(c) => c.render(),
        }
    }
}

/// A layout slot controls are attached to. Editables add to it; the hosting
/// page decides how to lay it out.
#[derive(Clone, Debug)]
pub struct Container {
    pub name: String,
    pub app_path: String,
    controls: Vec<Control>,
}

impl Container {
    pub fn new(name: &str, app_path: &str) -> Self {
        Self {
            name: name.to_string(),
            app_path: app_path.to_string(),
            controls: Vec::new(),
        }
    }

    /// Attach a control, handing back the attached instance.
    pub fn add(&mut self, control: Control) -> &mut Control {
        self.controls.push(control);
        let last = self.controls.len() - 1;
        &mut self.controls[last]
    }

    pub fn remove(&mut self, id: &str) -> Option<Control> {
        let idx = self.controls.iter().position(|c| c.id() == id)?;
        Some(self.controls.remove(idx))
    }

    pub fn find(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id() == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|c| c.id() == id)
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}
