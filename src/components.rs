// In many cases, we need to do a let binding to satisfy the borrow checker
// and for some reason, clippy identifies those as unnecessary. Maybe there
// are and clippy knows more than me, maybe not.
#![allow(clippy::let_and_return)]

use super::{
    definitions::DefinitionRegistry, display::DisplayRow, edit::ItemEditor,
    editable::Editable, models::ContentItem, routes::Route,
};
use ammonia::clean_text;

pub trait Component {
    /// Render the component to a HTML string. By convention, the
    /// implementation should sanitize all string properties at render-time
    fn render(&self) -> String;
}

pub struct Page<'a> {
    pub title: &'a str,
    pub children: Box<dyn Component + 'a>,
}

impl Component for Page<'_> {
    fn render(&self) -> String {
        format!(
            r#"
            <html>
                <head>
                    <meta name="viewport" content="width=device-width, initial-scale=1.0"></meta>
                    <title>{title}</title>
                    <script src="https://cdn.tailwindcss.com"></script>
                </head>
                <body hx-boost="true" class="dark:bg-indigo-1000 dark:text-white mt-2 ml-2 sm:mt-8 sm:ml-8">
                    {body_html}
                    <script src="https://unpkg.com/htmx.org@1.9.6"></script>
                    <script>
                        htmx.config.defaultSwapStyle = "outerHTML"
                    </script>
                </body>
            </html>
            "#,
            title = clean_text(self.title),
            body_html = self.children.render()
        )
    }
}

pub struct Home<'a> {
    pub items: &'a [ContentItem],
    pub definitions: &'a DefinitionRegistry,
    pub next_page: Option<usize>,
}

impl Component for Home<'_> {
    fn render(&self) -> String {
        let items = ItemList {
            items: self.items,
            next_page: self.next_page,
        }
        .render();
        let new_item = NewItemForm {
            definitions: self.definitions,
        }
        .render();
        let rebase = RebaseForm {}.render();
        format!(
            r#"
            <main class="flex flex-col gap-4 max-w-2xl">
                <h1 class="text-xl">Content</h1>
                {items}
                {new_item}
                {rebase}
            </main>
            "#
        )
    }
}

pub struct ItemList<'a> {
    pub items: &'a [ContentItem],
    pub next_page: Option<usize>,
}

impl Component for ItemList<'_> {
    fn render(&self) -> String {
        if self.items.is_empty() {
            return r#"<p id="item-list">Nothing here yet.</p>"#.to_string();
        }
        let items = self
            .items
            .iter()
            .map(|item| {
                let href = Route::Item(Some(item.id));
                let edit = Route::ItemEdit(Some(item.id));
                let title = clean_text(&item.title);
                let kind = clean_text(&item.discriminator);
                format!(
                    r#"
                    <li class="flex gap-2 items-center">
                        <a class="underline" href="{href}">{title}</a>
                        <span class="text-sm text-slate-500">{kind}</span>
                        <a class="text-sm" href="{edit}">edit</a>
                    </li>
                    "#
                )
            })
            .collect::<Vec<String>>()
            .join("");
        let more = match self.next_page {
            Some(page) => InfiniteScroll {
                next_href: format!("{}?page={page}", Route::Root),
            }
            .render(),
            None => "".to_string(),
        };
        format!(
            r#"
            <ul id="item-list" class="flex flex-col gap-1">
                {items}
                {more}
            </ul>
            "#
        )
    }
}

pub struct InfiniteScroll {
    pub next_href: String,
}

impl Component for InfiniteScroll {
    fn render(&self) -> String {
        format!(
            r##"<li hx-get="{}" hx-trigger="revealed" hx-select="#item-list > li" hx-swap="outerHTML"></li>"##,
            clean_text(&self.next_href)
        )
    }
}

pub struct NewItemForm<'a> {
    pub definitions: &'a DefinitionRegistry,
}

impl Component for NewItemForm<'_> {
    fn render(&self) -> String {
        let options = self
            .definitions
            .iter()
            .map(|d| {
                format!(
                    r#"<option value="{}">{}</option>"#,
                    clean_text(&d.discriminator),
                    clean_text(&d.title)
                )
            })
            .collect::<Vec<String>>()
            .join("");
        let action = Route::NewItem;
        format!(
            r#"
            <form class="flex gap-2 items-center" hx-post="{action}">
                <select class="rounded text-sm" name="discriminator">{options}</select>
                <input class="rounded text-sm" type="text" name="title" placeholder="Title" />
                <button class="bg-blue-200 rounded shadow px-2 hover:bg-blue-300">Create</button>
            </form>
            "#
        )
    }
}

pub struct RebaseForm {}

impl Component for RebaseForm {
    fn render(&self) -> String {
        let action = Route::Rebase;
        format!(
            r#"
            <form class="flex gap-2 items-center" hx-post="{action}">
                <label class="text-sm" for="from">Move site from</label>
                <input class="rounded text-sm" type="text" id="from" name="from" placeholder="/old" />
                <label class="text-sm" for="to">to</label>
                <input class="rounded text-sm" type="text" id="to" name="to" placeholder="/new" />
                <button class="bg-blue-200 rounded shadow px-2 hover:bg-blue-300">Rebase urls</button>
            </form>
            "#
        )
    }
}

pub struct RebaseSummary {
    pub items: usize,
    pub details: usize,
}

impl Component for RebaseSummary {
    fn render(&self) -> String {
        let items = self.items;
        let details = self.details;
        format!(
            r#"<p class="bg-yellow-100 p-2 rounded dark:text-black">Rebased {details} url(s) across {items} item(s).</p>"#
        )
    }
}

pub struct ItemView<'a> {
    pub item: &'a ContentItem,
    pub rows: &'a [DisplayRow],
}

impl Component for ItemView<'_> {
    fn render(&self) -> String {
        let id = self.item.id;
        let title = clean_text(&self.item.title);
        let edit = Route::ItemEdit(Some(id));
        let export = Route::ItemExport(Some(id));
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let label = clean_text(&row.title);
                let raw = Route::ItemText(Some((id, row.name.clone())));
                let value = row.html.clone().unwrap_or_default();
                format!(
                    r#"
                    <dt class="font-bold text-sm">{label}</dt>
                    <dd class="flex gap-2">
                        {value}
                        <a class="text-xs text-slate-500" href="{raw}">raw</a>
                    </dd>
                    "#
                )
            })
            .collect::<Vec<String>>()
            .join("");
        format!(
            r#"
            <main class="flex flex-col gap-2 max-w-2xl">
                <h1 class="text-xl">{title}</h1>
                <dl class="grid grid-cols-2 gap-2">{rows}</dl>
                <div class="flex gap-2">
                    <a class="underline" href="{edit}">Edit</a>
                    <a class="underline" href="{export}">Export</a>
                </div>
            </main>
            "#
        )
    }
}

pub struct EditForm<'a> {
    pub item: &'a ContentItem,
    pub editor: &'a ItemEditor<'a>,
    pub notice: Option<&'a str>,
}

impl Component for EditForm<'_> {
    fn render(&self) -> String {
        let definition = self.editor.definition();
        let action = Route::ItemEdit(Some(self.item.id));
        let view = Route::Item(Some(self.item.id));
        let title = clean_text(&self.item.title);
        let kind = clean_text(&definition.title);
        let containers = self
            .editor
            .containers()
            .iter()
            .map(|container| {
                let legend = clean_text(&container.name);
                let fields = container
                    .controls()
                    .iter()
                    .map(|control| {
                        let label = definition
                            .editable(control.id())
                            .map(|e| e.meta().title().to_string())
                            .unwrap_or_else(|_| control.id().to_string());
                        let label = clean_text(&label);
                        let control_html = control.render();
                        format!(
                            r#"
                            <label class="flex flex-col gap-1 text-sm">
                                {label}
                                {control_html}
                            </label>
                            "#
                        )
                    })
                    .collect::<Vec<String>>()
                    .join("");
                format!(
                    r#"
                    <fieldset class="flex flex-col gap-2 border rounded p-2">
                        <legend class="px-1">{legend}</legend>
                        {fields}
                    </fieldset>
                    "#
                )
            })
            .collect::<Vec<String>>()
            .join("");
        let notice = match self.notice {
            Some(text) => format!(
                r#"<p class="bg-green-100 p-2 rounded dark:text-black">{}</p>"#,
                clean_text(text)
            ),
            None => "".to_string(),
        };
        format!(
            r#"
            <form class="flex flex-col gap-4 max-w-2xl" hx-post="{action}">
                <h1 class="text-xl">{title} <span class="text-sm">({kind})</span></h1>
                {notice}
                {containers}
                <div class="flex gap-2">
                    <button class="w-24 h-8 bg-blue-200 rounded shadow hover:shadow-none hover:bg-blue-300 hover:font-bold transition">Save</button>
                    <a class="underline" href="{view}">View</a>
                </div>
            </form>
            "#
        )
    }
}
