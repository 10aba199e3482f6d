use super::{
    components::{self, Component},
    config::ITEM_PAGE_SIZE,
    controls::FormValues,
    display,
    edit::ItemEditor,
    errors::{DetailError, ServerError},
    extractors::HxRequest,
    htmx,
    models::{AppState, ContentItem},
    relativity::{rebase_item, RebaseEvent},
    routes::Route,
    transfer::{self, ExportedItem},
    url,
};
use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderMap, HeaderValue,
    },
    response::IntoResponse,
    Form, Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

async fn load_item(state: &AppState, id: Uuid) -> Result<ContentItem> {
    Ok(state
        .items
        .get(id)
        .await?
        .ok_or_else(|| DetailError::ItemNotFound(id.to_string()))?)
}

pub async fn pong() -> impl IntoResponse {
    "pong"
}

#[derive(Deserialize)]
pub struct ListQuery {
    page: Option<usize>,
}

pub async fn root(
    State(state): State<AppState>,
    Query(ListQuery { page }): Query<ListQuery>,
    HxRequest(is_htmx): HxRequest,
) -> Result<impl IntoResponse, ServerError> {
    let page = page.unwrap_or(0);
    let items = state.items.list(page).await?;
    let next_page = if items.len() == ITEM_PAGE_SIZE {
        Some(page + 1)
    } else {
        None
    };

    Ok(if is_htmx {
        components::ItemList {
            items: &items,
            next_page,
        }
        .render()
    } else {
        components::Page {
            title: "Content",
            children: Box::new(components::Home {
                items: &items,
                definitions: &state.definitions,
                next_page,
            }),
        }
        .render()
    })
}

#[derive(Deserialize)]
pub struct NewItemParams {
    discriminator: String,
    title: String,
}

pub async fn create_item(
    State(state): State<AppState>,
    Form(NewItemParams {
        discriminator,
        title,
    }): Form<NewItemParams>,
) -> Result<impl IntoResponse, ServerError> {
    state.definitions.get(&discriminator)?;
    let title = if title.trim().is_empty() {
        "Untitled"
    } else {
        title.trim()
    };
    let item = ContentItem::new(&discriminator, title);
    let id = item.id;
    state.items.save(item).await?;
    info!(item = %id, %discriminator, "created item");

    Ok(htmx::redirect(&Route::ItemEdit(Some(id)).to_string()))
}

pub async fn show_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    let item = load_item(&state, id).await?;
    let definition = state.definitions.get(&item.discriminator)?;
    let rows =
        display::display_rows(&item, definition, &state.config.app_path)?;

    let html = components::Page {
        title: &item.title,
        children: Box::new(components::ItemView {
            item: &item,
            rows: &rows,
        }),
    }
    .render();

    Ok(html)
}

pub async fn edit_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    HxRequest(is_htmx): HxRequest,
) -> Result<impl IntoResponse, ServerError> {
    let mut item = load_item(&state, id).await?;
    let definition = state.definitions.get(&item.discriminator)?;
    let mut editor = ItemEditor::build(definition, &state.config.app_path);
    editor.load(&mut item)?;

    let form = components::EditForm {
        item: &item,
        editor: &editor,
        notice: None,
    };
    Ok(if is_htmx {
        form.render()
    } else {
        components::Page {
            title: &format!("Edit {}", item.title),
            children: Box::new(form),
        }
        .render()
    })
}

/// Runs every editable's save against the posted form, then stores the
/// item once. Nothing is stored if any editable fails.
pub async fn save_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<FormValues>,
) -> Result<impl IntoResponse, ServerError> {
    let mut item = load_item(&state, id).await?;
    let definition = state.definitions.get(&item.discriminator)?;

    let mut editor = ItemEditor::build(definition, &state.config.app_path);
    editor.bind_form(&form)?;
    editor.save(&mut item)?;
    state.items.save(item.clone()).await?;
    info!(item = %id, "saved item");

    let mut editor = ItemEditor::build(definition, &state.config.app_path);
    editor.load(&mut item)?;
    Ok(components::EditForm {
        item: &item,
        editor: &editor,
        notice: Some("Saved"),
    }
    .render())
}

pub async fn write_detail(
    State(state): State<AppState>,
    Path((id, name)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, ServerError> {
    let item = load_item(&state, id).await?;
    let definition = state.definitions.get(&item.discriminator)?;
    let mut out = String::new();
    display::write_detail(&item, definition, &name, &mut out)?;

    Ok(out)
}

#[derive(Deserialize)]
pub struct ExportQuery {
    to: Option<String>,
}

pub async fn export_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(ExportQuery { to }): Query<ExportQuery>,
) -> Result<impl IntoResponse, ServerError> {
    let item = load_item(&state, id).await?;
    let from = &state.config.app_path;
    let to = to.as_deref().unwrap_or(from);
    let exported = transfer::export_item(&item, &state.definitions, from, to)?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!(
            "attachment; filename=\"{}.json\"",
            item.id
        ))?,
    );
    Ok((headers, serde_json::to_string_pretty(&exported)?))
}

pub async fn import_item(
    State(state): State<AppState>,
    Json(exported): Json<ExportedItem>,
) -> Result<impl IntoResponse, ServerError> {
    let item = transfer::import_item(
        exported,
        &state.definitions,
        &state.config.app_path,
    )?;
    state.items.save(item.clone()).await?;

    Ok(Json(item))
}

#[derive(Deserialize)]
pub struct RebaseParams {
    from: String,
    to: String,
}

/// Relocate the whole site: every url detail that wants rebasing on a move
/// is rewritten from `from` to `to`. Nothing is saved unless every item
/// rebases cleanly, so a failed move can be retried.
pub async fn rebase_site(
    State(state): State<AppState>,
    Form(RebaseParams { from, to }): Form<RebaseParams>,
) -> Result<impl IntoResponse, ServerError> {
    let from = url::validate_app_path(from.trim())?;
    let to = url::validate_app_path(to.trim())?;

    let mut rebased = Vec::new();
    let mut details = 0;
    for mut item in state.items.all().await? {
        let definition = state.definitions.get(&item.discriminator)?;
        let changed = rebase_item(
            &mut item,
            definition,
            RebaseEvent::Rebasing,
            from,
            to,
        )?;
        if !changed.is_empty() {
            details += changed.len();
            rebased.push(item);
        }
    }
    let items = rebased.len();
    state.items.save_all(rebased).await?;
    info!(%from, %to, items, details, "rebased site");

    Ok(components::RebaseSummary { items, details }.render())
}
