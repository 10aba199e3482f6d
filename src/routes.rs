use super::{controllers, middleware, models};
use axum::{
    middleware::from_fn,
    routing::{get, post, Router},
};
use std::fmt::{self, Display};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Every route in the app. `None` renders the route pattern, for the
/// router; `Some` renders a concrete href.
pub enum Route {
    Root,
    Ping,
    NewItem,
    Item(Option<Uuid>),
    ItemEdit(Option<Uuid>),
    ItemText(Option<(Uuid, String)>),
    ItemExport(Option<Uuid>),
    Import,
    Rebase,
}

impl Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "/"),
            Self::Ping => write!(f, "/ping"),
            Self::NewItem => write!(f, "/item"),
            Self::Item(Some(id)) => write!(f, "/item/{id}"),
            Self::Item(None) => write!(f, "/item/:id"),
            Self::ItemEdit(Some(id)) => write!(f, "/item/{id}/edit"),
            Self::ItemEdit(None) => write!(f, "/item/:id/edit"),
            Self::ItemText(Some((id, name))) => {
                write!(f, "/item/{id}/text/{name}")
            }
            Self::ItemText(None) => write!(f, "/item/:id/text/:name"),
            Self::ItemExport(Some(id)) => write!(f, "/item/{id}/export"),
            Self::ItemExport(None) => write!(f, "/item/:id/export"),
            Self::Import => write!(f, "/import"),
            Self::Rebase => write!(f, "/rebase"),
        }
    }
}

/// Routes answering with HTML.
#[rustfmt::skip]
pub fn get_routes() -> Router<models::AppState> {
    Router::new()
        .route(&Route::Root.to_string(), get(controllers::root))
        .route(&Route::NewItem.to_string(), post(controllers::create_item))
        .route(&Route::Item(None).to_string(), get(controllers::show_item))
        .route(&Route::ItemEdit(None).to_string(), get(controllers::edit_item))
        .route(&Route::ItemEdit(None).to_string(), post(controllers::save_item))
        .route(&Route::Rebase.to_string(), post(controllers::rebase_site))
}

/// Routes answering with text or JSON.
#[rustfmt::skip]
pub fn get_data_routes() -> Router<models::AppState> {
    Router::new()
        .route(&Route::Ping.to_string(), get(controllers::pong))
        .route(&Route::ItemText(None).to_string(), get(controllers::write_detail))
        .route(&Route::ItemExport(None).to_string(), get(controllers::export_item))
        .route(&Route::Import.to_string(), post(controllers::import_item))
}

pub fn build_app(state: models::AppState) -> Router {
    get_routes()
        .layer(from_fn(middleware::html_headers))
        .merge(get_data_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        definitions::default_registry,
        details::Value,
        models::{AppState, ContentItem, ItemRepository, MemoryRepository},
        transfer::ExportedItem,
    };
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn setup(app_path: &str) -> (Router, Arc<MemoryRepository>, Uuid) {
        let items = Arc::new(MemoryRepository::new());
        let home = ContentItem::new("StartPage", "Home");
        let id = home.id;
        items.save(home).await.unwrap();
        (app(items.clone(), app_path), items, id)
    }

    fn app(items: Arc<MemoryRepository>, app_path: &str) -> Router {
        let config = Config {
            app_path: app_path.to_string(),
            ..Config::default()
        };
        let state = AppState {
            items: items.clone(),
            definitions: Arc::new(default_registry().unwrap()),
            config: Arc::new(config),
        };
        build_app(state)
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_route_display() {
        let id = Uuid::nil();
        assert_eq!(Route::ItemEdit(None).to_string(), "/item/:id/edit");
        assert_eq!(
            Route::ItemText(Some((id, "Link".to_string()))).to_string(),
            format!("/item/{id}/text/Link")
        );
    }

    #[tokio::test]
    async fn test_home_lists_items() {
        let (app, _, _) = setup("/").await;
        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert!(body_text(response).await.contains("Home"));
    }

    #[tokio::test]
    async fn test_edit_form_renders() {
        let (app, _, id) = setup("/").await;
        let response =
            app.oneshot(get(&format!("/item/{id}/edit"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(r#"name="PageOrDocumentUrl""#));
        assert!(body.contains(r#"name="FooterText""#));
    }

    #[tokio::test]
    async fn test_save_stores_details() {
        let (app, items, id) = setup("/site").await;
        let response = app
            .oneshot(post_form(
                &format!("/item/{id}/edit"),
                "Published.date=2024-03-01&Published.time=&\
                 PageOrDocumentUrl=%2Fsite%2Fabout&TopImage=&FooterText=",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Saved"));

        let item = items.get(id).await.unwrap().unwrap();
        assert_eq!(
            item.detail("PageOrDocumentUrl"),
            Some(&Value::Str("~/about".to_string()))
        );
        assert!(item.detail("Published").is_some());
        assert!(item.detail("TopImage").is_none());
        assert!(item.detail("FooterText").is_none());
    }

    #[tokio::test]
    async fn test_bad_date_is_a_bad_request() {
        let (app, items, id) = setup("/").await;
        let response = app
            .oneshot(post_form(
                &format!("/item/{id}/edit"),
                "Published.date=tomorrow&FooterText=kept%3F",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let item = items.get(id).await.unwrap().unwrap();
        assert!(item.details.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_item_is_not_found() {
        let (app, _, _) = setup("/").await;
        let response = app
            .oneshot(get(&format!("/item/{}", Uuid::new_v4())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_raw_text_output() {
        let (app, items, id) = setup("/").await;
        let mut item = items.get(id).await.unwrap().unwrap();
        item.details
            .set("FooterText", Some(String::from("a & b")), None);
        items.save(item).await.unwrap();

        let response = app
            .oneshot(get(&format!("/item/{id}/text/FooterText")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "a & b");
    }

    #[tokio::test]
    async fn test_export_rebases_to_target() {
        let (app, items, id) = setup("/intranet").await;
        let mut item = items.get(id).await.unwrap().unwrap();
        item.details.set(
            "TopImage",
            Some(String::from("/intranet/top.png")),
            None,
        );
        items.save(item).await.unwrap();

        let response = app
            .oneshot(get(&format!("/item/{id}/export?to=/public")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let exported: ExportedItem =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(exported.app_path, "/public");
        assert_eq!(
            exported.item.detail("TopImage"),
            Some(&Value::Str("/public/top.png".to_string()))
        );
    }

    #[tokio::test]
    async fn test_rebase_site() {
        let (app, items, id) = setup("/").await;
        let mut item = items.get(id).await.unwrap().unwrap();
        item.details
            .set("TopImage", Some(String::from("/old/top.png")), None);
        items.save(item).await.unwrap();

        let response = app
            .oneshot(post_form("/rebase", "from=%2Fold&to=%2Fnew"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let item = items.get(id).await.unwrap().unwrap();
        assert_eq!(
            item.detail("TopImage"),
            Some(&Value::Str("/new/top.png".to_string()))
        );
    }

    #[tokio::test]
    async fn test_rebase_with_malformed_root() {
        let (app, _, _) = setup("/").await;
        let response = app
            .oneshot(post_form("/rebase", "from=old&to=%2Fnew"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rebase_on_empty_site_still_checks_roots() {
        let app = app(Arc::new(MemoryRepository::new()), "/");
        let response = app
            .oneshot(post_form("/rebase", "from=old&to=new"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_failed_rebase_saves_nothing() {
        let items = Arc::new(MemoryRepository::new());
        let mut good = Vec::new();
        for i in 0..10 {
            let mut item = ContentItem::new("StartPage", &format!("page {i}"));
            item.details
                .set("TopImage", Some(String::from("/app/x.png")), None);
            good.push(item.id);
            items.save(item).await.unwrap();
        }
        let mut broken = ContentItem::new("StartPage", "broken");
        broken.details.set_raw("TopImage", Value::Int(7));
        items.save(broken).await.unwrap();

        let response = app(items.clone(), "/app")
            .oneshot(post_form("/rebase", "from=%2Fapp&to=%2Fapp%2Fv2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        for id in good {
            let item = items.get(id).await.unwrap().unwrap();
            assert_eq!(
                item.detail("TopImage"),
                Some(&Value::Str("/app/x.png".to_string()))
            );
        }
    }

    #[tokio::test]
    async fn test_show_item() {
        let (app, _, id) = setup("/").await;
        let response = app.oneshot(get(&format!("/item/{id}"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Home"));
    }

    #[tokio::test]
    async fn test_import_rejects_unknown_details() {
        let (app, items, _) = setup("/").await;
        let id = Uuid::new_v4();
        let body = serde_json::json!({
            "app_path": "/",
            "item": {
                "id": id,
                "discriminator": "StartPage",
                "title": "Imported",
                "details": {"Bogus": {"type": "bool", "value": true}},
            },
        });
        let request = Request::builder()
            .method("POST")
            .uri("/import")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(items.get(id).await.unwrap(), None);
    }
}
