//! End-to-end flows through the app core against mock HTTP clients.
//!
//! Every test drives [`App`] operations and asserts on the resulting
//! update stream, the recorded requests, or both. No real network or
//! terminal is involved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Notify;

use mealmix_core::app::App;
use mealmix_core::error::HttpError;
use mealmix_core::http::{HttpClient, HttpResponse, MockClient};
use mealmix_core::mealdb::MealDb;
use mealmix_core::remix::{self, Remixer};
use mealmix_core::store::SavedRecipes;
use mealmix_core::view::{self, RecipeAction, RegionState, SavedAction, Update};

const MEALDB: &str = "http://mealdb.test";
const LLM: &str = "http://llm.test/v1";

fn tea_json() -> serde_json::Value {
    json!({
        "meals": [{
            "strMeal": "Tea",
            "strMealThumb": "https://img.test/tea.jpg",
            "strInstructions": "Boil.\nServe.",
            "strIngredient1": "Water",
            "strMeasure1": "1 cup",
            "strIngredient2": "",
        }]
    })
}

fn mealdb(mock: &Arc<MockClient>) -> MealDb {
    MealDb::new(mock.clone(), MEALDB)
}

fn remixer(mock: &Arc<MockClient>) -> Remixer {
    Remixer::new(mock.clone(), LLM, "sk-test", "gpt-4o")
}

fn store_in(dir: &TempDir) -> SavedRecipes {
    SavedRecipes::load(dir.path().join("saved.json")).unwrap()
}

fn drain(rx: &mut UnboundedReceiver<Update>) -> Vec<Update> {
    let mut updates = Vec::new();
    while let Ok(update) = rx.try_recv() {
        updates.push(update);
    }
    updates
}

#[tokio::test]
async fn test_show_random_renders_recipe() {
    let mock = Arc::new(MockClient::new().with_json("http://mealdb.test/random.php", tea_json()));
    let (app, mut rx) = App::new(mealdb(&mock), None, None);

    app.show_random().await;

    let updates = drain(&mut rx);
    assert_eq!(
        updates[0],
        Update::Recipe(RegionState::Loading(view::LOADING))
    );
    let Update::Recipe(RegionState::Ready(recipe_view)) = &updates[1] else {
        panic!("expected a rendered recipe, got {:?}", updates[1]);
    };
    assert_eq!(recipe_view.title, "Tea");
    assert_eq!(recipe_view.image_url, "https://img.test/tea.jpg");
    assert_eq!(recipe_view.ingredients, vec!["1 cup Water"]);
    assert_eq!(recipe_view.instruction_lines, vec!["Boil.", "Serve."]);
    assert!(recipe_view.actions.is_empty());
    assert_eq!(app.current_recipe_name().await.as_deref(), Some("Tea"));
}

#[tokio::test]
async fn test_show_random_failure_shows_fixed_message() {
    let mock =
        Arc::new(MockClient::new().with_error("http://mealdb.test/random.php", "connection reset"));
    let (app, mut rx) = App::new(mealdb(&mock), None, None);

    app.show_random().await;

    let updates = drain(&mut rx);
    assert_eq!(
        updates.last(),
        Some(&Update::Recipe(RegionState::Failed(
            view::LOAD_FAILED.to_string()
        )))
    );
    assert_eq!(app.current_recipe_name().await, None);
}

#[tokio::test]
async fn test_remix_without_recipe_makes_no_network_call() {
    let mock = Arc::new(MockClient::new());
    let (app, mut rx) = App::new(mealdb(&mock), Some(remixer(&mock)), None);

    app.remix_current("Pirate").await;

    let updates = drain(&mut rx);
    assert_eq!(
        updates,
        vec![Update::Remix(RegionState::Failed(
            view::REMIX_NEEDS_RECIPE.to_string()
        ))]
    );
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_remix_disabled_without_remixer() {
    let mock = Arc::new(MockClient::new().with_json("http://mealdb.test/random.php", tea_json()));
    let (app, mut rx) = App::new(mealdb(&mock), None, None);

    app.show_random().await;
    app.remix_current("Pirate").await;

    let updates = drain(&mut rx);
    assert_eq!(
        updates.last(),
        Some(&Update::Remix(RegionState::Failed(
            view::REMIX_UNAVAILABLE.to_string()
        )))
    );
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_remix_sends_expected_request_and_renders_result() {
    let mock = Arc::new(
        MockClient::new()
            .with_json("http://mealdb.test/random.php", tea_json())
            .with_json(
                "http://llm.test/v1/chat/completions",
                json!({"choices": [{"message": {"content": "Arr!\nSteep it in grog."}}]}),
            ),
    );
    let (app, mut rx) = App::new(mealdb(&mock), Some(remixer(&mock)), None);

    app.show_random().await;
    app.remix_current("Pirate").await;

    let updates = drain(&mut rx);
    assert_eq!(
        updates[2],
        Update::Remix(RegionState::Loading(view::REMIX_IN_PROGRESS))
    );
    let Update::Remix(RegionState::Ready(remix_view)) = &updates[3] else {
        panic!("expected a rendered remix, got {:?}", updates[3]);
    };
    assert_eq!(remix_view.heading, "🎨 Your Remixed Recipe: Pirate");
    assert_eq!(remix_view.lines, vec!["Arr!", "Steep it in grog."]);

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, "POST");
    assert_eq!(requests[1].bearer_token.as_deref(), Some("sk-test"));
    assert_eq!(
        requests[1].body,
        Some(json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": remix::SYSTEM_PROMPT},
                {"role": "user", "content": "Please remix this recipe with the theme: \"Pirate\"\n\n\
                    Recipe: Tea\nIngredients: 1 cup Water\nInstructions: Boil.\nServe."},
            ],
            "max_tokens": 400,
            "temperature": 0.8,
        }))
    );
}

#[tokio::test]
async fn test_remix_api_error_surfaces_status() {
    let mock = Arc::new(
        MockClient::new()
            .with_json("http://mealdb.test/random.php", tea_json())
            .with_response("http://llm.test/v1/chat/completions", 500, "oops"),
    );
    let (app, mut rx) = App::new(mealdb(&mock), Some(remixer(&mock)), None);

    app.show_random().await;
    app.remix_current("Pirate").await;

    let updates = drain(&mut rx);
    let Some(Update::Remix(RegionState::Failed(message))) = updates.last() else {
        panic!("expected a remix failure, got {:?}", updates.last());
    };
    assert_eq!(
        message,
        &format!("{}\nError: OpenAI API error: 500", view::REMIX_FAILED)
    );
}

#[tokio::test]
async fn test_lookup_not_found_keeps_current_recipe() {
    let mock = Arc::new(
        MockClient::new()
            .with_json("http://mealdb.test/random.php", tea_json())
            .with_json("http://mealdb.test/search.php?s=nothing", json!({"meals": null})),
    );
    let (app, mut rx) = App::new(mealdb(&mock), None, None);

    app.show_random().await;
    app.show_named("nothing").await;

    let updates = drain(&mut rx);
    assert_eq!(
        updates.last(),
        Some(&Update::Recipe(RegionState::Failed(
            view::LOOKUP_NOT_FOUND.to_string()
        )))
    );
    assert_eq!(app.current_recipe_name().await.as_deref(), Some("Tea"));
}

#[tokio::test]
async fn test_lookup_renders_first_match() {
    let mock = Arc::new(MockClient::new().with_json(
        "http://mealdb.test/search.php?s=pie",
        json!({"meals": [{"strMeal": "Fish Pie"}, {"strMeal": "Mud Pie"}]}),
    ));
    let (app, mut rx) = App::new(mealdb(&mock), None, None);

    app.show_named("pie").await;

    let updates = drain(&mut rx);
    let Some(Update::Recipe(RegionState::Ready(recipe_view))) = updates.last() else {
        panic!("expected a rendered recipe, got {:?}", updates.last());
    };
    assert_eq!(recipe_view.title, "Fish Pie");
    assert_eq!(app.current_recipe_name().await.as_deref(), Some("Fish Pie"));
}

#[tokio::test]
async fn test_save_flow_notices_and_refreshes_list() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockClient::new().with_json("http://mealdb.test/random.php", tea_json()));
    let (app, mut rx) = App::new(mealdb(&mock), None, Some(store_in(&dir)));

    app.show_random().await;
    let updates = drain(&mut rx);
    let Some(Update::Recipe(RegionState::Ready(recipe_view))) = updates.last() else {
        panic!("expected a rendered recipe, got {:?}", updates.last());
    };
    assert_eq!(recipe_view.actions, vec![RecipeAction::Save]);

    app.save_current().await;
    let updates = drain(&mut rx);
    assert_eq!(updates[0], Update::Notice(view::RECIPE_SAVED.to_string()));
    let Update::Saved(saved_view) = &updates[1] else {
        panic!("expected a saved-list refresh, got {:?}", updates[1]);
    };
    assert_eq!(saved_view.rows.len(), 1);
    assert_eq!(saved_view.rows[0].name, "Tea");
    assert_eq!(
        saved_view.rows[0].actions,
        vec![SavedAction::View, SavedAction::Delete]
    );

    app.save_current().await;
    assert_eq!(
        drain(&mut rx),
        vec![Update::Notice(view::ALREADY_SAVED.to_string())]
    );

    app.remove_saved("Tea").await;
    let updates = drain(&mut rx);
    let Some(Update::Saved(saved_view)) = updates.last() else {
        panic!("expected a saved-list refresh, got {:?}", updates.last());
    };
    assert!(saved_view.is_empty());

    // The file reflects the removal.
    assert!(store_in(&dir).names().is_empty());
}

#[tokio::test]
async fn test_save_without_recipe_is_an_interrupting_notice() {
    let dir = TempDir::new().unwrap();
    let mock = Arc::new(MockClient::new());
    let (app, mut rx) = App::new(mealdb(&mock), None, Some(store_in(&dir)));

    app.save_current().await;

    assert_eq!(
        drain(&mut rx),
        vec![Update::Notice(view::SAVE_NEEDS_RECIPE.to_string())]
    );
}

#[tokio::test]
async fn test_refresh_saved_emits_existing_names() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.add("Tea").unwrap();
    store.add("Toast").unwrap();

    let mock = Arc::new(MockClient::new());
    let (app, mut rx) = App::new(mealdb(&mock), None, Some(store_in(&dir)));

    app.refresh_saved().await;

    let updates = drain(&mut rx);
    let [Update::Saved(saved_view)] = updates.as_slice() else {
        panic!("expected one saved-list update, got {updates:?}");
    };
    let names: Vec<_> = saved_view.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Tea", "Toast"]);
}

/// Serves the first recipe request only after `release` is notified, so a
/// test can finish a second request first and prove the early one loses.
struct RacingClient {
    calls: AtomicUsize,
    release: Notify,
}

impl RacingClient {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            release: Notify::new(),
        }
    }

    fn body(name: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: json!({"meals": [{"strMeal": name}]}).to_string(),
        }
    }
}

#[async_trait]
impl HttpClient for RacingClient {
    async fn get(&self, _url: &str) -> Result<HttpResponse, HttpError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.release.notified().await;
            Ok(Self::body("Stale Soup"))
        } else {
            Ok(Self::body("Fresh Tea"))
        }
    }

    async fn post_json(
        &self,
        _url: &str,
        _bearer_token: Option<&str>,
        _body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        Err(HttpError::Request("unexpected POST".to_string()))
    }
}

#[tokio::test]
async fn test_stale_recipe_response_is_dropped() {
    let client = Arc::new(RacingClient::new());
    let (app, mut rx) = App::new(MealDb::new(client.clone(), MEALDB), None, None);
    let app = Arc::new(app);

    let early = tokio::spawn({
        let app = app.clone();
        async move { app.show_random().await }
    });
    while client.calls.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }

    // Second fetch completes while the first is still in flight.
    app.show_random().await;
    client.release.notify_one();
    early.await.unwrap();

    let rendered: Vec<String> = drain(&mut rx)
        .into_iter()
        .filter_map(|update| match update {
            Update::Recipe(RegionState::Ready(v)) => Some(v.title),
            _ => None,
        })
        .collect();
    assert_eq!(rendered, ["Fresh Tea"]);
    assert_eq!(app.current_recipe_name().await.as_deref(), Some("Fresh Tea"));
}

/// Like [`RacingClient`] but for the remix endpoint; recipe fetches pass
/// straight through.
struct RacingRemixClient {
    posts: AtomicUsize,
    release: Notify,
}

#[async_trait]
impl HttpClient for RacingRemixClient {
    async fn get(&self, _url: &str) -> Result<HttpResponse, HttpError> {
        Ok(HttpResponse {
            status: 200,
            body: json!({"meals": [{"strMeal": "Tea"}]}).to_string(),
        })
    }

    async fn post_json(
        &self,
        _url: &str,
        _bearer_token: Option<&str>,
        _body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let content = if self.posts.fetch_add(1, Ordering::SeqCst) == 0 {
            self.release.notified().await;
            "Old remix"
        } else {
            "New remix"
        };
        Ok(HttpResponse {
            status: 200,
            body: json!({"choices": [{"message": {"content": content}}]}).to_string(),
        })
    }
}

#[tokio::test]
async fn test_stale_remix_response_is_dropped() {
    let client = Arc::new(RacingRemixClient {
        posts: AtomicUsize::new(0),
        release: Notify::new(),
    });
    let (app, mut rx) = App::new(
        MealDb::new(client.clone(), MEALDB),
        Some(Remixer::new(client.clone(), LLM, "sk-test", "gpt-4o")),
        None,
    );
    let app = Arc::new(app);
    app.show_random().await;

    let early = tokio::spawn({
        let app = app.clone();
        async move { app.remix_current("Medieval").await }
    });
    while client.posts.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }

    app.remix_current("Pirate").await;
    client.release.notify_one();
    early.await.unwrap();

    let rendered: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter_map(|update| match update {
            Update::Remix(RegionState::Ready(v)) => Some((v.heading, v.lines)),
            _ => None,
        })
        .collect();
    assert_eq!(
        rendered,
        [(
            "🎨 Your Remixed Recipe: Pirate".to_string(),
            vec!["New remix".to_string()]
        )]
    );
}
