//! API routes
//!
//! Each screen reads its state with a `GET` and changes it through small
//! action endpoints that answer with the screen's new state.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, patch, post, put},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::assistant::{ChatScreen, ChatSnapshot, QuickAction};
use crate::cart::{Cart, CartLine, Order, OrderSummary};
use crate::catalog::{BadgeTarget, CatalogSnapshot, CategoryFilter, Layout, PriceRange};
use crate::config::PricingConfig;
use crate::home::HomeFeed;
use crate::profile::{ProfileField, ProfileSnapshot};
use crate::shell::{nav_bar, NavBar};
use crate::AppState;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unknown chat screen: {0}")]
    UnknownScreen(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown price range: {0}")]
    UnknownPriceRange(String),

    #[error("Cart line not found: {0}")]
    LineNotFound(u32),

    #[error("Quantity out of range: {0}")]
    QuantityOutOfRange(i64),

    #[error("Unknown quantity step: {0}")]
    UnknownStep(String),

    #[error("Quick actions are only available on the assistant page")]
    QuickActionsUnavailable,

    #[error("Suggestion not found")]
    SuggestionNotFound,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownCategory(_)
            | ApiError::UnknownPriceRange(_)
            | ApiError::QuantityOutOfRange(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownScreen(_)
            | ApiError::LineNotFound(_)
            | ApiError::UnknownStep(_)
            | ApiError::QuickActionsUnavailable
            | ApiError::SuggestionNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Request rejected");
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    store: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store: state.store.store.name.clone(),
    })
}

// ---------- Shell ----------

#[derive(Debug, Deserialize)]
struct TabsQuery {
    #[serde(default = "root_path")]
    path: String,
}

fn root_path() -> String {
    "/".into()
}

async fn tabs(Query(query): Query<TabsQuery>) -> Json<NavBar> {
    Json(nav_bar(&query.path))
}

async fn home(State(state): State<AppState>) -> Json<HomeFeed> {
    Json(state.session.home.clone())
}

// ---------- Catalog ----------

#[derive(Debug, Deserialize)]
pub struct FilterUpdate {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub layout: Option<Layout>,
}

async fn catalog(State(state): State<AppState>) -> Json<CatalogSnapshot> {
    Json(state.session.catalog().snapshot())
}

async fn update_filters(
    State(state): State<AppState>,
    Json(update): Json<FilterUpdate>,
) -> Result<Json<CatalogSnapshot>, ApiError> {
    let category = update
        .category
        .map(|c| c.parse::<CategoryFilter>().map_err(ApiError::UnknownCategory))
        .transpose()?;

    let mut view = state.session.catalog();
    if let Some(search) = update.search {
        view.filters.set_search(search);
    }
    if let Some(category) = category {
        view.filters.select_category(category);
    }
    if let Some(layout) = update.layout {
        view.layout = layout;
    }

    Ok(Json(view.snapshot()))
}

async fn toggle_price_range(
    State(state): State<AppState>,
    Path(range): Path<String>,
) -> Result<Json<CatalogSnapshot>, ApiError> {
    let range = range
        .parse::<PriceRange>()
        .map_err(ApiError::UnknownPriceRange)?;

    let mut view = state.session.catalog();
    view.filters.toggle_price_range(range);
    Ok(Json(view.snapshot()))
}

async fn dismiss_badge(
    State(state): State<AppState>,
    Json(target): Json<BadgeTarget>,
) -> Json<CatalogSnapshot> {
    let mut view = state.session.catalog();
    view.filters.dismiss(target);
    Json(view.snapshot())
}

#[derive(Debug, Serialize)]
struct FilterOption {
    id: String,
    label: &'static str,
}

#[derive(Debug, Serialize)]
struct FilterOptions {
    categories: Vec<FilterOption>,
    price_ranges: Vec<FilterOption>,
}

async fn filter_options() -> Json<FilterOptions> {
    Json(FilterOptions {
        categories: CategoryFilter::options()
            .into_iter()
            .map(|c| FilterOption {
                id: c.to_string(),
                label: c.label(),
            })
            .collect(),
        price_ranges: PriceRange::ALL
            .into_iter()
            .map(|r| FilterOption {
                id: r.id().to_string(),
                label: r.label(),
            })
            .collect(),
    })
}

async fn clear_filters(State(state): State<AppState>) -> Json<CatalogSnapshot> {
    let mut view = state.session.catalog();
    view.filters.clear();
    Json(view.snapshot())
}

// ---------- Cart ----------

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub count: usize,
    pub summary: OrderSummary,
}

impl CartResponse {
    fn new(cart: &Cart, pricing: &PricingConfig) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            count: cart.len(),
            summary: cart.summary(pricing),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: i64,
}

async fn cart(State(state): State<AppState>) -> Json<CartResponse> {
    let cart = state.session.cart();
    Json(CartResponse::new(&cart, &state.store.pricing))
}

async fn set_quantity(
    State(state): State<AppState>,
    Path(line_id): Path<u32>,
    Json(update): Json<QuantityUpdate>,
) -> Result<Json<CartResponse>, ApiError> {
    if update.quantity > i64::from(u32::MAX) {
        return Err(ApiError::QuantityOutOfRange(update.quantity));
    }

    let mut cart = state.session.cart();
    if !cart.contains(line_id) {
        return Err(ApiError::LineNotFound(line_id));
    }

    cart.set_quantity(line_id, update.quantity);
    Ok(Json(CartResponse::new(&cart, &state.store.pricing)))
}

async fn remove_line(
    State(state): State<AppState>,
    Path(line_id): Path<u32>,
) -> Result<Json<CartResponse>, ApiError> {
    let mut cart = state.session.cart();
    if !cart.remove_line(line_id) {
        return Err(ApiError::LineNotFound(line_id));
    }

    Ok(Json(CartResponse::new(&cart, &state.store.pricing)))
}

async fn step_quantity(
    State(state): State<AppState>,
    Path((line_id, step)): Path<(u32, String)>,
) -> Result<Json<CartResponse>, ApiError> {
    let mut cart = state.session.cart();
    if !cart.contains(line_id) {
        return Err(ApiError::LineNotFound(line_id));
    }

    match step.as_str() {
        "increment" => cart.increment(line_id),
        "decrement" => cart.decrement(line_id),
        _ => return Err(ApiError::UnknownStep(step)),
    }
    Ok(Json(CartResponse::new(&cart, &state.store.pricing)))
}

async fn orders(State(state): State<AppState>) -> Json<Vec<Order>> {
    Json(state.session.orders.clone())
}

// ---------- Assistant ----------

fn parse_screen(screen: &str) -> Result<ChatScreen, ApiError> {
    screen.parse().map_err(ApiError::UnknownScreen)
}

#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct QuickActionRequest {
    pub action: QuickAction,
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub accepted: bool,
    #[serde(flatten)]
    pub chat: ChatSnapshot,
}

#[derive(Debug, Serialize)]
struct QuickActionInfo {
    action: QuickAction,
    title: &'static str,
    description: &'static str,
}

#[derive(Debug, Serialize)]
struct SuggestionResponse {
    text: String,
}

async fn chat(
    State(state): State<AppState>,
    Path(screen): Path<String>,
) -> Result<Json<ChatSnapshot>, ApiError> {
    let screen = parse_screen(&screen)?;
    let chats = state.session.chats();
    Ok(Json(chats.get(screen).snapshot()))
}

async fn send_message(
    State(state): State<AppState>,
    Path(screen): Path<String>,
    Json(request): Json<SendMessage>,
) -> Result<Json<SendResponse>, ApiError> {
    let screen = parse_screen(&screen)?;
    let mut chats = state.session.chats();
    let session = chats.get_mut(screen);
    let accepted = session.submit(&request.text);

    Ok(Json(SendResponse {
        accepted,
        chat: session.snapshot(),
    }))
}

async fn quick_actions() -> Json<Vec<QuickActionInfo>> {
    Json(
        QuickAction::ALL
            .into_iter()
            .map(|action| QuickActionInfo {
                action,
                title: action.title(),
                description: action.description(),
            })
            .collect(),
    )
}

async fn run_quick_action(
    State(state): State<AppState>,
    Path(screen): Path<String>,
    Json(request): Json<QuickActionRequest>,
) -> Result<Json<SendResponse>, ApiError> {
    let screen = parse_screen(&screen)?;
    if screen != ChatScreen::Page {
        return Err(ApiError::QuickActionsUnavailable);
    }

    let mut chats = state.session.chats();
    let session = chats.get_mut(screen);
    let accepted = session.quick_action(request.action);

    Ok(Json(SendResponse {
        accepted,
        chat: session.snapshot(),
    }))
}

async fn suggestion(
    State(state): State<AppState>,
    Path((screen, message_id, index)): Path<(String, Uuid, usize)>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let screen = parse_screen(&screen)?;
    let chats = state.session.chats();
    let text = chats
        .get(screen)
        .suggestion(message_id, index)
        .ok_or(ApiError::SuggestionNotFound)?;

    Ok(Json(SuggestionResponse { text }))
}

async fn close_chat(
    State(state): State<AppState>,
    Path(screen): Path<String>,
) -> Result<Json<ChatSnapshot>, ApiError> {
    let screen = parse_screen(&screen)?;
    let mut chats = state.session.chats();
    chats.reopen(screen);
    Ok(Json(chats.get(screen).snapshot()))
}

// ---------- Profile ----------

#[derive(Debug, Deserialize)]
pub struct DraftUpdate {
    pub field: ProfileField,
    pub value: String,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

async fn profile(State(state): State<AppState>) -> Json<ProfileSnapshot> {
    Json(state.session.profile().snapshot(today()))
}

async fn begin_edit(State(state): State<AppState>) -> Json<ProfileSnapshot> {
    let mut view = state.session.profile();
    view.begin_edit();
    Json(view.snapshot(today()))
}

async fn update_draft(
    State(state): State<AppState>,
    Json(update): Json<DraftUpdate>,
) -> Json<ProfileSnapshot> {
    let mut view = state.session.profile();
    view.update_draft(update.field, update.value);
    Json(view.snapshot(today()))
}

async fn save_profile(State(state): State<AppState>) -> Json<ProfileSnapshot> {
    let mut view = state.session.profile();
    view.save();
    Json(view.snapshot(today()))
}

async fn cancel_edit(State(state): State<AppState>) -> Json<ProfileSnapshot> {
    let mut view = state.session.profile();
    view.cancel();
    Json(view.snapshot(today()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/v1/tabs", get(tabs))
        .route("/v1/home", get(home))
        .route("/v1/catalog", get(catalog))
        .route("/v1/catalog/filters", put(update_filters).delete(clear_filters))
        .route("/v1/catalog/filters/options", get(filter_options))
        .route("/v1/catalog/filters/price-ranges/:range", post(toggle_price_range))
        .route("/v1/catalog/filters/dismiss", post(dismiss_badge))
        .route("/v1/cart", get(cart))
        .route("/v1/cart/lines/:id", put(set_quantity).delete(remove_line))
        .route("/v1/cart/lines/:id/:step", post(step_quantity))
        .route("/v1/orders", get(orders))
        .route("/v1/quick-actions", get(quick_actions))
        .route("/v1/chat/:screen", get(chat).delete(close_chat))
        .route("/v1/chat/:screen/messages", post(send_message))
        .route("/v1/chat/:screen/quick-actions", post(run_quick_action))
        .route(
            "/v1/chat/:screen/messages/:message_id/suggestions/:index",
            get(suggestion),
        )
        .route("/v1/profile", get(profile))
        .route("/v1/profile/edit", post(begin_edit))
        .route("/v1/profile/draft", patch(update_draft))
        .route("/v1/profile/save", post(save_profile))
        .route("/v1/profile/cancel", post(cancel_edit))
}
