//! Checkout route handlers.
//!
//! Each mutation loads the session snapshot, applies one state-container
//! operation, persists the result best-effort, and returns the full checkout
//! view. The front end is a thin client: totals and step gating all live
//! here.

use std::str::FromStr;

use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::header::USER_AGENT,
    http::HeaderMap,
};
use everintent_core::{AddonId, ResumeToken, TierId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog;
use crate::checkout::{
    BuyerField, CheckoutSnapshot, CheckoutState, SessionCheckoutStore, Step, UtmParams, hydrate,
    submit,
};
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::services::{AnalyticsEvent, backend::BackendError};
use crate::state::AppState;

// =============================================================================
// Views
// =============================================================================

/// Full checkout view returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutView {
    pub step: Step,
    pub step_number: u8,
    pub state: CheckoutState,
    pub monthly_total: Decimal,
    pub setup_total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl CheckoutView {
    fn new(state: CheckoutState, step: Step, warning: Option<String>) -> Self {
        Self {
            step,
            step_number: step.number(),
            monthly_total: state.monthly_total(),
            setup_total: state.setup_total(),
            state,
            warning,
        }
    }
}

/// One tier row of the catalog view.
#[derive(Debug, Clone, Serialize)]
pub struct TierView {
    pub id: TierId,
    pub display_name: &'static str,
    pub monthly_price: Decimal,
    pub setup_fee: Decimal,
}

/// One add-on row of the catalog view.
#[derive(Debug, Clone, Serialize)]
pub struct AddonView {
    pub id: AddonId,
    pub display_name: &'static str,
    pub monthly_price: Decimal,
}

/// The static pricing catalog, for rendering the selection step.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub tiers: Vec<TierView>,
    pub addons: Vec<AddonView>,
}

/// Response for a confirmed submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub redirect_url: String,
}

// =============================================================================
// Forms
// =============================================================================

/// Query parameters accepted at checkout start.
///
/// UTM fields are listed inline rather than flattened: the urlencoded
/// deserializer does not support `#[serde(flatten)]`.
#[derive(Debug, Deserialize)]
pub struct StartQuery {
    /// Opaque resume token pointing at a backend order record.
    pub resume: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
}

impl StartQuery {
    fn utm(&self) -> UtmParams {
        UtmParams {
            utm_source: self.utm_source.clone(),
            utm_medium: self.utm_medium.clone(),
            utm_campaign: self.utm_campaign.clone(),
        }
    }
}

/// Set tier form data.
#[derive(Debug, Deserialize)]
pub struct SetTierForm {
    pub tier: TierId,
}

/// Toggle add-on form data.
#[derive(Debug, Deserialize)]
pub struct ToggleAddonForm {
    pub addon: AddonId,
}

/// Update field form data.
#[derive(Debug, Deserialize)]
pub struct UpdateFieldForm {
    pub field: BuyerField,
    pub value: String,
}

/// Jump-to-step form data (the review step's "edit" affordance).
#[derive(Debug, Deserialize)]
pub struct GoToForm {
    pub step: Step,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the in-progress checkout, or fail with a client error.
///
/// Mutation endpoints require a started checkout; a missing snapshot means
/// the session expired or the flow was never mounted.
async fn require_snapshot(session: &Session) -> Result<CheckoutSnapshot> {
    SessionCheckoutStore::new(session)
        .load()
        .await
        .ok_or_else(|| AppError::BadRequest("no checkout in progress".to_string()))
}

/// Persist state and step, best-effort, and build the response view.
async fn save_and_view(
    session: &Session,
    state: CheckoutState,
    step: Step,
    warning: Option<String>,
) -> Json<CheckoutView> {
    SessionCheckoutStore::new(session)
        .save(&CheckoutSnapshot::now(state.clone(), step))
        .await;
    Json(CheckoutView::new(state, step, warning))
}

// =============================================================================
// Handlers
// =============================================================================

/// The static pricing catalog.
#[instrument]
pub async fn catalog_view() -> Json<CatalogView> {
    let tiers = catalog::all_tiers()
        .into_iter()
        .map(|t| TierView {
            id: t.id,
            display_name: t.display_name,
            monthly_price: t.monthly_price,
            setup_fee: t.setup_fee,
        })
        .collect();
    let addons = catalog::all_addons()
        .into_iter()
        .map(|a| AddonView {
            id: a.id,
            display_name: a.display_name,
            monthly_price: a.monthly_price,
        })
        .collect();
    Json(CatalogView { tiers, addons })
}

/// Start (or restart) a checkout at a tier-specific path.
///
/// Resolution order: resume token, then session snapshot, then tier
/// defaults. An unrecognized tier segment coerces to the default tier
/// rather than 404ing - marketing pages link here with arbitrary history.
#[instrument(skip(app, session, query))]
pub async fn start(
    State(app): State<AppState>,
    session: Session,
    Path(tier_slug): Path<String>,
    Query(query): Query<StartQuery>,
) -> Result<Json<CheckoutView>> {
    let url_tier = TierId::from_str(&tier_slug).unwrap_or_default();
    let store = SessionCheckoutStore::new(&session);
    let utm = query.utm();

    let hydration = if let Some(token) = query.resume {
        let token = ResumeToken::new(token);
        let fetch = app.backend().fetch_order_record(&token).await;
        let hydration = hydrate::resolve_resume(fetch, url_tier, utm);
        if hydration.warning.is_some() {
            app.analytics().track(AnalyticsEvent::ResumeFailed {
                reason: "stale_or_invalid_resume_token".to_string(),
            });
        }
        hydration
    } else if let Some(snapshot) = store.load().await {
        hydrate::from_snapshot(snapshot)
    } else {
        hydrate::defaults(url_tier, utm)
    };

    // Remember where the checkout started; reported at submission.
    let source_page = format!("/checkout/{tier_slug}");
    if let Err(e) = session.insert(session_keys::SOURCE_PAGE, &source_page).await {
        tracing::warn!("failed to store source page: {e}");
    }

    Ok(save_and_view(&session, hydration.state, hydration.step, hydration.warning).await)
}

/// Current checkout view from the session.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CheckoutView>> {
    let snapshot = require_snapshot(&session).await?;
    Ok(Json(CheckoutView::new(snapshot.state, snapshot.step, None)))
}

/// Replace the tier. Clears the add-on selection unconditionally.
#[instrument(skip(app, session))]
pub async fn set_tier(
    State(app): State<AppState>,
    session: Session,
    Form(form): Form<SetTierForm>,
) -> Result<Json<CheckoutView>> {
    let mut snapshot = require_snapshot(&session).await?;
    let event = snapshot.state.set_tier(form.tier);
    app.analytics().track(event);
    Ok(save_and_view(&session, snapshot.state, snapshot.step, None).await)
}

/// Flip an add-on's membership in the selection.
#[instrument(skip(app, session))]
pub async fn toggle_addon(
    State(app): State<AppState>,
    session: Session,
    Form(form): Form<ToggleAddonForm>,
) -> Result<Json<CheckoutView>> {
    let mut snapshot = require_snapshot(&session).await?;
    let event = snapshot.state.toggle_addon(form.addon);
    app.analytics().track(event);
    Ok(save_and_view(&session, snapshot.state, snapshot.step, None).await)
}

/// Update one buyer/consent field. No validation at this layer.
#[instrument(skip(session, form))]
pub async fn update_field(
    session: Session,
    Form(form): Form<UpdateFieldForm>,
) -> Result<Json<CheckoutView>> {
    let mut snapshot = require_snapshot(&session).await?;
    snapshot.state.update_field(form.field, &form.value);
    Ok(save_and_view(&session, snapshot.state, snapshot.step, None).await)
}

/// Advance one step.
///
/// Completing the details step emits the `details_completed` analytics
/// event. No field validation happens here: buyers may reach review with
/// required fields blank and only hear about it at submission.
#[instrument(skip(app, session))]
pub async fn next_step(
    State(app): State<AppState>,
    session: Session,
) -> Result<Json<CheckoutView>> {
    let snapshot = require_snapshot(&session).await?;
    let from = snapshot.step;
    let to = from.next();
    if from == Step::Details && to == Step::Review {
        app.analytics().track(AnalyticsEvent::DetailsCompleted {
            tier: snapshot.state.tier,
        });
    }
    Ok(save_and_view(&session, snapshot.state, to, None).await)
}

/// Go back one step.
#[instrument(skip(session))]
pub async fn back_step(session: Session) -> Result<Json<CheckoutView>> {
    let snapshot = require_snapshot(&session).await?;
    let to = snapshot.step.back();
    Ok(save_and_view(&session, snapshot.state, to, None).await)
}

/// Jump to an arbitrary step (review's "edit" affordance).
#[instrument(skip(session))]
pub async fn go_to_step(
    session: Session,
    Form(form): Form<GoToForm>,
) -> Result<Json<CheckoutView>> {
    let snapshot = require_snapshot(&session).await?;
    Ok(save_and_view(&session, snapshot.state, form.step, None).await)
}

/// Submit the finished checkout.
///
/// Preconditions are checked synchronously before any network activity;
/// a failed submission keeps the snapshot intact so the buyer can retry
/// from the review step. A confirmed submission clears the snapshot and
/// answers with the redirect URL for the client to navigate to.
#[instrument(skip(app, session, headers))]
pub async fn submit_order(
    State(app): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Json<SubmitResponse>> {
    let snapshot = require_snapshot(&session).await?;
    submit::validate(&snapshot.state)?;

    let source_page = session
        .get::<String>(session_keys::SOURCE_PAGE)
        .await
        .ok()
        .flatten()
        .unwrap_or_else(|| "/checkout".to_string());
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    app.analytics().track(submit::submitted_event(&snapshot.state));

    let payload = submit::build_payload(&snapshot.state, &source_page, user_agent);
    let response = app
        .backend()
        .create_order(&payload)
        .await
        .map_err(|e: BackendError| AppError::Submit(e.into()))?;
    let redirect_url = submit::interpret(response)?;

    SessionCheckoutStore::new(&session).clear().await;
    app.analytics().track(AnalyticsEvent::CheckoutRedirected {
        tier: snapshot.state.tier,
    });

    Ok(Json(SubmitResponse { redirect_url }))
}
