use crate::assessment::{self, Questionnaire, Recommendation};
use crate::booking::{BookingRequest, Notifier};
use crate::error::AppError;
use crate::infra::AppState;
use crate::resources::{self, ResourceFilter};
use crate::scheduling::{
    availability_grid, group_by_date, RandomAvailability, SeededAvailability, DEFAULT_AVAILABILITY,
};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) fn api_routes<N>() -> Router
where
    N: Notifier + 'static,
{
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint::<N>))
        .route("/metrics", get(metrics_endpoint::<N>))
        .route("/api/v1/questionnaire", get(questionnaire_endpoint))
        .route("/api/v1/assessment", post(assessment_endpoint::<N>))
        .route("/api/v1/dashboard", get(dashboard_endpoint::<N>))
        .route("/api/v1/slots", get(slots_endpoint))
        .route("/api/v1/resources", get(resources_endpoint))
        .route("/api/v1/bookings", post(booking_endpoint::<N>))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint<N>(
    Extension(state): Extension<AppState<N>>,
) -> impl IntoResponse
where
    N: Notifier + 'static,
{
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint<N>(
    Extension(state): Extension<AppState<N>>,
) -> impl IntoResponse
where
    N: Notifier + 'static,
{
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Serialize)]
pub(crate) struct QuestionnaireResponse {
    pub(crate) questions: &'static [assessment::Question],
}

pub(crate) async fn questionnaire_endpoint() -> Json<QuestionnaireResponse> {
    Json(QuestionnaireResponse {
        questions: Questionnaire::standard().questions(),
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssessmentRequest {
    pub(crate) answers: Vec<u8>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssessmentResponse {
    pub(crate) score: u8,
    pub(crate) wellness_score: u8,
    pub(crate) recommendation: Recommendation,
    pub(crate) message: &'static str,
}

/// Score a completed answer set and publish the score for the dashboard.
pub(crate) async fn assessment_endpoint<N>(
    Extension(state): Extension<AppState<N>>,
    Json(payload): Json<AssessmentRequest>,
) -> Result<Json<AssessmentResponse>, AppError>
where
    N: Notifier + 'static,
{
    let questionnaire = Questionnaire::standard();
    let outcome = assessment::score_answers(&questionnaire, &payload.answers)?;
    state.mailbox.publish(outcome.score);

    Ok(Json(AssessmentResponse {
        score: outcome.score,
        wellness_score: assessment::wellness_score(outcome.score),
        recommendation: outcome.recommendation,
        message: outcome.recommendation.label(),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DashboardResponse {
    pub(crate) wellness_score: u8,
    pub(crate) anxiety_level: u8,
    pub(crate) stress_level: u8,
    pub(crate) sleep_quality: u8,
    pub(crate) mood_score: u8,
    pub(crate) insights: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) latest_assessment: Option<LatestAssessment>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LatestAssessment {
    pub(crate) score: u8,
    pub(crate) recommendation: Recommendation,
}

fn baseline_dashboard() -> DashboardResponse {
    DashboardResponse {
        wellness_score: 70,
        anxiety_level: 4,
        stress_level: 6,
        sleep_quality: 3,
        mood_score: 5,
        insights: vec![
            "You've been sleeping less than 6 hours. Try to get 7-9 hours of sleep.",
            "You reported feeling down 3 days last week. Consider talking to someone.",
            "Your physical activity has decreased by 20% compared to last month.",
        ],
        latest_assessment: None,
    }
}

/// Dashboard snapshot. Consumes the latest assessment score if one is
/// waiting in the mailbox; a second read returns the baseline only.
pub(crate) async fn dashboard_endpoint<N>(
    Extension(state): Extension<AppState<N>>,
) -> Json<DashboardResponse>
where
    N: Notifier + 'static,
{
    let mut snapshot = baseline_dashboard();
    if let Some(score) = state.mailbox.take() {
        snapshot.wellness_score = assessment::wellness_score(score);
        snapshot.latest_assessment = Some(LatestAssessment {
            score,
            recommendation: Recommendation::for_score(score),
        });
    }
    Json(snapshot)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SlotsQuery {
    pub(crate) start: Option<NaiveDate>,
    /// Seed for a reproducible grid; omitted in production traffic.
    pub(crate) seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SlotsResponse {
    pub(crate) start: NaiveDate,
    pub(crate) days: Vec<DayView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DayView {
    pub(crate) date: NaiveDate,
    pub(crate) slots: Vec<SlotView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SlotView {
    pub(crate) time: String,
    pub(crate) available: bool,
}

pub(crate) async fn slots_endpoint(Query(query): Query<SlotsQuery>) -> Json<SlotsResponse> {
    let start = query.start.unwrap_or_else(|| Local::now().date_naive());
    let slots = match query.seed {
        Some(seed) => availability_grid(
            start,
            &mut SeededAvailability::new(seed, DEFAULT_AVAILABILITY),
        ),
        None => availability_grid(start, &mut RandomAvailability::default()),
    };

    let days = group_by_date(&slots)
        .into_iter()
        .map(|day| DayView {
            date: day.date,
            slots: day
                .slots
                .iter()
                .map(|slot| SlotView {
                    time: slot.time_label(),
                    available: slot.available,
                })
                .collect(),
        })
        .collect();

    Json(SlotsResponse { start, days })
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResourcesQuery {
    #[serde(default)]
    pub(crate) language: Option<String>,
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) q: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResourcesResponse {
    pub(crate) resources: Vec<resources::Resource>,
    pub(crate) languages: Vec<&'static str>,
    pub(crate) categories: Vec<&'static str>,
}

pub(crate) async fn resources_endpoint(
    Query(query): Query<ResourcesQuery>,
) -> Json<ResourcesResponse> {
    let directory = resources::directory();
    let filter = ResourceFilter::new(
        query.language.as_deref().unwrap_or(resources::ALL),
        query.category.as_deref().unwrap_or(resources::ALL),
        query.q.as_deref().unwrap_or(""),
    );

    Json(ResourcesResponse {
        resources: resources::filter_resources(directory, &filter),
        languages: resources::languages(directory),
        categories: resources::categories(directory),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingSubmission {
    pub(crate) user_email: String,
    pub(crate) user_name: String,
    pub(crate) date: NaiveDate,
    pub(crate) time: String,
    #[serde(default)]
    pub(crate) notes: String,
    #[serde(default)]
    pub(crate) counsellor_email: Option<String>,
}

/// Booking submission: both notifications go out, then success is declared.
pub(crate) async fn booking_endpoint<N>(
    Extension(state): Extension<AppState<N>>,
    Json(payload): Json<BookingSubmission>,
) -> Result<Json<serde_json::Value>, AppError>
where
    N: Notifier + 'static,
{
    let counsellor_email = payload
        .counsellor_email
        .unwrap_or_else(|| state.counsellor_email.clone());

    let request = BookingRequest {
        user_email: payload.user_email,
        user_name: payload.user_name,
        date: payload.date,
        time: payload.time,
        notes: payload.notes,
        counsellor_email,
    };

    state.bookings.confirm(&request).map_err(AppError::from)?;
    Ok(Json(json!({ "success": true })))
}
