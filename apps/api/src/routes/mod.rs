pub mod health;

use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::events::handlers as events;
use crate::records::handlers as records;
use crate::records::targets;
use crate::state::AppState;
use crate::summary::handlers as summary;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Activity records
        .route(
            "/api/v1/car",
            get(records::handle_current_car).post(records::handle_submit_car),
        )
        .route(
            "/api/v1/ac",
            get(records::handle_today_ac).post(records::handle_submit_ac),
        )
        .route(
            "/api/v1/snow-removal",
            get(records::handle_today_snow_removal).post(records::handle_submit_snow_removal),
        )
        .route("/api/v1/records", get(records::handle_monthly_records))
        // Monthly targets
        .route(
            "/api/v1/targets",
            get(targets::handle_get_target).put(targets::handle_put_target),
        )
        // Summaries
        .route("/api/v1/summary/daily", get(summary::handle_daily_summary))
        .route(
            "/api/v1/summary/monthly",
            get(summary::handle_monthly_summaries),
        )
        .route(
            "/api/v1/summary/monthly/:user_id",
            get(summary::handle_user_monthly_summary),
        )
        // Events & participation
        .route(
            "/api/v1/events",
            get(events::handle_list_events).post(events::handle_create_event),
        )
        .route(
            "/api/v1/events/participations",
            get(events::handle_list_participations).post(events::handle_register_participation),
        )
        .route(
            "/api/v1/events/participations/:event_id",
            delete(events::handle_cancel_participation),
        )
        // Admin
        .route("/api/v1/admin/users", get(events::handle_list_users))
        .route(
            "/api/v1/admin/participations",
            put(events::handle_review_participation),
        )
        .with_state(state)
}
