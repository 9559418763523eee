use crate::calendar::{month_grid, months_to_display};
use crate::errors::AppError;
use crate::models::{
    CalendarResponse, CheckInResponse, IndexQuery, Notice, RecordPoint, StatusResponse,
};
use crate::state::AppState;
use crate::stats::build_summary_at;
use crate::store::CheckInError;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Json,
};
use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let notice = query.notice.as_deref().and_then(Notice::from_query);
    let store = state.store.lock().await;
    Html(render_index(&state.config, &store, now(), notice))
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let config = &state.config;
    let today = now().date();
    let store = state.store.lock().await;

    Json(StatusResponse {
        user_name: config.user_name.clone(),
        date: today,
        period: config.period,
        in_period: config.period.contains(today),
        checked_in_at: store.record_for(today),
        locked: store.is_locked(today, config.allow_repeat_checkin_on),
        repeat_allowed: config.allow_repeat_checkin_on == Some(today),
        summary: build_summary_at(today, &store, &config.period),
    })
}

pub async fn get_records(State(state): State<AppState>) -> Json<Vec<RecordPoint>> {
    let store = state.store.lock().await;
    Json(
        store
            .records_newest_first()
            .map(|(date, time)| RecordPoint { date, time })
            .collect(),
    )
}

pub async fn get_calendar(State(state): State<AppState>) -> Json<CalendarResponse> {
    let period = &state.config.period;
    let today = now().date();
    let store = state.store.lock().await;
    let months = months_to_display(today, period)
        .into_iter()
        .map(|month| month_grid(month, today, &store, period))
        .collect();
    Json(CalendarResponse { months })
}

pub async fn check_in(State(state): State<AppState>) -> Result<Json<CheckInResponse>, AppError> {
    let response = apply_check_in(&state).await?;
    Ok(Json(response))
}

pub async fn check_in_form(State(state): State<AppState>) -> Redirect {
    let notice = match apply_check_in(&state).await {
        Ok(_) => Notice::CheckedIn,
        Err(CheckInError::AlreadyCheckedIn { .. }) => Notice::AlreadyCheckedIn,
        Err(CheckInError::OutOfPeriod { .. }) => Notice::OutOfPeriod,
    };
    Redirect::to(&format!("/?notice={}", notice.as_query()))
}

async fn apply_check_in(state: &AppState) -> Result<CheckInResponse, CheckInError> {
    let now = now();
    let config = &state.config;
    let mut store = state.store.lock().await;

    match store.check_in(now, &config.period, config.allow_repeat_checkin_on) {
        Ok(time) => {
            info!(date = %now.date(), %time, "checked in");
            Ok(CheckInResponse {
                date: now.date(),
                time,
            })
        }
        Err(err) => {
            warn!("check-in rejected: {err}");
            Err(err)
        }
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
