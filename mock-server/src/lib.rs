use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub duration: f64,
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

#[derive(Deserialize)]
pub struct TimeRangeParams {
    pub before: Option<String>,
    pub after: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct SingleEventParams {
    pub id: String,
}

pub type Db = Arc<Vec<Activity>>;

type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, String)>;

pub fn app() -> Router {
    app_with(Vec::new())
}

pub fn app_with(activities: Vec<Activity>) -> Router {
    let db: Db = Arc::new(activities);
    Router::new()
        .route("/time-range", get(time_range))
        .route("/single-event", get(single_event))
        .with_state(db)
}

pub async fn run_with(listener: TcpListener, activities: Vec<Activity>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(activities)).await
}

fn parse_instant(name: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, (StatusCode, String)> {
    value
        .map(|v| {
            DateTime::parse_from_rfc3339(v)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid {name} '{v}': {e}")))
        })
        .transpose()
}

/// Activities with `after <= timestamp < before`, newest first.
async fn time_range(State(db): State<Db>, Query(params): Query<TimeRangeParams>) -> ApiResult<Vec<Activity>> {
    let before = parse_instant("before", params.before.as_deref())?;
    let after = parse_instant("after", params.after.as_deref())?;

    let mut selected: Vec<Activity> = db
        .iter()
        .filter(|a| before.map_or(true, |b| a.timestamp < b))
        .filter(|a| after.map_or(true, |t| a.timestamp >= t))
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    if let Some(limit) = params.limit.filter(|&l| l > 0) {
        selected.truncate(limit);
    }

    tracing::info!(count = selected.len(), "time-range");
    Ok(Json(ApiResponse { data: selected }))
}

async fn single_event(State(db): State<Db>, Query(params): Query<SingleEventParams>) -> ApiResult<Activity> {
    match db.iter().find(|a| a.id == params.id) {
        Some(activity) => Ok(Json(ApiResponse {
            data: activity.clone(),
        })),
        None => {
            tracing::info!(id = %params.id, "single-event miss");
            Err((StatusCode::NOT_FOUND, "not found".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_serializes_timestamp_as_rfc3339() {
        let activity = Activity {
            id: "a1".to_string(),
            timestamp: "2024-01-02T03:04:05Z".parse().unwrap(),
            duration: 1.5,
            data: serde_json::json!({"k": "v"}),
            raw: None,
        };
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["id"], "a1");
        assert_eq!(json["timestamp"], "2024-01-02T03:04:05Z");
        assert_eq!(json["duration"], 1.5);
        assert!(json.get("raw").is_none());
    }

    #[test]
    fn parse_instant_accepts_millis_z() {
        let t = parse_instant("before", Some("2024-01-02T03:04:05.000Z")).unwrap().unwrap();
        assert_eq!(t, "2024-01-02T03:04:05Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn parse_instant_absent_is_none() {
        assert!(parse_instant("after", None).unwrap().is_none());
    }

    #[test]
    fn parse_instant_rejects_garbage() {
        let (status, body) = parse_instant("after", Some("yesterday")).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("invalid after"));
    }
}
