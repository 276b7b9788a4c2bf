//! Client against an in-process stub of the booking backend

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use barber_client::{
    ApiClient, BookingDetails, BookingError, ClientConfig, ClientError, PendingWatcher,
    Reservation, ReservationStatus, ReservationWatcher, Session, Slot, SlotCandidate, UserRole,
};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Backend {
    reservations: Mutex<Vec<Value>>,
    slots: Mutex<Vec<Value>>,
    status_calls: AtomicUsize,
    reservation_posts: AtomicUsize,
    slot_posts: AtomicUsize,
    rating_posts: AtomicUsize,
}

impl Backend {
    fn with_reservations(reservations: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            reservations: Mutex::new(reservations),
            ..Self::default()
        })
    }

    fn with_slots(self: Arc<Self>, slots: Vec<Value>) -> Arc<Self> {
        *self.slots.lock().unwrap() = slots;
        self
    }

    fn set_status(&self, id: &str, status: &str) {
        let mut list = self.reservations.lock().unwrap();
        if let Some(r) = list.iter_mut().find(|r| r["id"] == id) {
            r["status"] = json!(status);
        }
    }
}

fn reservation_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "barberId": "b1",
        "clientId": "c1",
        "slot": "2030-01-01T09:00:00Z",
        "serviceName": "Cut",
        "serviceDurationMinutes": 30,
        "notes": "",
        "status": status,
    })
}

fn slot_json(id: &str, start: &str, end: &str) -> Value {
    json!({ "id": id, "barberId": "b1", "start": start, "end": end })
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, (StatusCode, &'static str)> {
    if body["password"] != "secret" {
        return Err((StatusCode::UNAUTHORIZED, "Invalid username or password"));
    }
    let (id, role, barber_id) = match body["username"].as_str() {
        Some("bob") => ("u2", "BARBER", Some("b1")),
        _ => ("c1", "CLIENT", None),
    };
    Ok(Json(json!({
        "id": id,
        "username": body["username"],
        "role": role,
        "barberId": barber_id,
        "token": "tok-1",
    })))
}

async fn client_reservations(
    State(backend): State<Arc<Backend>>,
    Path(client_id): Path<String>,
) -> Json<Value> {
    let list = backend.reservations.lock().unwrap();
    let mine: Vec<Value> = list
        .iter()
        .filter(|r| r["clientId"] == client_id.as_str())
        .cloned()
        .collect();
    Json(Value::Array(mine))
}

async fn barber_all(State(backend): State<Arc<Backend>>) -> Json<Value> {
    Json(Value::Array(backend.reservations.lock().unwrap().clone()))
}

async fn barber_pending(State(backend): State<Arc<Backend>>) -> Json<Value> {
    let list = backend.reservations.lock().unwrap();
    let pending: Vec<Value> = list
        .iter()
        .filter(|r| r["status"] == "PENDING")
        .cloned()
        .collect();
    Json(Value::Array(pending))
}

async fn update_status(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, &'static str)> {
    backend.status_calls.fetch_add(1, Ordering::SeqCst);
    let status = body["status"].as_str().unwrap_or_default().to_string();
    backend.set_status(&id, &status);
    let list = backend.reservations.lock().unwrap();
    list.iter()
        .find(|r| r["id"] == id.as_str())
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Reservation not found"))
}

async fn create_reservation(
    State(backend): State<Arc<Backend>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let n = backend.reservation_posts.fetch_add(1, Ordering::SeqCst) + 1;
    let mut created = body;
    created["id"] = json!(format!("new-{n}"));
    created["status"] = json!("PENDING");
    backend.reservations.lock().unwrap().push(created.clone());
    Json(created)
}

async fn create_slot(State(backend): State<Arc<Backend>>) -> (StatusCode, &'static str) {
    backend.slot_posts.fetch_add(1, Ordering::SeqCst);
    (StatusCode::CONFLICT, "Slot overlaps an existing slot")
}

async fn barber_slots(State(backend): State<Arc<Backend>>) -> Json<Value> {
    Json(Value::Array(backend.slots.lock().unwrap().clone()))
}

async fn delete_slot(Path(id): Path<String>) -> String {
    format!("Slot {id} deleted")
}

async fn my_rating(Query(query): Query<HashMap<String, String>>) -> StatusCode {
    if query.get("clientId").is_some_and(|c| c == "c1") {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::BAD_REQUEST
    }
}

async fn create_rating(
    State(backend): State<Arc<Backend>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    backend.rating_posts.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "id": "rt1",
        "barberId": body["barberId"],
        "clientId": body["clientId"],
        "reservationId": body["reservationId"],
        "rating": body["rating"],
        "feedback": body["feedback"],
    }))
}

async fn barbers() -> Json<Value> {
    Json(json!([
        {
            "id": "b1",
            "username": "bob",
            "name": "Bob",
            "bio": "Fades",
            "createdAt": "2029-06-01T10:00:00Z",
            "ratingAverage": 4.5,
            "ratingCount": 2,
        },
        { "id": "carl", "username": "carl", "name": "Carl", "ratingAverage": 0.0, "ratingCount": 0 },
    ]))
}

async fn user(Path(id): Path<String>) -> Result<Json<Value>, (StatusCode, &'static str)> {
    match id.as_str() {
        "u2" | "bob" => Ok(Json(json!({
            "id": "u2",
            "username": "bob",
            "role": "BARBER",
            "barberId": "b1",
            "bio": "Fades",
            "avatarUrl": null,
        }))),
        _ => Err((StatusCode::NOT_FOUND, "User not found")),
    }
}

async fn rating_summary(Path(barber_id): Path<String>) -> Json<Value> {
    if barber_id == "b1" {
        Json(json!({ "averageRating": 4.5, "reviewCount": 2 }))
    } else {
        Json(json!({ "averageRating": 0.0, "reviewCount": 0 }))
    }
}

async fn broken_average() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn spawn_backend(backend: Arc<Backend>) -> String {
    // no all-merged route: the client must fall back to /all
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/users/barbers", get(barbers))
        .route("/api/users/{id}", get(user))
        .route("/api/barbers/{id}/rating-summary", get(rating_summary))
        .route("/api/reservations", post(create_reservation))
        .route("/api/reservations/client/{id}", get(client_reservations))
        .route("/api/reservations/barber/{id}/all", get(barber_all))
        .route("/api/reservations/barber/{id}/pending", get(barber_pending))
        .route("/api/reservations/{id}/status", put(update_status))
        .route("/api/slots", post(create_slot))
        .route("/api/slots/barber/{id}", get(barber_slots))
        .route("/api/slots/{id}", delete(delete_slot))
        .route("/api/ratings", post(create_rating))
        .route("/api/ratings/reservation/{id}/mine", get(my_rating))
        .route("/api/ratings/barber/{id}/average", get(broken_average))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn api(base_url: &str) -> ApiClient {
    ClientConfig::new(base_url).build_api_client().unwrap()
}

#[tokio::test]
async fn test_wrong_password_surfaces_body_text() {
    let base = spawn_backend(Backend::with_reservations(vec![])).await;
    let mut session = Session::new(ClientConfig::new(&base)).unwrap();

    let err = session.sign_in("cleo", "nope", None).await.unwrap_err();
    assert!(
        matches!(err, ClientError::Unauthorized(ref msg) if msg == "Invalid username or password"),
        "{err:?}"
    );
    assert!(!session.is_signed_in());
}

#[tokio::test]
async fn test_empty_error_body_uses_status_reason() {
    let base = spawn_backend(Backend::with_reservations(vec![])).await;
    let err = api(&base).barber_average("b1").await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Internal Server Error");
}

#[tokio::test]
async fn test_client_cancels_then_barber_cannot_approve() {
    let backend = Backend::with_reservations(vec![reservation_json("r1", "PENDING")]);
    let base = spawn_backend(backend.clone()).await;

    let mut client = Session::new(ClientConfig::new(&base)).unwrap();
    let profile = client.sign_in("cleo", "secret", Some(UserRole::Client)).await.unwrap();
    assert_eq!(profile.role, UserRole::Client);
    assert_eq!(client.api().token(), Some("tok-1"));

    let mine = client.my_reservations().await.unwrap();
    assert_eq!(mine.len(), 1);
    let cancelled = client.cancel(&mine[0]).await.unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(backend.status_calls.load(Ordering::SeqCst), 1);

    let mut barber = Session::new(ClientConfig::new(&base)).unwrap();
    barber.sign_in("bob", "secret", None).await.unwrap();
    let err = barber.approve(&cancelled).await.unwrap_err();
    assert!(err.is_local(), "{err:?}");
    assert_eq!(backend.status_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_history_falls_back_to_all() {
    let backend = Backend::with_reservations(vec![
        reservation_json("r1", "PENDING"),
        reservation_json("r2", "COMPLETED"),
    ]);
    let base = spawn_backend(backend).await;

    let history = api(&base).barber_history("b1").await.unwrap();
    let ids: Vec<&str> = history.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2"]);
}

#[tokio::test]
async fn test_overlapping_slot_is_rejected_without_request() {
    let backend = Backend::with_reservations(vec![]);
    let base = spawn_backend(backend.clone()).await;
    let api = api(&base);

    let now = Utc.with_ymd_and_hms(2030, 1, 1, 8, 0, 0).unwrap();
    let existing = vec![Slot {
        id: "s1".into(),
        barber_id: "b1".into(),
        start: Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2030, 1, 1, 9, 30, 0).unwrap(),
    }];

    let clash_start = existing[0].start + Duration::minutes(15);
    let clash = SlotCandidate::with_duration("b1", clash_start, 30).unwrap();
    let err = api.create_slot(&clash, &existing, &now).await.unwrap_err();
    assert!(err.is_local(), "{err:?}");

    let past = SlotCandidate::with_duration("b1", now - Duration::hours(1), 30).unwrap();
    let err = api.create_slot(&past, &existing, &now).await.unwrap_err();
    assert!(err.is_local(), "{err:?}");
    assert_eq!(backend.slot_posts.load(Ordering::SeqCst), 0);

    // passes locally, the backend still refuses it
    let free = SlotCandidate::with_duration("b1", existing[0].end, 30).unwrap();
    let err = api.create_slot(&free, &existing, &now).await.unwrap_err();
    assert!(
        matches!(err, ClientError::Conflict(ref msg) if msg == "Slot overlaps an existing slot"),
        "{err:?}"
    );
    assert_eq!(backend.slot_posts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_barber_publishes_slot_through_session() {
    let backend = Backend::with_reservations(vec![]);
    let base = spawn_backend(backend.clone()).await;

    let mut session = Session::new(ClientConfig::new(&base)).unwrap();
    let err = session
        .publish_slot(Utc::now() + Duration::days(1), 30, &Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotSignedIn));

    session.sign_in("bob", "secret", Some(UserRole::Barber)).await.unwrap();
    let now = Utc::now();
    let err = session
        .publish_slot(now - Duration::days(1), 30, &now)
        .await
        .unwrap_err();
    assert!(err.is_local(), "{err:?}");
    assert_eq!(backend.slot_posts.load(Ordering::SeqCst), 0);

    let err = session
        .publish_slot(now + Duration::days(1), 30, &now)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Conflict(_)), "{err:?}");
    assert_eq!(backend.slot_posts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_barber_directory_and_profiles() {
    let base = spawn_backend(Backend::with_reservations(vec![])).await;
    let api = api(&base);

    let barbers = api.barbers().await.unwrap();
    let ids: Vec<&str> = barbers.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["b1", "carl"]);
    assert_eq!(barbers[0].name, "Bob");
    assert_eq!(barbers[0].rating_count, 2);
    assert!(barbers[1].bio.is_none());

    let summary = api.barber_rating_summary("b1").await.unwrap();
    assert_eq!(summary.average_rating, 4.5);
    assert_eq!(summary.review_count, 2);
    let empty = api.barber_rating_summary("carl").await.unwrap();
    assert_eq!(empty.review_count, 0);

    let by_name = api.user("bob").await.unwrap();
    assert_eq!(by_name.id, "u2");
    assert_eq!(by_name.role, UserRole::Barber);
    assert_eq!(by_name.barber_id.as_deref(), Some("b1"));

    let err = api.user("nobody").await.unwrap_err();
    assert!(
        matches!(err, ClientError::NotFound(ref msg) if msg == "User not found"),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_client_books_only_open_slots() {
    let mut held = reservation_json("r1", "APPROVED");
    held["slot"] = json!("2030-01-01T10:00:00Z");
    let backend = Backend::with_reservations(vec![held]).with_slots(vec![
        slot_json("gone", "2029-12-31T09:00:00Z", "2029-12-31T10:00:00Z"),
        slot_json("held", "2030-01-01T10:00:00Z", "2030-01-01T11:00:00Z"),
        slot_json("free", "2030-01-01T12:00:00Z", "2030-01-01T13:00:00Z"),
    ]);
    let base = spawn_backend(backend.clone()).await;
    let now = Utc.with_ymd_and_hms(2030, 1, 1, 8, 0, 0).unwrap();

    let mut session = Session::new(ClientConfig::new(&base)).unwrap();
    session.sign_in("cleo", "secret", None).await.unwrap();

    let barber = session.api().barbers().await.unwrap().remove(0);
    let open = session.open_slots(&barber.id, now).await.unwrap();
    let ids: Vec<&str> = open.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["free"]);

    let details = || BookingDetails {
        service_name: "Cut".into(),
        service_duration_minutes: 30,
        notes: String::new(),
    };
    let held: Slot = serde_json::from_value(slot_json(
        "held",
        "2030-01-01T10:00:00Z",
        "2030-01-01T11:00:00Z",
    ))
    .unwrap();
    let err = session.book(&held, details(), now).await.unwrap_err();
    assert!(
        matches!(err, ClientError::Booking(BookingError::SlotUnavailable { ref slot_id }) if slot_id == "held"),
        "{err:?}"
    );
    assert_eq!(backend.reservation_posts.load(Ordering::SeqCst), 0);

    let booked = session.book(&open[0], details(), now).await.unwrap();
    assert_eq!(booked.status, ReservationStatus::Pending);
    assert_eq!(booked.slot, open[0].start);
    assert_eq!(backend.reservation_posts.load(Ordering::SeqCst), 1);

    // now held by the new reservation
    let err = session.book(&open[0], details(), now).await.unwrap_err();
    assert!(err.is_local(), "{err:?}");
    assert_eq!(backend.reservation_posts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_delete_slot_returns_text_and_encodes_id() {
    let base = spawn_backend(Backend::with_reservations(vec![])).await;
    let text = api(&base).delete_slot("s 1").await.unwrap();
    assert_eq!(text, "Slot s 1 deleted");
}

#[tokio::test]
async fn test_no_content_means_no_rating() {
    let backend = Backend::with_reservations(vec![]);
    let base = spawn_backend(backend.clone()).await;
    let api = api(&base);

    assert!(api.my_rating("r1", "c1").await.unwrap().is_none());

    let done: Reservation = serde_json::from_value(reservation_json("r1", "COMPLETED")).unwrap();
    let rating = api
        .rate_reservation(&done, 5, Some("Sharp".into()))
        .await
        .unwrap();
    assert_eq!(rating.rating, 5.0);
    assert_eq!(rating.feedback.as_deref(), Some("Sharp"));
    assert_eq!(backend.rating_posts.load(Ordering::SeqCst), 1);

    let pending: Reservation = serde_json::from_value(reservation_json("r2", "PENDING")).unwrap();
    let err = api.rate_reservation(&pending, 5, None).await.unwrap_err();
    assert!(err.is_local());
    assert_eq!(backend.rating_posts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_watcher_badge_follows_backend_changes() {
    let backend = Backend::with_reservations(vec![reservation_json("r1", "PENDING")]);
    let base = spawn_backend(backend.clone()).await;
    let api = api(&base);
    let watcher = ReservationWatcher::new();

    let update = watcher.poll(&api, "c1").await.unwrap().unwrap();
    assert_eq!(update.badge, 0);
    watcher.mark_seen();

    backend.set_status("r1", "DECLINED");
    let update = watcher.poll(&api, "c1").await.unwrap().unwrap();
    assert_eq!(update.badge, 1);
    assert_eq!(update.newly_declined, vec!["r1".to_string()]);

    watcher.mark_seen();
    assert_eq!(watcher.badge(), 0);
}

#[tokio::test]
async fn test_polling_task_feeds_pending_watcher() {
    let backend = Backend::with_reservations(vec![
        reservation_json("r1", "PENDING"),
        reservation_json("r2", "PENDING"),
    ]);
    let base = spawn_backend(backend.clone()).await;

    let config = ClientConfig::new(&base)
        .with_badge_poll_interval(std::time::Duration::from_millis(20));
    let mut session = Session::new(config).unwrap();
    session.sign_in("bob", "secret", None).await.unwrap();

    let watcher = Arc::new(PendingWatcher::new());
    let handle = session.watch_pending(&watcher).unwrap();

    tokio::time::timeout(std::time::Duration::from_secs(5), async {
        while watcher.badge() != 2 {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("pending count never arrived");

    watcher.acknowledge();
    assert_eq!(watcher.badge(), 0);

    backend.set_status("r1", "APPROVED");
    handle.refresh();
    tokio::time::timeout(std::time::Duration::from_secs(5), async {
        while watcher.count() != 1 {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("refresh never applied");
    assert_eq!(watcher.badge(), 1);

    handle.shutdown().await;
}
