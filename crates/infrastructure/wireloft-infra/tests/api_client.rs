use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use wireloft_core::{
    CreateShowRequest, EpisodeStatus, MediaProfileDraft, PreferredFormat, ShowConfig,
    ShowSettingsDraft, UpdateShowConfig,
};
use wireloft_infra::{default_http_client, ApiError, HttpApiClient, WireloftApi};

#[derive(Clone, Default)]
struct Recorded {
    bodies: Arc<Mutex<Vec<(String, Value)>>>,
}

fn show_json(id: &str) -> Value {
    json!({
        "id": id,
        "author": "Ben Shapiro",
        "title": "The Ben Shapiro Show",
        "years": "2015 - 2025",
        "episodes": [
            {"id": format!("{id}-1"), "title": "Episode 1", "index": 1, "status": "downloaded"},
            {"id": format!("{id}-2"), "title": "Episode 2", "index": 2, "status": "downloading"}
        ]
    })
}

async fn start_mock_api() -> (SocketAddr, Recorded, tokio::task::JoinHandle<()>) {
    let recorded = Recorded::default();

    let app = Router::new()
        .route(
            "/api/shows",
            get(|| async { Json(json!([show_json("ben"), show_json("mk")])) }).post(
                |State(rec): State<Recorded>, Json(body): Json<Value>| async move {
                    rec.bodies.lock().unwrap().push(("POST".into(), body));
                    StatusCode::CREATED
                },
            ),
        )
        .route(
            "/api/shows/:id",
            get(|Path(id): Path<String>| async move {
                if id == "missing" {
                    StatusCode::NOT_FOUND.into_response()
                } else {
                    Json(show_json(&id)).into_response()
                }
            })
            .put(
                |State(rec): State<Recorded>,
                 Path(id): Path<String>,
                 Json(body): Json<Value>| async move {
                    rec.bodies.lock().unwrap().push((format!("PUT {id}"), body));
                    StatusCode::NO_CONTENT
                },
            ),
        )
        .route(
            "/api/media-profiles",
            get(|| async {
                Json(json!([
                    {
                        "id": "p1",
                        "name": "Plex 4k",
                        "outputPathTemplate": "D:/Media/{show}",
                        "preferredFormat": "4k",
                        "downloadSeriesImages": true
                    }
                ]))
            }),
        )
        .route("/api/health", get(|| async { Json(json!({"status": "ok"})) }))
        .route(
            "/broken/shows",
            get(|| async { (StatusCode::OK, "<html>not json</html>") }),
        )
        .route(
            "/blank/shows",
            get(|| async { Json(json!([{"id": " ", "author": "a", "title": "t"}])) }),
        )
        .route(
            "/down/shows",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, recorded, handle)
}

fn client_for(addr: SocketAddr, prefix: &str) -> HttpApiClient {
    HttpApiClient::new(default_http_client().unwrap(), &format!("http://{addr}/{prefix}")).unwrap()
}

#[tokio::test]
async fn reads_are_decoded_into_typed_entities() {
    let (addr, _rec, server) = start_mock_api().await;
    let api = client_for(addr, "api");

    let shows = api.list_shows().await.unwrap();
    assert_eq!(shows.len(), 2);
    assert_eq!(shows[1].id, "mk");
    assert_eq!(shows[0].episodes[1].status, EpisodeStatus::Downloading);

    let show = api.get_show("ben").await.unwrap();
    assert_eq!(show.title, "The Ben Shapiro Show");

    let profiles = api.list_media_profiles().await.unwrap();
    assert_eq!(profiles[0].preferred_format, PreferredFormat::UltraHd);

    assert_eq!(api.health().await.unwrap().status, "ok");

    server.abort();
}

#[tokio::test]
async fn missing_show_maps_to_not_found() {
    let (addr, _rec, server) = start_mock_api().await;
    let api = client_for(addr, "api/");

    let err = api.get_show("missing").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::NotFound {
            what: "Show".into()
        }
    );
    assert_eq!(err.user_message(), "Show not found.");

    server.abort();
}

#[tokio::test]
async fn writes_send_camel_case_bodies() {
    let (addr, rec, server) = start_mock_api().await;
    let api = client_for(addr, "api");

    let update = UpdateShowConfig {
        config: ShowConfig {
            url: "https://www.dailywire.com/show/ben".into(),
            media_profile_id: "p1".into(),
            settings: ShowSettingsDraft {
                title_filter: "Sunday".into(),
                ..ShowSettingsDraft::default()
            },
        },
    };
    api.update_show_config("ben", &update).await.unwrap();

    let create = CreateShowRequest {
        url: "https://www.dailywire.com/show/ben".into(),
        profile: MediaProfileDraft {
            name: "Plex".into(),
            output_path_template: "D:/Media/{show}".into(),
            ..MediaProfileDraft::default()
        },
        show: ShowSettingsDraft::default(),
    };
    api.create_show(&create).await.unwrap();

    let bodies = rec.bodies.lock().unwrap().clone();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0].0, "PUT ben");
    assert_eq!(bodies[0].1["config"]["mediaProfileId"], "p1");
    assert_eq!(bodies[0].1["config"]["titleFilter"], "Sunday");
    assert_eq!(bodies[1].0, "POST");
    assert_eq!(bodies[1].1["profile"]["outputPathTemplate"], "D:/Media/{show}");
    assert_eq!(bodies[1].1["profile"]["preferredFormat"], "1080p");
    assert_eq!(bodies[1].1["show"]["downloadDays"], "180");

    server.abort();
}

#[tokio::test]
async fn malformed_and_failing_responses_are_errors() {
    let (addr, _rec, server) = start_mock_api().await;

    let err = client_for(addr, "broken").list_shows().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }), "{err:?}");

    let err = client_for(addr, "blank").list_shows().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }), "{err:?}");

    let err = client_for(addr, "down").list_shows().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }), "{err:?}");
    assert_eq!(err.user_message(), "HTTP 500");

    server.abort();
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr, "api").health().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }), "{err:?}");
}
