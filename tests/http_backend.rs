use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thought_web::config::ApiEndpoint;
use thought_web::graph_state::{
    NewThought, Position, ThoughtId, ThoughtKind,
};
use thought_web::persistence::{HttpBackend, PersistError, ThoughtBackend};

const ASSIGNED_ID: &str = "665f1c2a9b1e4a0012345678";

#[derive(Clone, Default)]
struct Stub {
    records: Arc<Mutex<Vec<Value>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl Stub {
    fn with_records(records: Vec<Value>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            bodies: Arc::default(),
        }
    }

    fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}

async fn list(State(stub): State<Stub>) -> Json<Value> {
    Json(Value::Array(stub.records.lock().unwrap().clone()))
}

async fn create(
    State(stub): State<Stub>,
    Json(body): Json<Value>,
) -> Json<Value> {
    stub.bodies.lock().unwrap().push(body.clone());
    let mut record = body;
    record["_id"] = json!(ASSIGNED_ID);
    stub.records.lock().unwrap().push(record.clone());
    Json(record)
}

async fn update(
    State(stub): State<Stub>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    stub.bodies.lock().unwrap().push(body.clone());
    let mut records = stub.records.lock().unwrap();
    match records.iter_mut().find(|r| r["_id"] == id) {
        Some(record) => {
            record["x"] = body["x"].clone();
            record["y"] = body["y"].clone();
            Json(record.clone())
        }
        None => Json(Value::Null),
    }
}

async fn serve(router: Router) -> ApiEndpoint {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    ApiEndpoint::parse(&format!("http://{addr}")).unwrap()
}

async fn backend_for(stub: Stub) -> HttpBackend {
    let router = Router::new()
        .route("/api/thoughts", get(list).post(create))
        .route("/api/thoughts/{id}", put(update))
        .with_state(stub);
    HttpBackend::new(serve(router).await)
}

fn record(id: &str, x: f32, y: f32, connections: &[&str]) -> Value {
    json!({
        "_id": id,
        "title": format!("thought {id}"),
        "content": "",
        "type": "note",
        "x": x,
        "y": y,
        "color": "#E0F5E9",
        "connections": connections,
        "createdAt": "2024-05-01T10:00:00Z",
        "__v": 0
    })
}

#[tokio::test]
async fn fetch_all_decodes_the_collection() {
    let stub = Stub::with_records(vec![
        record("a", 10.0, 20.0, &["b"]),
        record("b", 300.0, 200.0, &[]),
    ]);
    let backend = backend_for(stub).await;

    let nodes = backend.fetch_all().await.unwrap();

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].id.as_str(), "a");
    assert_eq!(nodes[0].kind, ThoughtKind::Note);
    assert_eq!(nodes[0].position, Position::new(10.0, 20.0));
    assert_eq!(nodes[0].connections, vec![ThoughtId::from("b")]);
}

#[tokio::test]
async fn create_posts_the_full_draft_and_returns_the_assigned_id() {
    let stub = Stub::default();
    let backend = backend_for(stub.clone()).await;
    let draft = NewThought::new(
        "Final Project",
        "",
        ThoughtKind::Task,
        None,
        "2024-05-01T10:00:00Z".parse().unwrap(),
    );

    let node = backend.create(draft).await.unwrap();

    assert_eq!(node.id.as_str(), ASSIGNED_ID);
    assert_eq!(node.title, "Final Project");
    let bodies = stub.bodies();
    let sent = &bodies[0];
    assert_eq!(sent["type"], "task");
    assert_eq!(sent["color"], "#D3E4FD");
    assert_eq!(sent["x"], 50.0);
    assert_eq!(sent["y"], 50.0);
    assert_eq!(sent["connections"], json!([]));
    assert!(sent.get("createdAt").is_some());
    assert!(sent.get("_id").is_none());
}

#[tokio::test]
async fn update_position_sends_only_coordinates() {
    let stub = Stub::with_records(vec![record("a", 0.0, 0.0, &[])]);
    let backend = backend_for(stub.clone()).await;

    let node = backend
        .update_position(&"a".into(), Position::new(850.0, 15.0))
        .await
        .unwrap();

    assert_eq!(node.position, Position::new(850.0, 15.0));
    assert_eq!(stub.bodies(), vec![json!({ "x": 850.0, "y": 15.0 })]);
}

#[tokio::test]
async fn update_of_unknown_id_is_reported() {
    let backend = backend_for(Stub::default()).await;

    let result = backend
        .update_position(&"ghost".into(), Position::new(1.0, 1.0))
        .await;

    assert!(matches!(
        result,
        Err(PersistError::UnknownId(id)) if id.as_str() == "ghost"
    ));
}

#[tokio::test]
async fn server_errors_surface_as_status() {
    let router = Router::new().route(
        "/api/thoughts",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let backend = HttpBackend::new(serve(router).await);

    match backend.fetch_all().await {
        Err(PersistError::Status { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/api/thoughts"));
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let endpoint = ApiEndpoint::parse(&format!("http://{addr}")).unwrap();
    let backend = HttpBackend::with_client(client, endpoint);

    assert!(matches!(
        backend.fetch_all().await,
        Err(PersistError::Transport(_))
    ));
    assert!(matches!(
        backend
            .update_position(&"a".into(), Position::new(1.0, 1.0))
            .await,
        Err(PersistError::Transport(_))
    ));
}
