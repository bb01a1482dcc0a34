use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use bp_api::{router, state::ApiState};
use bp_quality::{QualityScorer, ScorerConfig};
use bp_select::{TopicPool, TopicSelector};
use bp_store::{MemoryStore, UsageHistory, UsageStore};
use http_body_util::BodyExt;
use rand::{SeedableRng, rngs::StdRng};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

pub const SAMPLE_POOL: &str = r#"{
    "categories": {
        "ai": {
            "name": "Artificial Intelligence",
            "weight": 0.5,
            "topics": [
                { "id": "ai-ethics", "title": "AI Ethics in Practice", "difficulty": "beginner", "estimatedReadTime": 6 },
                { "id": "ai-agents", "title": "Building AI Agents", "difficulty": "advanced", "estimatedReadTime": 12 }
            ]
        },
        "web": {
            "name": "Web Development",
            "weight": 0.3,
            "topics": [
                { "id": "web-vitals", "title": "Core Web Vitals", "difficulty": "intermediate", "estimatedReadTime": 7 }
            ]
        },
        "career": {
            "name": "Career",
            "weight": 0.2,
            "topics": [
                { "id": "career-remote", "title": "Remote Work Habits", "difficulty": "beginner", "estimatedReadTime": 5 }
            ]
        }
    }
}"#;

/// Store handle the test keeps after handing a clone to the selector
#[derive(Clone, Default)]
pub struct SharedStore(pub Arc<MemoryStore>);

impl UsageStore for SharedStore {
    fn load_all(&self) -> Result<UsageHistory, bp_store::StoreError> {
        self.0.load_all()
    }

    fn save_all(&self, history: &UsageHistory) -> Result<(), bp_store::StoreError> {
        self.0.save_all(history)
    }
}

/// Builds an `ApiState` over an in-memory usage store and a seeded RNG
pub struct TestStateBuilder {
    pool_json: String,
    store: Box<dyn UsageStore>,
    min_quality_score: u32,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            pool_json: SAMPLE_POOL.to_string(),
            store: Box::new(SharedStore::default()),
            min_quality_score: 70,
        }
    }

    pub fn pool_json(mut self, json: &str) -> Self {
        self.pool_json = json.to_string();
        self
    }

    pub fn store(mut self, store: impl UsageStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    pub fn build(self) -> ApiState {
        let pool = TopicPool::from_json(&self.pool_json).expect("Invalid test pool");
        let selector =
            TopicSelector::new(pool, self.store).with_rng(StdRng::seed_from_u64(42));

        ApiState::from_parts(
            selector,
            QualityScorer::new(ScorerConfig::default()),
            self.min_quality_score,
        )
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Router with the full middleware stack, as `serv` runs it
pub fn app(state: ApiState) -> Router {
    router::with_middleware(
        router::router().with_state(state),
        &["http://localhost:3001".to_string()],
    )
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with no body
    pub async fn post(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.request(request).await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Unexpected status, body: {}",
            String::from_utf8_lossy(&self.body)
        );
    }

    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Response body is not the expected JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
