//! Retrieval and language model clients against a throwaway local HTTP server

use std::net::SocketAddr;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use axum::extract::Multipart;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::post;
use axum::Json;
use axum::Router;
use citerag::config::LlmConfig;
use citerag::config::RetrievalConfig;
use citerag::llm::LanguageModel;
use citerag::llm::LlmService;
use citerag::models::DocumentStatus;
use citerag::models::DocumentUpload;
use citerag::retrieval::DocumentRetrieval;
use citerag::retrieval::DocumentStore;
use citerag::retrieval::RetrievalClient;
use citerag::tenant::TenantScope;
use citerag::CiteRagError;
use serde_json::json;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
struct RecordedUpload {
    file_name: String,
    bytes: Vec<u8>,
    partition: String,
    metadata: Value,
}

#[derive(Default)]
struct StubService {
    /// Number of requests answered with `fail_status` before succeeding
    failures_before_success: usize,
    fail_status: u16,
    calls: AtomicUsize,
    bodies: Mutex<Vec<Value>>,
    auth_headers: Mutex<Vec<String>>,
    partitions: Mutex<Vec<String>>,
    uploads: Mutex<Vec<RecordedUpload>>,
    documents_body: Value,
    completion_body: Value,
}

impl StubService {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Count the call and return the configured failure, if it is not used up yet
    fn record(&self, headers: &HeaderMap) -> Option<Response> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
            self.auth_headers.lock().unwrap().push(auth.to_string());
        }
        if n < self.failures_before_success {
            let status = StatusCode::from_u16(self.fail_status).unwrap();
            return Some((status, "temporarily unavailable").into_response());
        }
        None
    }
}

async fn retrievals(
    State(stub): State<Arc<StubService>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    stub.bodies.lock().unwrap().push(body);
    if let Some(failure) = stub.record(&headers) {
        return failure;
    }

    Json(json!({
        "scored_chunks": [
            {"text": "Refunds are accepted within 30 days.", "score": 0.93,
             "id": "chunk-1", "document_id": "doc-1", "metadata": {"page_number": 3}},
            {"text": "Store credit after 30 days.", "score": 0.71,
             "chunk_id": "chunk-2", "document_id": "doc-2", "page_number": "7"},
            {"text": "Unpaged passage.", "score": 0.42, "id": "chunk-3", "document_id": "doc-3"}
        ]
    }))
    .into_response()
}

async fn upload_document(
    State(stub): State<Arc<StubService>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Some(failure) = stub.record(&headers) {
        return failure;
    }

    let mut upload = RecordedUpload::default();
    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name().unwrap_or_default().to_string().as_str() {
            "file" => {
                upload.file_name = field.file_name().unwrap_or_default().to_string();
                upload.bytes = field.bytes().await.unwrap().to_vec();
            }
            "partition" => upload.partition = field.text().await.unwrap(),
            "metadata" => upload.metadata = serde_json::from_str(&field.text().await.unwrap()).unwrap(),
            _ => {}
        }
    }
    let name = upload.file_name.clone();
    let partition = upload.partition.clone();
    stub.uploads.lock().unwrap().push(upload);

    Json(json!({
        "id": "doc-new",
        "name": name,
        "status": "partitioning",
        "partition": partition,
    }))
    .into_response()
}

async fn list_documents(State(stub): State<Arc<StubService>>, headers: HeaderMap) -> Response {
    if let Some(partition) = headers.get("partition").and_then(|v| v.to_str().ok()) {
        stub.partitions.lock().unwrap().push(partition.to_string());
    }
    if let Some(failure) = stub.record(&headers) {
        return failure;
    }
    Json(stub.documents_body.clone()).into_response()
}

async fn chat_completions(
    State(stub): State<Arc<StubService>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    stub.bodies.lock().unwrap().push(body);
    if let Some(failure) = stub.record(&headers) {
        return failure;
    }
    Json(stub.completion_body.clone()).into_response()
}

async fn spawn_stub(stub: Arc<StubService>) -> SocketAddr {
    let app = Router::new()
        .route("/retrievals", post(retrievals))
        .route("/documents", post(upload_document).get(list_documents))
        .route("/chat/completions", post(chat_completions))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn retrieval_client(addr: SocketAddr) -> RetrievalClient {
    let config = RetrievalConfig {
        endpoint: format!("http://{addr}"),
        api_token: "test-token".to_string(),
        timeout_secs: 5,
        ..RetrievalConfig::default()
    };
    RetrievalClient::new(&config).unwrap()
}

fn llm_service(addr: SocketAddr) -> LlmService {
    let config = LlmConfig {
        llm_endpoint: format!("http://{addr}/"),
        llm_key: "sk-test".to_string(),
        llm_model: "gpt-4o".to_string(),
        timeout_secs: 5,
        ..LlmConfig::default()
    };
    LlmService::new(&config).unwrap()
}

#[tokio::test]
async fn search_sends_scoped_request_and_normalizes_chunks() {
    let stub = Arc::new(StubService::default());
    let client = retrieval_client(spawn_stub(stub.clone()).await);
    let scope = TenantScope::for_client("acme");

    let passages = client.search(&scope, "What is the refund policy?", 8).await.unwrap();

    assert_eq!(passages.len(), 3);
    assert_eq!(passages[0].chunk_id, "chunk-1");
    assert_eq!(passages[0].page_number, Some(3));
    assert_eq!(passages[1].chunk_id, "chunk-2");
    assert_eq!(passages[1].page_number, Some(7));
    assert_eq!(passages[2].page_number, None);

    let bodies = stub.bodies.lock().unwrap().clone();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["query"], "What is the refund policy?");
    assert_eq!(bodies[0]["partition"], "client_acme");
    assert_eq!(bodies[0]["top_k"], 8);
    assert_eq!(bodies[0]["rerank"], true);
    assert_eq!(bodies[0]["recency_bias"], true);
    assert_eq!(stub.auth_headers.lock().unwrap()[0], "Bearer test-token");
}

#[tokio::test]
async fn search_retries_server_errors() {
    let stub = Arc::new(StubService {
        failures_before_success: 2,
        fail_status: 503,
        ..StubService::default()
    });
    let client = retrieval_client(spawn_stub(stub.clone()).await);

    let passages = client
        .search(&TenantScope::for_client("acme"), "refunds", 4)
        .await
        .unwrap();

    assert_eq!(passages.len(), 3);
    assert_eq!(stub.calls(), 3);
}

#[tokio::test]
async fn search_gives_up_after_max_attempts() {
    let stub = Arc::new(StubService {
        failures_before_success: usize::MAX,
        fail_status: 500,
        ..StubService::default()
    });
    let client = retrieval_client(spawn_stub(stub.clone()).await);

    let err = client
        .search(&TenantScope::for_client("acme"), "refunds", 4)
        .await
        .unwrap_err();

    assert!(matches!(err, CiteRagError::UpstreamStatus { status: 500, .. }));
    assert_eq!(stub.calls(), 3);
}

#[tokio::test]
async fn search_does_not_retry_client_errors() {
    let stub = Arc::new(StubService {
        failures_before_success: usize::MAX,
        fail_status: 401,
        ..StubService::default()
    });
    let client = retrieval_client(spawn_stub(stub.clone()).await);

    let err = client
        .search(&TenantScope::for_client("acme"), "refunds", 4)
        .await
        .unwrap_err();

    match err {
        CiteRagError::UpstreamStatus { status, message, .. } => {
            assert_eq!(status, 401);
            assert_eq!(message, "temporarily unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn upload_sends_multipart_with_tenant_metadata() {
    let stub = Arc::new(StubService::default());
    let client = retrieval_client(spawn_stub(stub.clone()).await);

    let document = client
        .upload(
            &TenantScope::for_client("acme"),
            DocumentUpload {
                file_name: "refunds.txt".to_string(),
                bytes: b"Refunds within 30 days.".to_vec(),
            },
        )
        .await
        .unwrap();

    assert_eq!(document.id, "doc-new");
    assert_eq!(document.status, DocumentStatus::Partitioning);

    let uploads = stub.uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].file_name, "refunds.txt");
    assert_eq!(uploads[0].bytes, b"Refunds within 30 days.");
    assert_eq!(uploads[0].partition, "client_acme");
    assert_eq!(uploads[0].metadata["client_id"], "acme");
    assert_eq!(uploads[0].metadata["source"], "rag_agent");
    let timestamp = uploads[0].metadata["upload_timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn upload_is_not_retried() {
    let stub = Arc::new(StubService {
        failures_before_success: usize::MAX,
        fail_status: 503,
        ..StubService::default()
    });
    let client = retrieval_client(spawn_stub(stub.clone()).await);

    let result = client
        .upload(
            &TenantScope::for_client("acme"),
            DocumentUpload {
                file_name: "refunds.pdf".to_string(),
                bytes: vec![1, 2, 3],
            },
        )
        .await;

    assert!(result.is_err());
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn list_documents_sends_partition_header() {
    let stub = Arc::new(StubService {
        documents_body: json!({
            "documents": [
                {"id": "doc-1", "name": "refunds.pdf", "status": "ready"},
                {"id": "doc-2", "name": "faq.docx", "status": "summary_indexed"}
            ],
            "pagination": {"next_cursor": null}
        }),
        ..StubService::default()
    });
    let client = retrieval_client(spawn_stub(stub.clone()).await);

    let documents = client
        .list_documents(&TenantScope::for_client("globex"))
        .await
        .unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].status, DocumentStatus::Ready);
    assert_eq!(documents[1].status, DocumentStatus::Indexed);
    assert_eq!(stub.partitions.lock().unwrap().clone(), vec!["client_globex"]);
}

#[tokio::test]
async fn list_documents_with_unsendable_partition_fails_without_retry() {
    let stub = Arc::new(StubService::default());
    let client = retrieval_client(spawn_stub(stub.clone()).await);

    let err = client
        .list_documents(&TenantScope::for_client("acme\r\nx-injected: 1"))
        .await
        .unwrap_err();

    assert!(matches!(err, CiteRagError::InvalidRequest(_)));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn list_documents_accepts_single_object() {
    let stub = Arc::new(StubService {
        documents_body: json!({"id": "only", "status": "failed"}),
        ..StubService::default()
    });
    let client = retrieval_client(spawn_stub(stub.clone()).await);

    let documents = client
        .list_documents(&TenantScope::for_client("acme"))
        .await
        .unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].status, DocumentStatus::Failed);
}

#[tokio::test]
async fn chat_completion_returns_first_choice() {
    let stub = Arc::new(StubService {
        completion_body: json!({
            "choices": [{"message": {"role": "assistant", "content": "Within 30 days [1]."}}]
        }),
        ..StubService::default()
    });
    let llm = llm_service(spawn_stub(stub.clone()).await);

    let answer = llm.complete("system text", "user text").await.unwrap();

    assert_eq!(answer, "Within 30 days [1].");
    assert_eq!(llm.model_name(), "gpt-4o");
    let bodies = stub.bodies.lock().unwrap().clone();
    assert_eq!(bodies[0]["model"], "gpt-4o");
    assert_eq!(bodies[0]["messages"][0]["role"], "system");
    assert_eq!(bodies[0]["messages"][0]["content"], "system text");
    assert_eq!(bodies[0]["messages"][1]["role"], "user");
    assert_eq!(bodies[0]["messages"][1]["content"], "user text");
    assert!(bodies[0].get("temperature").is_none());
    assert_eq!(stub.auth_headers.lock().unwrap()[0], "Bearer sk-test");
}

#[tokio::test]
async fn chat_completion_without_choices_is_malformed() {
    let stub = Arc::new(StubService {
        completion_body: json!({"choices": []}),
        ..StubService::default()
    });
    let llm = llm_service(spawn_stub(stub.clone()).await);

    let err = llm.complete("system", "user").await.unwrap_err();

    assert!(matches!(err, CiteRagError::MalformedResponse(_)));
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn chat_completion_retries_rate_limits() {
    let stub = Arc::new(StubService {
        failures_before_success: 1,
        fail_status: 429,
        completion_body: json!({"choices": [{"message": {"content": "ok"}}]}),
        ..StubService::default()
    });
    let llm = llm_service(spawn_stub(stub.clone()).await);

    assert_eq!(llm.complete("system", "user").await.unwrap(), "ok");
    assert_eq!(stub.calls(), 2);
}
