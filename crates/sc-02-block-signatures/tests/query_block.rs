//! # Block Query Integration Tests
//!
//! Runs `HttpBlockFetcher` and `BlockSignatureService` against an axum
//! server that mimics the node's `/block` endpoint.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::Query;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sc_02_block_signatures::{
    cancel_pair, BlockQueryError, BlockSignatureService, BlockSource, ExpiryReason, FetchContext,
    HttpBlockFetcher, NodeAddress, RpcConfig,
};
use serde_json::json;
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Seen {
    heights: Arc<Mutex<Vec<String>>>,
    user_agents: Arc<Mutex<Vec<String>>>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("sc_02_block_signatures=debug")
        .with_test_writer()
        .try_init();
}

fn alpha_beta_block() -> String {
    json!({
        "jsonrpc": "2.0",
        "id": -1,
        "result": {
            "block_id": {"hash": "0A1B"},
            "block": {
                "header": {"chain_id": "test-chain", "height": "2"},
                "data": {"txs": []},
                "last_commit": {
                    "height": "1",
                    "round": 0,
                    "block_id": {"hash": "0C1D"},
                    "signatures": [
                        {
                            "block_id_flag": 2,
                            "validator_address": hex::encode_upper("ALPHA-ADDR"),
                            "timestamp": "2021-06-01T00:00:00.000000000Z",
                            "signature": STANDARD.encode("ALPHA-SIG")
                        },
                        {
                            "block_id_flag": 2,
                            "validator_address": hex::encode_upper("BETA-ADDR"),
                            "timestamp": "2021-06-01T00:00:00.000000000Z",
                            "signature": STANDARD.encode("BETA-SIG")
                        }
                    ]
                }
            }
        }
    })
    .to_string()
}

/// Serve `app` on an ephemeral port; the server lives as long as the runtime.
async fn spawn_node(app: Router) -> NodeAddress {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    NodeAddress::parse(&format!("tcp://{}", addr)).unwrap()
}

/// Node that answers height 2 with the ALPHA/BETA block and any other height
/// with the error envelope nodes send for heights past the tip.
async fn spawn_chain_node(seen: Seen) -> NodeAddress {
    let app = Router::new().route(
        "/block",
        get(
            move |Query(params): Query<HashMap<String, String>>, headers: HeaderMap| {
                let seen = seen.clone();
                async move {
                    let height = params.get("height").cloned().unwrap_or_default();
                    seen.heights.lock().unwrap().push(height.clone());
                    if let Some(agent) = headers.get(header::USER_AGENT) {
                        seen.user_agents
                            .lock()
                            .unwrap()
                            .push(agent.to_str().unwrap_or_default().to_string());
                    }

                    if height == "2" {
                        (StatusCode::OK, alpha_beta_block())
                    } else {
                        let body = json!({
                            "jsonrpc": "2.0",
                            "id": -1,
                            "error": {
                                "code": -32603,
                                "message": "Internal error",
                                "data": format!(
                                    "height {} must be less than or equal to the current blockchain height 2",
                                    height
                                )
                            }
                        });
                        (StatusCode::INTERNAL_SERVER_ERROR, body.to_string())
                    }
                }
            },
        ),
    );
    spawn_node(app).await
}

async fn unused_node() -> NodeAddress {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    NodeAddress::parse(&format!("tcp://{}", addr)).unwrap()
}

fn service() -> BlockSignatureService<HttpBlockFetcher> {
    let config = RpcConfig::for_testing();
    BlockSignatureService::new(HttpBlockFetcher::new(&config), config)
}

#[tokio::test]
async fn test_no_listener_is_transport_error() {
    init_tracing();

    // Arrange
    let node = unused_node().await;

    // Act
    let result = service().signatures_at(&node, 1).await;

    // Assert
    match result {
        Err(BlockQueryError::Transport { node: reported, .. }) => {
            assert_eq!(reported, node.to_string());
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetches_and_decodes_signatures_at_height() {
    init_tracing();

    // Arrange
    let seen = Seen::default();
    let node = spawn_chain_node(seen.clone()).await;

    // Act
    let set = service().signatures_at(&node, 2).await.unwrap();

    // Assert
    assert_eq!(*seen.heights.lock().unwrap(), vec!["2".to_string()]);
    assert_eq!(set.height, Some(1));
    assert_eq!(set.len(), 2);
    assert_eq!(set.signatures[0].validator_address, b"ALPHA-ADDR");
    assert_eq!(set.signatures[0].signature, b"ALPHA-SIG");
    assert_eq!(set.signatures[1].validator_address, b"BETA-ADDR");
    assert_eq!(set.signatures[1].signature, b"BETA-SIG");
}

#[tokio::test]
async fn test_sends_configured_user_agent() {
    init_tracing();

    let seen = Seen::default();
    let node = spawn_chain_node(seen.clone()).await;

    service().signatures_at(&node, 2).await.unwrap();

    assert_eq!(
        *seen.user_agents.lock().unwrap(),
        vec![RpcConfig::default().user_agent]
    );
}

#[tokio::test]
async fn test_height_past_tip_is_rpc_error() {
    init_tracing();

    // Arrange
    let seen = Seen::default();
    let node = spawn_chain_node(seen.clone()).await;

    // Act
    let result = service().signatures_at(&node, 10).await;

    // Assert
    match result {
        Err(BlockQueryError::Rpc { code, message, data }) => {
            assert_eq!(code, -32603);
            assert_eq!(message, "Internal error");
            assert!(data.unwrap().starts_with("height 10"));
        }
        other => panic!("expected Rpc, got {other:?}"),
    }
    assert_eq!(*seen.heights.lock().unwrap(), vec!["10".to_string()]);
}

#[tokio::test]
async fn test_confirm_signature_over_http() {
    init_tracing();

    let node = spawn_chain_node(Seen::default()).await;
    let service = service();

    let alpha = service
        .confirm_signature(&node, 2, b"ALPHA-ADDR")
        .await
        .unwrap()
        .expect("ALPHA signed block 2");
    assert_eq!(alpha.signature, b"ALPHA-SIG");

    let gamma = service
        .confirm_signature(&node, 2, b"GAMMA-ADDR")
        .await
        .unwrap();
    assert!(gamma.is_none());
}

#[tokio::test]
async fn test_missing_endpoint_is_transport_error() {
    init_tracing();

    // Arrange: a server without a /block route answers 404 with no body
    let node = spawn_node(Router::new()).await;
    let fetcher = HttpBlockFetcher::new(&RpcConfig::for_testing());

    // Act
    let result = fetcher
        .fetch_block(&FetchContext::unbounded(), &node, 2)
        .await;

    // Assert
    match result {
        Err(BlockQueryError::Transport { reason, .. }) => assert!(reason.contains("404")),
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    init_tracing();

    let app = Router::new().route("/block", get(|| async { "<html>node is syncing</html>" }));
    let node = spawn_node(app).await;

    let err = service().signatures_at(&node, 2).await.unwrap_err();
    assert!(matches!(err, BlockQueryError::Malformed(_)));
}

#[tokio::test]
async fn test_deadline_elapses_on_slow_node() {
    init_tracing();

    // Arrange
    let app = Router::new().route(
        "/block",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            alpha_beta_block()
        }),
    );
    let node = spawn_node(app).await;
    let ctx = FetchContext::with_deadline(Duration::from_millis(100));

    // Act
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        service().signatures_at_with(&ctx, &node, 2),
    )
    .await
    .expect("deadline should end the fetch");

    // Assert
    assert_eq!(
        result.unwrap_err(),
        BlockQueryError::Timeout {
            reason: ExpiryReason::DeadlineElapsed { after_ms: 100 }
        }
    );
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_fetch() {
    init_tracing();

    // Arrange
    let app = Router::new().route(
        "/block",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            alpha_beta_block()
        }),
    );
    let node = spawn_node(app).await;
    let (source, signal) = cancel_pair();
    let ctx = FetchContext::unbounded().cancelled_by(signal);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        source.cancel();
    });

    // Act
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        service().signatures_at_with(&ctx, &node, 2),
    )
    .await
    .expect("cancel should end the fetch");

    // Assert
    assert_eq!(
        result.unwrap_err(),
        BlockQueryError::Timeout {
            reason: ExpiryReason::Cancelled
        }
    );
}
