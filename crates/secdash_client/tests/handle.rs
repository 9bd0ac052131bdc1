use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use secdash_client::{
    ClientCommand, ClientEvent, ClientHandle, ClientSettings, IngestRequest, WireMode, WireStatus,
};

async fn wait_event(handle: &ClientHandle) -> ClientEvent {
    for _ in 0..500 {
        if let Some(event) = handle.try_recv() {
            return event;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("no client event within deadline");
}

#[tokio::test(flavor = "multi_thread")]
async fn submit_command_resolves_to_a_submit_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logId": "H1",
            "totalProcessed": 0,
            "totalInserted": 0,
            "totalSkipped": 0,
            "warnings": null,
            "status": "in_progress",
        })))
        .mount(&server)
        .await;

    let handle = ClientHandle::new(ClientSettings::with_base_url(server.uri()));
    handle.send(ClientCommand::Submit {
        request: IngestRequest {
            mode: WireMode::Latest,
            symbols: None,
        },
    });

    match wait_event(&handle).await {
        ClientEvent::SubmitFinished { result } => {
            let response = result.expect("submit ok");
            assert_eq!(response.log_id, "H1");
            assert_eq!(response.status, WireStatus::InProgress);
        }
        other => panic!("expected SubmitFinished, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn timers_fire_with_their_generation() {
    let server = MockServer::start().await;
    let handle = ClientHandle::new(ClientSettings::with_base_url(server.uri()));

    handle.send(ClientCommand::PollAfter {
        generation: 7,
        delay: Duration::from_millis(20),
    });
    match wait_event(&handle).await {
        ClientEvent::PollDue { generation } => assert_eq!(generation, 7),
        other => panic!("expected PollDue, got {other:?}"),
    }

    handle.send(ClientCommand::ClearAfter {
        generation: 7,
        delay: Duration::from_millis(20),
    });
    match wait_event(&handle).await {
        ClientEvent::ClearDue { generation } => assert_eq!(generation, 7),
        other => panic!("expected ClearDue, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn status_events_carry_the_generation_they_were_issued_under() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ingest/status/H1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "H1",
            "requestTimestamp": "2025-06-02T09:00:00Z",
            "mode": "latest",
            "symbols": null,
            "totalProcessed": 1,
            "totalInserted": 3,
            "totalSkipped": 0,
            "completedAt": "2025-06-02T09:00:05Z",
            "status": "completed",
            "warnings": null,
        })))
        .mount(&server)
        .await;

    let handle = ClientHandle::new(ClientSettings::with_base_url(server.uri()));
    handle.send(ClientCommand::FetchStatus {
        handle: "H1".to_string(),
        generation: 3,
    });

    match wait_event(&handle).await {
        ClientEvent::StatusFetched { generation, result } => {
            assert_eq!(generation, 3);
            let status = result.expect("status ok");
            assert_eq!(status.status, WireStatus::Completed);
            assert_eq!(status.total_inserted, 3);
        }
        other => panic!("expected StatusFetched, got {other:?}"),
    }
}
