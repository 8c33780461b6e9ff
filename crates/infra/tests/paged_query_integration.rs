//! Integration tests for the paged query client over the real transport
//!
//! **Purpose**: Test the critical path from query resolution → HTTP →
//! cursor following → normalization
//!
//! **Coverage:**
//! - Happy path: 3-page calendar chain drained in order, views derived
//! - Auth failure mid-chain: 401 on a cursor fetch aborts the call
//! - Identity path: messages come back exactly as served
//!
//! **Infrastructure:**
//! - WireMock HTTP server (simulates the collection API)
//! - GraphTransport with a static bearer token

use std::sync::Arc;

use chrono::TimeZone;
use graphfeed_core::{calendar_event_view, PagedQueryClient};
use graphfeed_domain::{Collection, DateRange, GraphFeedError, QuerySpec};
use graphfeed_infra::{GraphTransport, GraphTransportConfig, StaticAccessToken};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Opt-in log output for debugging: RUST_LOG=debug cargo test
static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
});

const PREFER_BERLIN: &str = "outlook.timezone=\"Europe/Berlin\"";

fn client_for(server: &MockServer) -> PagedQueryClient {
    Lazy::force(&TRACING);
    let config = GraphTransportConfig {
        base_url: format!("{}/v1.0", server.uri()),
        ..GraphTransportConfig::default()
    };
    let transport = GraphTransport::new(config, Arc::new(StaticAccessToken::new("test-token")))
        .expect("transport");
    PagedQueryClient::new(Arc::new(transport))
}

/// A week-long explicit window so the request parameters are deterministic.
fn berlin_week_spec() -> QuerySpec {
    QuerySpec {
        filter_range: Some(DateRange {
            start: chrono::Utc.with_ymd_and_hms(2024, 1, 7, 0, 0, 0).single().expect("start"),
            end: chrono::Utc.with_ymd_and_hms(2024, 1, 13, 23, 59, 59).single().expect("end"),
        }),
        time_zone: chrono_tz::Europe::Berlin,
        ..QuerySpec::default()
    }
}

fn event(subject: &str, organizer: &str, hour: u32) -> Value {
    json!({
        "subject": subject,
        "organizer": { "emailAddress": { "name": organizer } },
        "start": { "dateTime": format!("2024-01-08T{hour:02}:00:00.0000000") },
        "end": { "dateTime": format!("2024-01-08T{hour:02}:30:00.0000000") },
        "bodyPreview": format!("{subject} agenda")
    })
}

#[tokio::test]
async fn drains_a_three_page_calendar_chain_into_views() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/me/calendarview"))
        .and(query_param("startDateTime", "2024-01-07T00:00:00.000Z"))
        .and(query_param("endDateTime", "2024-01-13T23:59:59.000Z"))
        .and(query_param("$orderby", "start/dateTime ASC"))
        .and(query_param("$top", "25"))
        .and(header("Prefer", PREFER_BERLIN))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [event("Standup", "Jane Doe", 9), event("Planning", "Adele Vance", 10)],
            "@odata.nextLink":
                format!("{}/v1.0/me/calendarview?%24skiptoken=p2", server.uri())
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/me/calendarview"))
        .and(query_param("$skiptoken", "p2"))
        .and(header("Prefer", PREFER_BERLIN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [event("Design review", "Megan Bowen", 11)],
            "@odata.nextLink":
                format!("{}/v1.0/me/calendarview?%24skiptoken=p3", server.uri())
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/me/calendarview"))
        .and(query_param("$skiptoken", "p3"))
        .and(header("Prefer", PREFER_BERLIN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [event("Retro", "Alex Wilber", 15)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let views = client
        .fetch_all_with(Collection::CalendarView, berlin_week_spec(), calendar_event_view)
        .await
        .expect("chain completes");

    assert_eq!(views.len(), 4);
    let subjects: Vec<&str> = views.iter().map(|v| v.subject.as_str()).collect();
    assert_eq!(subjects, ["Standup", "Planning", "Design review", "Retro"]);

    assert_eq!(views[0].organizer_first_name, "Jane");
    assert_eq!(views[0].organizer_last_name, "Doe");
    assert_eq!(views[0].description, "Standup agenda");
    assert!(views.iter().all(|v| v.status == "Created"));
}

#[tokio::test]
async fn auth_rejection_on_a_cursor_fetch_aborts_the_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/me/calendarview"))
        .and(query_param("startDateTime", "2024-01-07T00:00:00.000Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [event("Standup", "Jane Doe", 9)],
            "@odata.nextLink":
                format!("{}/v1.0/me/calendarview?%24skiptoken=p2", server.uri())
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/me/calendarview"))
        .and(query_param("$skiptoken", "p2"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .fetch_all_with(Collection::CalendarView, berlin_week_spec(), calendar_event_view)
        .await
        .expect_err("must abort");

    assert!(matches!(err, GraphFeedError::Auth(_)));

    // Exactly two requests reached the server: the failed cursor fetch was
    // not replayed.
    assert_eq!(server.received_requests().await.map_or(0, |r| r.len()), 2);
}

#[tokio::test]
async fn messages_pass_through_exactly_as_served() {
    let served = json!({
        "subject": "Weekly report",
        "from": { "emailAddress": { "name": "Jane Doe", "address": "jane@contoso.com" } },
        "isRead": false,
        "flag": { "flagStatus": "flagged" },
        "receivedDateTime": "2024-01-02T08:30:00Z"
    });

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/me/messages"))
        .and(query_param("$orderby", "receivedDateTime DESC"))
        .and(query_param("$top", "10"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "value": [served.clone()] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let records = client
        .fetch_all(Collection::Messages, QuerySpec::default())
        .await
        .expect("page");

    assert_eq!(records, vec![served]);
}
