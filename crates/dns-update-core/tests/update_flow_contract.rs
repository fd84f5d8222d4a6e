//! Contract Test: Update Flow
//!
//! Verifies the four-step sequence against test doubles.
//!
//! Constraints verified:
//! - A stale record is submitted with only `content` replaced
//! - A current record ends the run with `Error::Noop` and no update call
//! - The record name is the subdomain when given, else the domain
//! - Progress events arrive in step order

mod common;

use common::*;
use dns_update_core::{Error, UpdateEvent, Updater};
use std::net::Ipv4Addr;

fn drain(mut rx: tokio::sync::mpsc::Receiver<UpdateEvent>) -> Vec<UpdateEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn stale_record_is_updated_with_discovered_address() {
    let address = Ipv4Addr::new(1, 2, 3, 4);
    let provider = MockDnsProvider::new("Z1", record("R1", "example.com", "9.9.9.9"));

    let (updater, _rx) = Updater::new(
        Box::new(MockIpSource::new(address)),
        Box::new(MockDnsProvider::sharing_counters_with(&provider)),
        minimal_config("example.com", None),
    )
    .expect("updater construction succeeds");

    let outcome = updater.run().await.expect("run succeeds");

    assert_eq!(outcome.record.name, "example.com");
    assert_eq!(outcome.record.content, "1.2.3.4");
    assert_eq!(outcome.previous_content, "9.9.9.9");

    let submitted = provider.submitted();
    assert_eq!(submitted.len(), 1);
    let (zone_id, sent) = &submitted[0];
    assert_eq!(zone_id, "Z1");

    // Only content differs from what the provider returned.
    assert_eq!(*sent, record("R1", "example.com", "1.2.3.4"));
}

#[tokio::test]
async fn current_record_ends_run_without_update() {
    let address = Ipv4Addr::new(1, 2, 3, 4);
    let provider = MockDnsProvider::new("Z1", record("R1", "example.com", "1.2.3.4"));

    let (updater, rx) = Updater::new(
        Box::new(MockIpSource::new(address)),
        Box::new(MockDnsProvider::sharing_counters_with(&provider)),
        minimal_config("example.com", None),
    )
    .expect("updater construction succeeds");

    let err = updater.run().await.expect_err("run stops at the record step");

    assert!(err.is_noop(), "expected Noop, got {:?}", err);
    assert_eq!(
        err.to_string(),
        "Record IP 1.2.3.4 for example.com already up to date."
    );
    assert_eq!(provider.update_call_count(), 0);

    let events = drain(rx);
    assert_eq!(events.len(), 2, "no record event for a current record: {:?}", events);
}

#[tokio::test]
async fn subdomain_is_used_as_record_name() {
    let provider = MockDnsProvider::new("Z9", record("R2", "home.example.com", "10.0.0.1"));

    let (updater, _rx) = Updater::new(
        Box::new(MockIpSource::new(Ipv4Addr::new(5, 6, 7, 8))),
        Box::new(MockDnsProvider::sharing_counters_with(&provider)),
        minimal_config("example.com", Some("home.example.com")),
    )
    .expect("updater construction succeeds");

    updater.run().await.expect("run succeeds");

    assert_eq!(provider.zone_lookups(), vec!["example.com".to_string()]);
    assert_eq!(
        provider.record_lookups(),
        vec![("Z9".to_string(), "home.example.com".to_string())]
    );
}

#[tokio::test]
async fn domain_is_used_as_record_name_without_subdomain() {
    let provider = MockDnsProvider::new("Z1", record("R1", "example.com", "9.9.9.9"));

    let (updater, _rx) = Updater::new(
        Box::new(MockIpSource::new(Ipv4Addr::new(1, 2, 3, 4))),
        Box::new(MockDnsProvider::sharing_counters_with(&provider)),
        minimal_config("example.com", None),
    )
    .expect("updater construction succeeds");

    updater.run().await.expect("run succeeds");

    assert_eq!(
        provider.record_lookups(),
        vec![("Z1".to_string(), "example.com".to_string())]
    );
}

#[tokio::test]
async fn progress_events_follow_step_order() {
    let provider = MockDnsProvider::new("Z1", record("R1", "example.com", "9.9.9.9"));

    let (updater, rx) = Updater::new(
        Box::new(MockIpSource::new(Ipv4Addr::new(1, 2, 3, 4))),
        Box::new(provider),
        minimal_config("example.com", None),
    )
    .expect("updater construction succeeds");

    updater.run().await.expect("run succeeds");

    assert_eq!(
        drain(rx),
        vec![
            UpdateEvent::AddressDiscovered {
                address: Ipv4Addr::new(1, 2, 3, 4)
            },
            UpdateEvent::ZoneResolved {
                zone_id: "Z1".to_string()
            },
            UpdateEvent::RecordResolved {
                record_id: "R1".to_string(),
                name: "example.com".to_string()
            },
            UpdateEvent::RecordUpdated {
                name: "example.com".to_string(),
                content: "1.2.3.4".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn invalid_config_is_rejected_before_any_call() {
    let source = MockIpSource::new(Ipv4Addr::new(1, 2, 3, 4));

    let result = Updater::new(
        Box::new(MockIpSource::sharing_counters_with(&source)),
        Box::new(MockDnsProvider::new("Z1", record("R1", "", "9.9.9.9"))),
        minimal_config("", None),
    );

    assert!(matches!(result, Err(Error::Config(_))));
    assert_eq!(source.current_call_count(), 0);
}
