//! Batch resolution flow against in-process mock DNS servers:
//! dispatch → worker pool → UDP exchange → decoded resolutions.

#[path = "../common/mod.rs"]
mod common;

use common::ScriptedDnsServer;
use shoal_dns_application::Resolver;
use shoal_dns_domain::{RecordKind, Resolution};
use shoal_dns_infrastructure::dns::UdpExchange;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

fn collect(mut rx: mpsc::Receiver<Resolution>) -> JoinHandle<Vec<Resolution>> {
    tokio::spawn(async move {
        let mut results = Vec::new();
        while let Some(resolution) = rx.recv().await {
            results.push(resolution);
        }
        results
    })
}

fn zone_table() -> HashMap<String, Vec<Ipv4Addr>> {
    HashMap::from([
        (
            "a.example.".to_string(),
            vec![Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(192, 0, 2, 2)],
        ),
        ("b.example.".to_string(), vec![Ipv4Addr::new(192, 0, 2, 3)]),
        ("c.example.".to_string(), vec![Ipv4Addr::new(192, 0, 2, 4)]),
    ])
}

#[tokio::test]
async fn test_complete_batch_resolution() {
    common::init_tracing();
    let (server, addr) = ScriptedDnsServer::start(zone_table()).await.unwrap();

    let exchange = Arc::new(UdpExchange::new(Duration::from_secs(2)));
    let resolver = Resolver::new(RecordKind::A, 1, 2, exchange).unwrap();
    let (tx, rx) = mpsc::channel(16);
    let consumer = collect(rx);

    let domains = vec![
        "a.example".to_string(),
        "b.example".to_string(),
        "c.example".to_string(),
    ];
    resolver
        .resolve_batch(
            &domains,
            &[addr.to_string()],
            tx,
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let mut results = consumer.await.unwrap();
    results.sort_by(|a, b| a.name.cmp(&b.name));

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].name.as_ref(), "a.example");
    assert_eq!(
        results[0].destinations,
        vec!["192.0.2.1".to_string(), "192.0.2.2".to_string()]
    );
    assert_eq!(results[1].destinations, vec!["192.0.2.3".to_string()]);
    assert_eq!(results[2].destinations, vec!["192.0.2.4".to_string()]);

    server.shutdown();
}

#[tokio::test]
async fn test_failover_to_answering_server() {
    common::init_tracing();
    let (dead, dead_addr) = ScriptedDnsServer::start_silent().await.unwrap();
    let (live, live_addr) = ScriptedDnsServer::start(zone_table()).await.unwrap();

    let exchange = Arc::new(UdpExchange::new(Duration::from_millis(250)));
    let resolver = Resolver::new(RecordKind::A, 1, 1, exchange).unwrap();
    let (tx, rx) = mpsc::channel(16);
    let consumer = collect(rx);

    // With one worker and retries = 1, every query's rotation window covers
    // both servers, so each resolution survives the dead one.
    resolver
        .resolve_batch(
            &["a.example".to_string(), "b.example".to_string()],
            &[dead_addr.to_string(), live_addr.to_string()],
            tx,
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let results = consumer.await.unwrap();
    assert_eq!(results.len(), 2);

    dead.shutdown();
    live.shutdown();
}

#[tokio::test]
async fn test_unknown_domains_are_dropped_silently() {
    common::init_tracing();
    let (server, addr) = ScriptedDnsServer::start(zone_table()).await.unwrap();

    let exchange = Arc::new(UdpExchange::new(Duration::from_secs(2)));
    let resolver = Resolver::new(RecordKind::A, 0, 2, exchange).unwrap();
    let (tx, rx) = mpsc::channel(16);
    let consumer = collect(rx);

    resolver
        .resolve_batch(
            &[
                "a.example".to_string(),
                "missing.example".to_string(),
                "b.example".to_string(),
            ],
            &[addr.to_string()],
            tx,
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let mut names: Vec<String> = consumer
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name.to_string())
        .collect();
    names.sort();

    // The unknown name got an empty answer: a valid success, never emitted.
    assert_eq!(names, vec!["a.example".to_string(), "b.example".to_string()]);

    server.shutdown();
}

#[tokio::test]
async fn test_silent_pool_resolves_nothing_and_stream_closes() {
    common::init_tracing();
    let (server, addr) = ScriptedDnsServer::start_silent().await.unwrap();

    let exchange = Arc::new(UdpExchange::new(Duration::from_millis(150)));
    let resolver = Resolver::new(RecordKind::A, 0, 2, exchange).unwrap();
    let (tx, rx) = mpsc::channel(16);
    let consumer = collect(rx);

    resolver
        .resolve_batch(
            &["a.example".to_string(), "b.example".to_string()],
            &[addr.to_string()],
            tx,
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert!(consumer.await.unwrap().is_empty());

    server.shutdown();
}
