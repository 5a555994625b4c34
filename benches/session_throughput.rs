//! Session throughput benchmarks.
//!
//! Measures the gate and registry under load with an oracle that answers
//! immediately and headless surfaces:
//! - Verified navigations across many tabs
//! - Tab churn (open/close cycles)
//! - Pure verdict routing
//!
//! Run with: cargo bench --bench session_throughput
//! Results saved to: target/criterion/

use std::hint::black_box;
use std::sync::Arc;

use async_trait::async_trait;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tokio::runtime::Runtime;

use phishgate::gate::{RouteRequest, route};
use phishgate::{
    HeadlessSurfaceFactory, RecordId, Result, Session, SessionConfig, TabId, Verdict,
    VerificationClient, VerificationResult,
};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const TAB_COUNTS: &[usize] = &[10, 100, 500];

// ============================================================================
// Oracle
// ============================================================================

struct ImmediateVerifier;

#[async_trait]
impl VerificationClient for ImmediateVerifier {
    async fn verify(&self, url: &str) -> Result<VerificationResult> {
        let verdict = if url.contains("evil") {
            Verdict::Deceptive
        } else {
            Verdict::Safe
        };
        Ok(VerificationResult::new(verdict, Some(RecordId::from(1))))
    }

    async fn report_user_action(&self, _record_id: &RecordId) -> Result<()> {
        Ok(())
    }
}

fn new_session() -> (Session, tokio::sync::mpsc::UnboundedReceiver<phishgate::Notification>) {
    Session::new(
        SessionConfig::new(),
        Arc::new(ImmediateVerifier),
        Box::new(HeadlessSurfaceFactory::new()),
    )
    .expect("default config is valid")
}

// ============================================================================
// Benchmark: Verified Navigations
// ============================================================================

async fn verify_tabs(count: usize) {
    let (mut session, _notifications) = new_session();

    for i in 0..count {
        let url = if i % 4 == 0 {
            "https://evil.example/login"
        } else {
            "https://safe.example/"
        };
        session.open_tab(url, None, false, None).expect("open tab");
    }

    for _ in 0..count {
        black_box(session.process_next_completion().await);
    }

    session.shutdown();
}

fn bench_verified_navigation(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");

    let mut group = c.benchmark_group("verified_navigation");
    for &count in TAB_COUNTS {
        group.bench_with_input(BenchmarkId::new("tabs", count), &count, |b, &tab_count| {
            b.to_async(&rt).iter(|| verify_tabs(tab_count));
        });
    }
    group.finish();
}

// ============================================================================
// Benchmark: Tab Churn
// ============================================================================

fn bench_tab_churn(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");

    let mut group = c.benchmark_group("tab_churn");
    for &count in TAB_COUNTS {
        group.bench_with_input(BenchmarkId::new("open_close", count), &count, |b, &tab_count| {
            b.to_async(&rt).iter(|| async move {
                let (mut session, _notifications) = new_session();
                let mut opened = Vec::with_capacity(tab_count);
                for _ in 0..tab_count {
                    opened.push(session.open_tab("", None, false, None).expect("open tab"));
                }
                for id in opened {
                    session.close_tab(id).expect("live tab");
                }
                black_box(session.tab_order().len());
            });
        });
    }
    group.finish();
}

// ============================================================================
// Benchmark: Routing
// ============================================================================

fn bench_route(c: &mut Criterion) {
    let tab_id = TabId::new(7).expect("non-zero");
    let record = RecordId::from("r1");

    c.bench_function("route_all_verdicts", |b| {
        b.iter(|| {
            for verdict in [
                Verdict::Safe,
                Verdict::Unverified,
                Verdict::Deceptive,
                Verdict::Suspicious,
                Verdict::ServiceError,
                Verdict::RedirectionAttempt,
            ] {
                black_box(route(
                    &RouteRequest {
                        verdict,
                        tab_id,
                        url: "https://bench.example/",
                        record_id: Some(&record),
                    },
                    "http://localhost",
                ));
            }
        });
    });
}

criterion_group!(benches, bench_verified_navigation, bench_tab_churn, bench_route);
criterion_main!(benches);
