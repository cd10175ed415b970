mod common;

use common::{pullback_in_uptrend, setup, ticker, StubMarketData, StubOptionsFlow};
use delta_ghost::application::analyze::AnalyzeOptions;
use delta_ghost::domain::error::DomainError;
use delta_ghost::domain::indicators::signal::CompositeSignal;
use delta_ghost::DeltaGhost;
use std::sync::Arc;

fn recording() -> AnalyzeOptions {
    AnalyzeOptions {
        record: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_recorded_signal_round_trips() {
    let dg = setup(StubMarketData::new().with("NVDA", pullback_in_uptrend()));
    let analysis = dg.analyze(&ticker("NVDA"), &recording()).await.unwrap();
    let id = analysis.recorded.expect("signal should be journaled");

    let record = dg.signal(&id).unwrap();
    assert_eq!(record.ticker.as_str(), "NVDA");
    assert_eq!(record.signal, CompositeSignal::Bullish);
    assert_eq!(record.close, analysis.snapshot.close.unwrap());
    assert_eq!(record.rsi_window, 14);
}

#[tokio::test]
async fn test_unknown_signal_not_found() {
    let dg = setup(StubMarketData::new());
    assert!(matches!(dg.signal("nope"), Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_history_filters() {
    let dg = setup(
        StubMarketData::new()
            .with("NVDA", pullback_in_uptrend())
            .with("AMD", pullback_in_uptrend()),
    );
    for t in ["NVDA", "AMD", "NVDA"] {
        dg.analyze(&ticker(t), &recording()).await.unwrap();
    }

    assert_eq!(dg.history(None, None, None).unwrap().len(), 3);
    assert_eq!(dg.history(Some(ticker("nvda")), None, None).unwrap().len(), 2);
    assert_eq!(dg.history(None, None, Some(1)).unwrap().len(), 1);

    let future = chrono::Utc::now() + chrono::Duration::days(1);
    assert!(dg.history(None, Some(future), None).unwrap().is_empty());
}

#[tokio::test]
async fn test_journal_persists_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("signals.db");
    let db_path = db.to_str().unwrap();

    {
        let dg = DeltaGhost::with_providers(
            db_path,
            Arc::new(StubMarketData::new().with("NVDA", pullback_in_uptrend())),
            Arc::new(StubOptionsFlow::default()),
        )
        .unwrap();
        dg.analyze(&ticker("NVDA"), &recording()).await.unwrap();
    }

    let reopened = DeltaGhost::with_providers(
        db_path,
        Arc::new(StubMarketData::new()),
        Arc::new(StubOptionsFlow::default()),
    )
    .unwrap();
    let records = reopened.history(None, None, None).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].ticker.as_str(), "NVDA");
}

#[test]
fn test_unopenable_journal_is_database_error() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("missing").join("nested").join("signals.db");

    let result = DeltaGhost::with_providers(
        db.to_str().unwrap(),
        Arc::new(StubMarketData::new()),
        Arc::new(StubOptionsFlow::default()),
    );
    assert!(matches!(result, Err(DomainError::Database(_))));
}
