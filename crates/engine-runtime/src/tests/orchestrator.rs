use crate::{
    error::BatchError,
    tests::fakes::{Call, FakeFactory, Harness, Scripted, job, rows, source},
};
use model::{
    catalog::source::DatabaseKind,
    core::identifiers::{ExecutionId, JobId, SourceId},
    execution::record::ExecutionStatus,
};
use tracing_test::traced_test;

const BAD_COLUMN: &str = "Invalid column name 'does_not_exist'.";

#[tokio::test]
async fn source_without_jobs_yields_empty_report() {
    let h = Harness::new(
        vec![source(1, DatabaseKind::SqlServer)],
        vec![],
        FakeFactory::new(),
    );

    let report = h.orchestrator.run_batch(SourceId::new(1), "alice").await.unwrap();

    assert_eq!(report.source_name, "source-1");
    assert_eq!(report.total_jobs, 0);
    assert!(report.results.is_empty());
    assert!(h.store.is_empty().await);
    assert!(h.factory.spy.calls().is_empty());
}

#[tokio::test]
async fn unknown_source_creates_no_records_on_repeat() {
    let h = Harness::new(
        vec![source(1, DatabaseKind::SqlServer)],
        vec![job(1, 1, "SELECT 1")],
        FakeFactory::new(),
    );

    for _ in 0..2 {
        let err = h
            .orchestrator
            .run_batch(SourceId::new(404), "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, BatchError::SourceNotFound(id) if id == SourceId::new(404)));
    }
    assert!(h.store.is_empty().await);
    assert!(h.sink.events().is_empty());
}

#[tokio::test]
async fn inactive_source_is_not_found() {
    let mut inactive = source(2, DatabaseKind::SqlServer);
    inactive.is_active = false;
    let h = Harness::new(vec![inactive], vec![job(1, 2, "SELECT 1")], FakeFactory::new());

    let err = h
        .orchestrator
        .run_batch(SourceId::new(2), "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, BatchError::SourceNotFound(_)));
    assert!(h.store.is_empty().await);
}

#[tokio::test]
async fn every_job_is_reported_despite_failures() {
    let factory = FakeFactory::new()
        .script("q1", Scripted::Fail("timeout".into()))
        .script("q2", Scripted::Rows(rows(2)))
        .script("q3", Scripted::Fail("deadlock victim".into()))
        .script("q4", Scripted::Rows(rows(1)));
    let jobs = (1..=4).map(|i| job(i, 1, &format!("q{i}"))).collect();
    let h = Harness::new(vec![source(1, DatabaseKind::SqlServer)], jobs, factory);

    let report = h.orchestrator.run_batch(SourceId::new(1), "alice").await.unwrap();

    assert_eq!(report.total_jobs, 4);
    assert_eq!(report.results.len(), 4);
    assert_eq!(report.completed(), 2);
    assert_eq!(report.failed(), 2);
    assert_eq!(report.rows_loaded(), 3);
    assert_eq!(h.store.len().await, 4);
}

#[tokio::test]
async fn failed_query_is_recorded_and_batch_continues() {
    let factory = FakeFactory::new()
        .script("bad", Scripted::Fail(BAD_COLUMN.into()))
        .script("good", Scripted::Rows(rows(1)));
    let h = Harness::new(
        vec![source(1, DatabaseKind::SqlServer)],
        vec![job(1, 1, "bad"), job(2, 1, "good")],
        factory,
    );

    let report = h.orchestrator.run_batch(SourceId::new(1), "alice").await.unwrap();

    let failed = &report.results[0];
    let record = h
        .orchestrator
        .get_record(failed.execution_id.unwrap())
        .await
        .unwrap();
    assert_eq!(record.status, ExecutionStatus::Failed);
    assert!(record.error_message.unwrap().contains(BAD_COLUMN));
    assert!(record.elapsed_seconds.is_some());
    assert!(record.completed_at.is_some());

    assert_eq!(report.results[1].job_id, JobId::new(2));
    assert!(report.results[1].is_completed());
}

#[tokio::test]
async fn zero_rows_completes_without_load() {
    let factory = FakeFactory::new().script("empty", Scripted::Rows(rows(0)));
    let h = Harness::new(
        vec![source(1, DatabaseKind::SqlServer)],
        vec![job(1, 1, "empty")],
        factory,
    );

    let report = h.orchestrator.run_batch(SourceId::new(1), "alice").await.unwrap();

    assert_eq!(report.results[0].rows(), Some(0));
    assert_eq!(
        h.factory
            .spy
            .count(|c| matches!(c, Call::Insert { .. })),
        0
    );
    assert_eq!(h.factory.spy.count(|c| *c == Call::Close), 1);
    assert!(h.sink.types().contains(&"load.skipped"));

    let record = h.store.all().await.remove(0);
    assert_eq!(record.status, ExecutionStatus::Completed);
    assert_eq!(record.rows_processed, Some(0));
}

#[tokio::test]
async fn unsupported_kind_fails_every_job() {
    let h = Harness::new(
        vec![source(3, DatabaseKind::MySql)],
        vec![job(1, 3, "SELECT 1"), job(2, 3, "SELECT 2"), job(3, 3, "SELECT 3")],
        FakeFactory::new(),
    );

    let report = h.orchestrator.run_batch(SourceId::new(3), "alice").await.unwrap();

    assert_eq!(report.total_jobs, 3);
    for result in &report.results {
        assert!(result.error().unwrap().contains("mysql"));
    }
    assert!(h.factory.spy.calls().is_empty());
    let records = h.store.all().await;
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.status == ExecutionStatus::Failed));
}

#[tokio::test]
async fn jobs_run_in_id_order() {
    let factory = FakeFactory::new();
    let h = Harness::new(
        vec![source(1, DatabaseKind::SqlServer)],
        vec![job(30, 1, "c"), job(10, 1, "a"), job(20, 1, "b")],
        factory,
    );

    let report = h.orchestrator.run_batch(SourceId::new(1), "alice").await.unwrap();

    let ids: Vec<u64> = report.results.iter().map(|r| r.job_id.get()).collect();
    assert_eq!(ids, vec![10, 20, 30]);
    let queries: Vec<Call> = h
        .factory
        .spy
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Query(_)))
        .collect();
    assert_eq!(
        queries,
        vec![
            Call::Query("a".into()),
            Call::Query("b".into()),
            Call::Query("c".into())
        ]
    );
}

#[tokio::test]
async fn running_record_exists_before_connect() {
    let h = Harness::new(
        vec![source(1, DatabaseKind::SqlServer)],
        vec![job(1, 1, "a"), job(2, 1, "b")],
        FakeFactory::new(),
    );

    h.orchestrator.run_batch(SourceId::new(1), "alice").await.unwrap();

    // Exactly one running record (the current job's) at every connect.
    assert_eq!(h.factory.running_at_connect(), vec![1, 1]);
}

#[tokio::test]
#[traced_test]
async fn alice_scenario() {
    let factory = FakeFactory::new()
        .script("SELECT id, label FROM widgets", Scripted::Rows(rows(3)))
        .script(
            "SELECT does_not_exist FROM widgets",
            Scripted::Fail(BAD_COLUMN.into()),
        );
    let h = Harness::new(
        vec![source(7, DatabaseKind::SqlServer)],
        vec![
            job(1, 7, "SELECT id, label FROM widgets"),
            job(2, 7, "SELECT does_not_exist FROM widgets"),
        ],
        factory,
    );

    let report = h.orchestrator.run_batch(SourceId::new(7), "alice").await.unwrap();

    assert_eq!(report.source_name, "source-7");
    assert_eq!(report.total_jobs, 2);
    assert_eq!(report.results[0].job_id, JobId::new(1));
    assert_eq!(report.results[0].status(), ExecutionStatus::Completed);
    assert_eq!(report.results[0].rows(), Some(3));
    assert_eq!(report.results[1].job_id, JobId::new(2));
    assert_eq!(report.results[1].status(), ExecutionStatus::Failed);
    assert!(report.results[1].error().unwrap().contains(BAD_COLUMN));

    let records = h.store.all().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].status, ExecutionStatus::Completed);
    assert_eq!(records[1].status, ExecutionStatus::Failed);
    assert!(records.iter().all(|r| r.executed_by == "alice"));

    assert_eq!(
        h.sink.types(),
        vec![
            "batch.started",
            "job.started",
            "job.completed",
            "job.started",
            "job.failed",
            "batch.completed"
        ]
    );
    assert!(logs_contain("Batch finished"));
}

#[tokio::test]
async fn get_record_reports_missing_ids() {
    let h = Harness::new(vec![source(1, DatabaseKind::SqlServer)], vec![], FakeFactory::new());
    let err = h
        .orchestrator
        .get_record(ExecutionId::new(99))
        .await
        .unwrap_err();
    assert!(matches!(err, BatchError::RecordNotFound(_)));
}

#[tokio::test]
async fn history_lists_newest_first() {
    let factory = FakeFactory::new().script("q", Scripted::Rows(rows(1)));
    let h = Harness::new(
        vec![source(1, DatabaseKind::SqlServer)],
        vec![job(5, 1, "q")],
        factory,
    );

    h.orchestrator.run_batch(SourceId::new(1), "alice").await.unwrap();
    h.orchestrator.run_batch(SourceId::new(1), "bob").await.unwrap();

    let history = h.orchestrator.history(JobId::new(5)).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].executed_by, "bob");
    assert_eq!(history[1].executed_by, "alice");
}
