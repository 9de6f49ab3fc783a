use reportline_core::{DispatchRegistry, Report, ReportDate, ReportKind, ReportPipeline};
use reportline_publish::{PublishError, PublishOutcome, Publisher, StoreOp, resolve_partition};
use reportline_store::{
    CallKind, CellRef, DestinationStore, FsStore, GroupHandle, MemoryStore,
    PLACEHOLDER_SUBGROUP_ID, RangeSpec, StoreCall, StoreRequest,
};
use tempfile::TempDir;

fn report(date: &str, body: &str) -> Report {
    Report::new(
        "Monthly statement",
        ReportKind::Default,
        ReportDate::parse(date).unwrap(),
        body,
    )
}

fn identity_pipeline() -> ReportPipeline {
    ReportPipeline::new(DispatchRegistry::with_report_pages())
}

fn read_metadata<S: DestinationStore>(store: &S, group: &str, id: i32) -> Vec<Vec<String>> {
    store
        .read_range(&GroupHandle::new(group), id, &RangeSpec::parse("A1:B1").unwrap())
        .unwrap()
        .unwrap()
}

/// Store whose March 2024 subgroup already records 15/03/2024.
fn march_store() -> MemoryStore {
    let store = MemoryStore::new("Sheet1");
    let g = store.create_group("2024").unwrap();
    store.create_subgroup(&g, 2, "03/2024").unwrap();
    store
        .write_range(&g, 2, CellRef::TOP_LEFT, "Report date,15/03/2024\nFees,old\n", ',')
        .unwrap();
    store.clear_calls();
    store
}

fn write_count(store: &MemoryStore) -> usize {
    store
        .calls()
        .iter()
        .filter(|c| {
            matches!(c, StoreCall::BatchUpdate { requests, .. }
                if requests.iter().any(|r| matches!(r, StoreRequest::PasteValues { .. })))
        })
        .count()
}

#[test]
fn older_report_is_skipped_without_write() {
    let store = march_store();
    let publisher = Publisher::new(&store, identity_pipeline());

    let outcome = publisher.publish(&report("01/03/2024", "Fees,new\n")).unwrap();
    assert!(matches!(outcome, PublishOutcome::SkippedStale { .. }));
    assert_eq!(write_count(&store), 0);
    assert_eq!(read_metadata(&store, "2024", 2)[0][1], "15/03/2024");
}

#[test]
fn same_day_and_later_reports_overwrite() {
    for date in ["15/03/2024", "20/03/2024"] {
        let store = march_store();
        let publisher = Publisher::new(&store, identity_pipeline());

        let outcome = publisher.publish(&report(date, "Fees,new\n")).unwrap();
        assert!(outcome.written(), "{date}");
        assert_eq!(write_count(&store), 1);

        let values = store
            .read_range(&GroupHandle::new("2024"), 2, &RangeSpec::parse("A1:B2").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(values, vec![vec!["Report date", date], vec!["Fees", "new"]]);
    }
}

#[test]
fn new_year_creates_partition_and_writes() {
    let store = MemoryStore::new("Sheet1");
    let publisher = Publisher::new(&store, identity_pipeline());

    let outcome = publisher
        .publish(&report("10/01/2025", "Account Overview,42\n"))
        .unwrap();
    assert!(outcome.written());

    let calls = store.calls();
    assert!(calls.contains(&StoreCall::CreateGroup("2025".into())));
    assert!(calls.contains(&StoreCall::BatchUpdate {
        group: "2025".into(),
        requests: vec![
            StoreRequest::CreateSubgroup {
                id: 0,
                title: "01/2025".into(),
            },
            StoreRequest::DeleteSubgroup {
                id: PLACEHOLDER_SUBGROUP_ID,
            },
        ],
    }));

    let workbook = store.workbook("2025").unwrap();
    assert_eq!(workbook.subgroups.len(), 1);
    assert_eq!(workbook.subgroups[0].title, "01/2025");
    assert_eq!(workbook.subgroups[0].cells[1], vec!["Account Overview", "42"]);
}

#[test]
fn resolving_same_month_twice_is_idempotent() {
    let store = MemoryStore::new("Sheet1");
    let date = ReportDate::parse("05/07/2024").unwrap();
    let first = resolve_partition(&store, date).unwrap();
    let second = resolve_partition(&store, date).unwrap();

    assert_eq!(
        (first.group, first.subgroup_id),
        (second.group, second.subgroup_id)
    );
    let creates = store
        .calls()
        .iter()
        .filter(|c| matches!(c.kind(), CallKind::CreateGroup | CallKind::BatchUpdate))
        .count();
    assert_eq!(creates, 2);
}

#[test]
fn failing_transform_touches_no_store() {
    let store = MemoryStore::new("Sheet1");
    let mut registry = DispatchRegistry::with_report_pages();
    registry.register("Fees", |_: &str| -> anyhow::Result<String> {
        anyhow::bail!("fee schedule missing")
    });
    let publisher = Publisher::new(&store, ReportPipeline::new(registry));

    let err = publisher
        .publish(&report("15/03/2024", "Dividends,1\nFees,2\n"))
        .unwrap_err();
    match err {
        PublishError::Transform(e) => assert_eq!(e.section, "Fees"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.calls().is_empty());
}

#[test]
fn corrupt_stored_date_is_fatal() {
    let store = MemoryStore::new("Sheet1");
    let g = store.create_group("2024").unwrap();
    store.create_subgroup(&g, 2, "03/2024").unwrap();
    store
        .write_range(&g, 2, CellRef::TOP_LEFT, "Report date,March 15\n", ',')
        .unwrap();
    store.clear_calls();

    let publisher = Publisher::new(&store, identity_pipeline());
    let err = publisher.publish(&report("20/03/2024", "Fees,1\n")).unwrap_err();
    assert!(matches!(err, PublishError::DateParse(_)));
    assert_eq!(write_count(&store), 0);
}

#[test]
fn store_failures_are_named() {
    for (kind, op) in [
        (CallKind::FindGroup, StoreOp::FindGroup),
        (CallKind::CreateGroup, StoreOp::CreateGroup),
        (CallKind::ReadRange, StoreOp::ReadRange),
    ] {
        let store = MemoryStore::new("Sheet1");
        store.fail_on(kind);
        let publisher = Publisher::new(&store, identity_pipeline());
        let err = publisher.publish(&report("15/03/2024", "Fees,1\n")).unwrap_err();
        match err {
            PublishError::Store { op: got, .. } => assert_eq!(got, op),
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn publish_to_filesystem_store() {
    let dir = TempDir::new().unwrap();
    let store = FsStore::new(dir.path(), "Financial Reports", "Sheet1").unwrap();
    let publisher = Publisher::new(store, identity_pipeline().parallel(true));

    let body = "Fees,1\nDividends,2\nFees,3\nCustom Page,x,y\n";
    assert!(publisher.publish(&report("10/01/2025", body)).unwrap().written());
    assert!(publisher.publish(&report("10/02/2025", body)).unwrap().written());
    assert!(!publisher.publish(&report("09/02/2025", body)).unwrap().written());

    let store = publisher.store();
    assert_eq!(store.list_groups().unwrap(), vec!["2025"]);
    let workbook = store.load("2025").unwrap();
    let titles: Vec<&str> = workbook.subgroups.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["01/2025", "02/2025"]);
    assert_eq!(workbook.subgroups[1].cells, vec![
        vec!["Report date", "10/02/2025"],
        vec!["Fees", "1"],
        vec!["Fees", "3"],
        vec!["Dividends", "2"],
        vec!["Custom Page", "x", "y"],
    ]);
    assert!(store.verify("2025").unwrap().iter().all(|r| r.ok));
}
