use reportline_store::{
    CellRef, DestinationStore, FsStore, PLACEHOLDER_SUBGROUP_ID, RangeSpec, StoreRequest,
};
use tempfile::TempDir;

fn open(dir: &TempDir) -> FsStore {
    FsStore::new(dir.path(), "Financial Reports", "Sheet1").unwrap()
}

#[test]
fn workbook_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = open(&dir);
        let g = store.create_group("2025").unwrap();
        store
            .batch_update(&g, &[
                StoreRequest::CreateSubgroup {
                    id: 0,
                    title: "01/2025".into(),
                },
                StoreRequest::DeleteSubgroup {
                    id: PLACEHOLDER_SUBGROUP_ID,
                },
                StoreRequest::PasteValues {
                    subgroup_id: 0,
                    top_left: CellRef::TOP_LEFT,
                    text: "Report date,10/01/2025\nFees,1\n".into(),
                    delimiter: ',',
                },
            ])
            .unwrap();
    }

    let store = open(&dir);
    let g = store.find_group("2025").unwrap().expect("group persisted");
    let subgroups = store.list_subgroups(&g).unwrap();
    assert_eq!(subgroups.len(), 1);
    assert_eq!(subgroups[0].id, 0);
    assert_eq!(subgroups[0].title, "01/2025");

    let values = store
        .read_range(&g, 0, &RangeSpec::parse("A1:B2").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(values, vec![vec!["Report date", "10/01/2025"], vec![
        "Fees", "1"
    ]]);
}

#[test]
fn subgroups_keep_creation_order() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let g = store.create_group("2024").unwrap();
    for (id, title) in [(4, "05/2024"), (1, "02/2024"), (7, "08/2024")] {
        store.create_subgroup(&g, id, title).unwrap();
    }
    let ids: Vec<i32> = store
        .list_subgroups(&g)
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![PLACEHOLDER_SUBGROUP_ID, 4, 1, 7]);
}

#[test]
fn rewrite_keeps_cells_outside_paste() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let g = store.create_group("2024").unwrap();
    store.create_subgroup(&g, 2, "03/2024").unwrap();
    store
        .write_range(&g, 2, CellRef::TOP_LEFT, "Report date,01/03/2024\nA,1\nB,2\n", ',')
        .unwrap();
    store
        .write_range(&g, 2, CellRef::TOP_LEFT, "Report date,15/03/2024\nA,9\n", ',')
        .unwrap();

    let values = store
        .read_range(&g, 2, &RangeSpec::parse("A1:B3").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(values[0][1], "15/03/2024");
    assert_eq!(values[1], vec!["A", "9"]);
    // Rows past the new paste are left as they were.
    assert_eq!(values[2], vec!["B", "2"]);
}

#[test]
fn verify_all_groups_clean() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    for year in ["2023", "2024"] {
        let g = store.create_group(year).unwrap();
        store
            .write_range(&g, PLACEHOLDER_SUBGROUP_ID, CellRef::TOP_LEFT, "x,y", ',')
            .unwrap();
    }
    for group in store.list_groups().unwrap() {
        assert!(store.verify(&group).unwrap().iter().all(|r| r.ok));
    }
}
