//! Edge case tests for gridmuse-engine
//!
//! These tests cover boundary conditions and unusual inputs.

use gridmuse_engine::{
    Catalog, Command, Error, PhotoId, PhotoRecord, Placement, Reconciler, SortValue, StoreSnapshot,
    UnifiedList,
};
use std::collections::HashSet;

fn photo(id: PhotoId) -> PhotoRecord {
    PhotoRecord::new(id, format!("IMG_{}.jpg", id), "Pictures/AdobeLightroom/", "")
}

fn dense(n: i64) -> Catalog {
    Catalog::from_records((1..=n).map(|id| photo(id).with_sort(id))).unwrap()
}

fn sorts(catalog: &Catalog) -> Vec<(PhotoId, SortValue)> {
    catalog.records().map(|r| (r.id, r.sort)).collect()
}

// ============================================================================
// Empty and single-record catalogs
// ============================================================================

#[test]
fn empty_catalog_operations_are_noops() {
    let mut catalog = Catalog::new();

    assert!(!catalog.swap(1, 2));
    assert!(!catalog.insert_at_sort(1, 2));
    assert!(!catalog.compact());
    assert!(catalog.reconcile(&HashSet::new()).is_empty());
    assert!(!catalog.set_visibility(1, true));
    assert!(catalog.is_empty());
}

#[test]
fn single_record_catalog() {
    let mut catalog = dense(1);

    assert!(!catalog.swap(1, 1));
    assert!(!catalog.insert_at_sort(1, 1));
    assert!(!catalog.compact());
    assert_eq!(sorts(&catalog), vec![(1, 1)]);
}

// ============================================================================
// Unusual ids and sort values
// ============================================================================

#[test]
fn negative_and_extreme_ids() {
    let mut catalog = Catalog::new();

    catalog.assign_initial_sort(photo(i64::MAX)).unwrap();
    catalog.assign_initial_sort(photo(-5)).unwrap();
    catalog.assign_initial_sort(photo(i64::MIN)).unwrap();

    assert_eq!(catalog.get(i64::MAX).unwrap().sort, 1);
    assert_eq!(catalog.get(-5).unwrap().sort, 2);
    assert_eq!(catalog.get(i64::MIN).unwrap().sort, 3);
}

#[test]
fn corrupt_negative_sorts_are_replaced() {
    // A damaged store with negative sorts: those records count as unplaced.
    let mut catalog =
        Catalog::from_records(vec![photo(1).with_sort(-3), photo(2).with_sort(1)]).unwrap();

    let placement = catalog.assign_initial_sort(photo(1)).unwrap();

    assert_eq!(placement, Placement::Reassigned(2));
    assert_eq!(catalog.get(1).unwrap().sort, 2);
}

#[test]
fn huge_gaps_compact_to_dense() {
    let mut catalog = Catalog::from_records(vec![
        photo(1).with_sort(1_000_000),
        photo(2).with_sort(5),
        photo(3).with_sort(i64::MAX - 1),
    ])
    .unwrap();

    assert!(catalog.compact());

    assert_eq!(sorts(&catalog), vec![(1, 2), (2, 1), (3, 3)]);
}

#[test]
fn insert_beyond_range_lands_last() {
    let mut catalog = dense(3);

    assert!(catalog.insert_at_sort(1, 10));
    assert_eq!(sorts(&catalog), vec![(1, 3), (2, 1), (3, 2)]);
    assert!(!catalog.compact());
}

#[test]
fn insert_at_max_sort_keeps_refresh_working() {
    let mut catalog = dense(3);

    assert!(catalog.insert_at_sort(1, SortValue::MAX));
    assert_eq!(catalog.max_sort(), 3);

    let result = Reconciler::new(&mut catalog)
        .reconcile(vec![photo(1), photo(2), photo(3), photo(4)])
        .unwrap();

    assert_eq!(result.inserted, vec![4]);
    assert_eq!(sorts(&catalog), vec![(1, 3), (2, 1), (3, 2), (4, 4)]);
}

#[test]
fn exhausted_sort_space_is_an_error() {
    // Only a damaged store can hold this value.
    let mut catalog =
        Catalog::from_records(vec![photo(1).with_sort(1), photo(2).with_sort(SortValue::MAX)])
            .unwrap();

    let result = Reconciler::new(&mut catalog).reconcile(vec![photo(1), photo(2), photo(3)]);

    assert_eq!(result, Err(Error::SortOverflow(SortValue::MAX)));
}

#[test]
fn unicode_names_survive_snapshot() {
    let names = [
        "日本語テスト.jpg",
        "Привет мир.png",
        "🎉🚀💯.heic",
        "Hello\nWorld\tTab.jpg",
    ];
    let records: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, name)| PhotoRecord::new(i as i64 + 1, *name, "Pictures/", "").with_sort(i as i64 + 1))
        .collect();

    let json = StoreSnapshot::from_records(records).to_json().unwrap();
    let restored = StoreSnapshot::from_json(&json).unwrap();

    for (record, name) in restored.records().iter().zip(names.iter()) {
        assert_eq!(record.name, *name);
    }
}

// ============================================================================
// Documented scenarios
// ============================================================================

#[test]
fn six_photo_insert_scenario() {
    let names = ["A", "B", "C", "D", "E", "F"];
    let mut catalog = Catalog::from_records(
        names
            .iter()
            .enumerate()
            .map(|(i, n)| PhotoRecord::new(i as i64 + 1, *n, "", "").with_sort(i as i64 + 1)),
    )
    .unwrap();
    let layout = |c: &Catalog| -> String { c.ordered().iter().map(|r| r.name.as_str()).collect() };

    catalog.apply(&Command::InsertAt {
        selected: 5,
        target: 2,
    });
    assert_eq!(layout(&catalog), "AEBCDF");

    catalog.apply(&Command::InsertAt {
        selected: 3,
        target: 5,
    });
    assert_eq!(layout(&catalog), "AECDBF");
}

#[test]
fn full_refresh_cycle() {
    // First run: three photos.
    let mut catalog = Catalog::new();
    Reconciler::new(&mut catalog)
        .reconcile(vec![photo(10), photo(20), photo(30)])
        .unwrap();

    // The user moves photo 30 to the front and hides photo 10.
    catalog.insert_at_sort(3, 1);
    catalog.set_visibility(10, true);

    // Second run: photo 20 deleted on the device, photo 40 added.
    let result = Reconciler::new(&mut catalog)
        .reconcile(vec![photo(10), photo(30), photo(40)])
        .unwrap();

    assert_eq!(result.inserted, vec![40]);
    assert_eq!(result.removed, vec![20]);
    assert_eq!(sorts(&catalog), vec![(10, 2), (30, 1), (40, 3)]);

    let list = UnifiedList::new(catalog.into_records(), Vec::new());
    let visible: Vec<_> = list.visible().map(|r| r.id).collect();
    assert_eq!(visible, vec![40, 30]);
    assert_eq!(list.len(), 3);
}

// ============================================================================
// Scale
// ============================================================================

#[test]
fn large_catalog_round_trip() {
    let n = 5_000;
    let mut catalog = dense(n);
    let original = sorts(&catalog);

    catalog.insert_at_sort(n, 1);
    catalog.insert_at_sort(1, n);

    assert_eq!(sorts(&catalog), original);
}

#[test]
fn large_reconcile_keeps_density() {
    let mut catalog = dense(2_000);
    let discovered: Vec<_> = (1..=3_000).filter(|id| id % 3 != 0).map(photo).collect();

    let result = Reconciler::new(&mut catalog).reconcile(discovered).unwrap();

    assert_eq!(result.inserted.len(), 667);
    assert_eq!(result.removed.len(), 666);
    let mut values: Vec<_> = catalog.records().map(|r| r.sort).collect();
    values.sort_unstable();
    assert_eq!(values, (1..=catalog.len() as i64).collect::<Vec<_>>());
}
