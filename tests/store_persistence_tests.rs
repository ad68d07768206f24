use std::cell::RefCell;
use std::rc::Rc;

use chart_trendlines::ChartError;
use chart_trendlines::core::{DataPoint, TRENDLINE_PALETTE, Trendline};
use chart_trendlines::persistence::{
    DEFAULT_STORAGE_KEY, MemoryStorage, TrendlinePersistence, trendlines_from_json_compat_str,
};
use chart_trendlines::store::{StoreChange, StoreSubscriber, TrendlineStore};

fn open_store(storage: &MemoryStorage) -> TrendlineStore {
    TrendlineStore::open(TrendlinePersistence::new(storage.clone())).with_rng_seed(11)
}

fn persisted(storage: &MemoryStorage) -> Vec<Trendline> {
    let raw = storage
        .value(DEFAULT_STORAGE_KEY)
        .expect("collection persisted");
    trendlines_from_json_compat_str(&raw).expect("valid persisted json")
}

struct RecordingSubscriber {
    id: String,
    changes: Rc<RefCell<Vec<(StoreChange, usize)>>>,
}

impl StoreSubscriber for RecordingSubscriber {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_change(&mut self, change: &StoreChange, trendlines: &[Trendline]) {
        self.changes
            .borrow_mut()
            .push((change.clone(), trendlines.len()));
    }
}

#[test]
fn create_orders_points_and_persists() {
    let storage = MemoryStorage::default();
    let mut store = open_store(&storage);

    let line = store
        .create(DataPoint::new(10.0, 50.0), DataPoint::new(5.0, 20.0))
        .expect("create trendline");

    assert_eq!(line.start_point(), DataPoint::new(5.0, 20.0));
    assert_eq!(line.end_point(), DataPoint::new(10.0, 50.0));
    assert!(line.id().as_str().starts_with("trendline-"));
    assert!(TRENDLINE_PALETTE.contains(&line.color().as_str()));
    assert_eq!(persisted(&storage), vec![line]);
}

#[test]
fn reopening_restores_collection_in_order() {
    let storage = MemoryStorage::default();
    let mut store = open_store(&storage);
    let first = store
        .create(DataPoint::new(1.0, 1.0), DataPoint::new(2.0, 2.0))
        .expect("create trendline");
    let second = store
        .create(DataPoint::new(3.0, 3.0), DataPoint::new(4.0, 4.0))
        .expect("create trendline");
    drop(store);

    let reopened = open_store(&storage);
    assert_eq!(reopened.list(), vec![first, second]);
}

#[test]
fn update_replaces_geometry_in_place() {
    let storage = MemoryStorage::default();
    let mut store = open_store(&storage);
    let first = store
        .create(DataPoint::new(1.0, 1.0), DataPoint::new(2.0, 2.0))
        .expect("create trendline");
    let second = store
        .create(DataPoint::new(3.0, 3.0), DataPoint::new(4.0, 4.0))
        .expect("create trendline");

    let updated = store
        .update(
            first.id().as_str(),
            DataPoint::new(9.0, 90.0),
            DataPoint::new(6.0, 60.0),
        )
        .expect("update existing");

    assert_eq!(updated.start_point(), DataPoint::new(6.0, 60.0));
    assert_eq!(updated.color(), first.color());
    let ids: Vec<_> = store.iter().map(|line| line.id().clone()).collect();
    assert_eq!(ids, vec![first.id().clone(), second.id().clone()]);
    assert_eq!(persisted(&storage)[0], updated);
}

#[test]
fn update_of_unknown_id_is_not_found() {
    let mut store = open_store(&MemoryStorage::default());
    let err = store
        .update("missing", DataPoint::new(0.0, 0.0), DataPoint::new(1.0, 1.0))
        .expect_err("unknown id");
    assert!(matches!(err, ChartError::NotFound { id } if id == "missing"));
}

#[test]
fn non_finite_points_are_rejected_and_collection_survives_reopen() {
    let storage = MemoryStorage::default();
    let mut store = open_store(&storage);
    let first = store
        .create(DataPoint::new(1.0, 1.0), DataPoint::new(2.0, 2.0))
        .expect("create trendline");
    let second = store
        .create(DataPoint::new(3.0, 3.0), DataPoint::new(4.0, 4.0))
        .expect("create trendline");

    let err = store
        .create(DataPoint::new(f64::NAN, 1.0), DataPoint::new(5.0, 5.0))
        .expect_err("nan time");
    assert!(matches!(err, ChartError::InvalidData(_)));
    let err = store
        .update(
            first.id().as_str(),
            DataPoint::new(1.0, 1.0),
            DataPoint::new(2.0, f64::INFINITY),
        )
        .expect_err("infinite price");
    assert!(matches!(err, ChartError::InvalidData(_)));

    assert_eq!(store.len(), 2);
    let raw = storage
        .value(DEFAULT_STORAGE_KEY)
        .expect("collection persisted");
    assert!(!raw.contains("null"));
    drop(store);

    let reopened = open_store(&storage);
    assert_eq!(reopened.list(), vec![first, second]);
}

#[test]
fn deleting_twice_is_a_noop_the_second_time() {
    let storage = MemoryStorage::default();
    let mut store = open_store(&storage);
    let line = store
        .create(DataPoint::new(1.0, 1.0), DataPoint::new(2.0, 2.0))
        .expect("create trendline");
    let writes_before = storage.write_count();

    assert!(store.delete(line.id().as_str()));
    assert!(!store.delete(line.id().as_str()));
    assert!(store.is_empty());
    assert_eq!(storage.write_count(), writes_before + 1);
}

#[test]
fn clear_persists_empty_collection() {
    let storage = MemoryStorage::default();
    let mut store = open_store(&storage);
    for i in 0..3 {
        let t = f64::from(i);
        store
            .create(DataPoint::new(t, t), DataPoint::new(t + 1.0, t + 2.0))
            .expect("create trendline");
    }
    assert_eq!(persisted(&storage).len(), 3);

    store.clear();
    assert!(store.is_empty());
    assert!(persisted(&storage).is_empty());
}

#[test]
fn malformed_persisted_data_loads_empty() {
    let storage = MemoryStorage::default().with_value(DEFAULT_STORAGE_KEY, "not json");
    let store = open_store(&storage);
    assert!(store.is_empty());
}

#[test]
fn unknown_schema_version_loads_empty() {
    let storage = MemoryStorage::default()
        .with_value(DEFAULT_STORAGE_KEY, r#"{"schema_version":99,"trendlines":[]}"#);
    assert!(open_store(&storage).is_empty());
}

#[test]
fn legacy_bare_array_is_loaded_and_normalized() {
    let legacy = r##"[
        {"id":1700000000000,"start":{"x":30,"y":5},"end":{"x":10,"y":7},"color":"#FF6384"},
        {"id":"trendline-1-abc","startPoint":{"time":1,"price":2},"endPoint":{"time":3,"price":4},"color":"#36A2EB","width":2}
    ]"##;
    let storage = MemoryStorage::default().with_value(DEFAULT_STORAGE_KEY, legacy);
    let store = open_store(&storage);

    assert_eq!(store.len(), 2);
    let legacy_line = store.get("1700000000000").expect("numeric id kept as text");
    assert_eq!(legacy_line.start_point(), DataPoint::new(10.0, 7.0));
    assert_eq!(legacy_line.end_point(), DataPoint::new(30.0, 5.0));
    assert!(store.contains("trendline-1-abc"));
}

#[test]
fn duplicate_persisted_ids_keep_first_occurrence() {
    let json = r##"{"schema_version":1,"trendlines":[
        {"id":"dup","startPoint":{"time":1,"price":1},"endPoint":{"time":2,"price":2},"color":"#FF6384","width":2},
        {"id":"dup","startPoint":{"time":5,"price":5},"endPoint":{"time":6,"price":6},"color":"#36A2EB","width":2}
    ]}"##;
    let storage = MemoryStorage::default().with_value(DEFAULT_STORAGE_KEY, json);
    let store = open_store(&storage);

    assert_eq!(store.len(), 1);
    assert_eq!(
        store.get("dup").expect("kept").start_point(),
        DataPoint::new(1.0, 1.0)
    );
}

#[test]
fn failed_writes_keep_memory_state() {
    let storage = MemoryStorage::default();
    let mut store = open_store(&storage);
    storage.set_failing_writes(true);

    let line = store
        .create(DataPoint::new(1.0, 1.0), DataPoint::new(2.0, 2.0))
        .expect("create trendline");

    assert!(store.contains(line.id().as_str()));
    assert_eq!(store.failed_saves(), 1);
    assert_eq!(storage.value(DEFAULT_STORAGE_KEY), None);

    storage.set_failing_writes(false);
    assert!(store.delete(line.id().as_str()));
    assert_eq!(store.failed_saves(), 1);
    assert!(persisted(&storage).is_empty());
}

#[test]
fn custom_key_isolates_collections() {
    let storage = MemoryStorage::default();
    let mut store =
        TrendlineStore::open(TrendlinePersistence::new(storage.clone()).with_key("pane-2"));
    store.create(DataPoint::new(1.0, 1.0), DataPoint::new(2.0, 2.0)).expect("create trendline");

    assert!(storage.value("pane-2").is_some());
    assert_eq!(storage.value(DEFAULT_STORAGE_KEY), None);
}

#[test]
fn subscribers_see_changes_after_they_are_applied() {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let mut store = open_store(&MemoryStorage::default());
    store
        .subscribe(Box::new(RecordingSubscriber {
            id: "panel".to_owned(),
            changes: changes.clone(),
        }))
        .expect("subscribe");

    let line = store
        .create(DataPoint::new(1.0, 1.0), DataPoint::new(2.0, 2.0))
        .expect("create trendline");
    store
        .update(
            line.id().as_str(),
            DataPoint::new(1.0, 3.0),
            DataPoint::new(2.0, 4.0),
        )
        .expect("update");
    store.delete(line.id().as_str());
    store.clear();

    assert_eq!(
        *changes.borrow(),
        vec![
            (StoreChange::Created(line.id().clone()), 1),
            (StoreChange::Updated(line.id().clone()), 1),
            (StoreChange::Deleted(line.id().clone()), 0),
            (StoreChange::Cleared, 0),
        ]
    );
}

#[test]
fn subscriber_ids_must_be_unique_and_non_empty() {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let mut store = open_store(&MemoryStorage::default());
    let subscriber = |id: &str| {
        Box::new(RecordingSubscriber {
            id: id.to_owned(),
            changes: changes.clone(),
        })
    };

    assert!(store.subscribe(subscriber("")).is_err());
    store.subscribe(subscriber("a")).expect("first");
    assert!(store.subscribe(subscriber("a")).is_err());
    assert_eq!(store.subscriber_count(), 1);
    assert!(store.unsubscribe("a"));
    assert!(!store.unsubscribe("a"));
}

#[test]
fn try_load_reports_missing_and_malformed_slots() {
    let empty = TrendlinePersistence::new(MemoryStorage::default());
    assert_eq!(empty.try_load().expect("readable"), None);

    let storage = MemoryStorage::default().with_value(DEFAULT_STORAGE_KEY, "{\"schema_version\":1");
    let broken = TrendlinePersistence::new(storage);
    assert!(matches!(
        broken.try_load(),
        Err(ChartError::MalformedPersistedData(_))
    ));
    assert!(broken.load().is_empty());
}
