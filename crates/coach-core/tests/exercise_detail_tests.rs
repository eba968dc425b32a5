mod common;

use std::sync::{atomic::Ordering, Arc};

use coach_core::{
    store::{exercise_detail_key, KeyValueStore},
    CoachError, ConnectivityFlag, ExerciseDetailLoader, MemoryStore, SqliteStore,
};
use common::{FakeProvider, Harness};
use tempfile::TempDir;

type TestLoader = ExerciseDetailLoader<Arc<MemoryStore>, Arc<FakeProvider>, Arc<ConnectivityFlag>>;

fn loader(harness: &Harness) -> TestLoader {
    ExerciseDetailLoader::new(
        Arc::clone(&harness.store),
        Arc::clone(&harness.provider),
        Arc::clone(&harness.connectivity),
    )
}

#[tokio::test]
async fn test_first_load_fetches_then_serves_from_cache() {
    let harness = Harness::new();
    let loader = loader(&harness);

    let first = loader.load("Squat").await.expect("Failed to load details");
    assert_eq!(first.description, "How to perform Squat.");
    assert_eq!(harness.provider.detail_calls(), 1);
    assert!(harness.store.contains(&exercise_detail_key("Squat")));

    let second = loader.load("Squat").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(harness.provider.detail_calls(), 1);

    harness.connectivity.set_online(false);
    let offline = loader.load("Squat").await.expect("Cached details work offline");
    assert_eq!(first, offline);
    assert_eq!(harness.provider.detail_calls(), 1);
}

#[tokio::test]
async fn test_offline_without_cache_does_not_call_provider() {
    let harness = Harness::new();
    harness.connectivity.set_online(false);
    let loader = loader(&harness);

    let err = loader.load("Deadlift").await.unwrap_err();
    assert!(matches!(err, CoachError::Offline { .. }));
    assert_eq!(harness.provider.detail_calls(), 0);
    assert!(harness.store.is_empty());
}

#[tokio::test]
async fn test_provider_failure_caches_nothing() {
    let harness = Harness::new();
    harness.provider.fail_detail.store(true, Ordering::SeqCst);
    let loader = loader(&harness);

    let err = loader.load("Lunge").await.unwrap_err();
    assert!(err.is_provider());
    assert!(loader.cached("Lunge").unwrap().is_none());

    harness.provider.fail_detail.store(false, Ordering::SeqCst);
    loader.load("Lunge").await.expect("Retry should succeed");
    assert_eq!(harness.provider.detail_calls(), 2);
}

#[tokio::test]
async fn test_cached_names_and_forget() {
    let harness = Harness::new();
    let loader = loader(&harness);
    harness.store.set("workoutPlan", "{}").unwrap();

    loader.load("Squat").await.unwrap();
    loader.load("Bench Press").await.unwrap();

    let mut names = loader.cached_names().unwrap();
    names.sort();
    assert_eq!(names, vec!["Bench Press".to_string(), "Squat".to_string()]);

    loader.forget("Squat").unwrap();
    assert_eq!(loader.cached_names().unwrap(), vec!["Bench Press".to_string()]);
    assert!(harness.store.contains("workoutPlan"));

    loader.load("Squat").await.unwrap();
    assert_eq!(harness.provider.detail_calls(), 3);
}

#[tokio::test]
async fn test_corrupt_entry_is_refetched() {
    let harness = Harness::new();
    harness
        .store
        .set(&exercise_detail_key("Plank"), "not json")
        .unwrap();
    let loader = loader(&harness);

    assert!(loader.cached("Plank").unwrap().is_none());
    assert!(!harness.store.contains(&exercise_detail_key("Plank")));

    harness
        .store
        .set(&exercise_detail_key("Plank"), "{\"description\": 1}")
        .unwrap();
    let detail = loader.load("Plank").await.unwrap();
    assert_eq!(detail.description, "How to perform Plank.");
    assert_eq!(harness.provider.detail_calls(), 1);
}

#[tokio::test]
async fn test_details_survive_reopening_sqlite_store() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("coach.db");
    let provider = Arc::new(FakeProvider::new());

    {
        let store = SqliteStore::open(&db_path).expect("Failed to open store");
        let loader = ExerciseDetailLoader::new(
            store,
            Arc::clone(&provider),
            ConnectivityFlag::online(),
        );
        loader.load("Pull-up").await.unwrap();
    }

    let store = SqliteStore::open(&db_path).expect("Failed to reopen store");
    let loader = ExerciseDetailLoader::new(store, Arc::clone(&provider), ConnectivityFlag::offline());
    let detail = loader.load("Pull-up").await.expect("Details should be cached");

    assert_eq!(detail.description, "How to perform Pull-up.");
    assert_eq!(provider.detail_calls(), 1);
    assert_eq!(loader.cached_names().unwrap(), vec!["Pull-up".to_string()]);
}
