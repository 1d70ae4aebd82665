use chrono::Utc;
use homecare_stats::domain::model::seed_testimonials;
use homecare_stats::{
    aggregator, CounterStore, FileStorage, LocalStatsBackend, LocalTestimonialBackend,
    NewTestimonial, TestimonialStore,
};
use tempfile::TempDir;

fn candidate(name: &str, rating: u8) -> NewTestimonial {
    NewTestimonial {
        name: name.to_string(),
        relation: "Wife of Mr. Dupont".to_string(),
        rating,
        text: "They treat him like family.".to_string(),
        service: "Post-hospital care".to_string(),
    }
}

#[tokio::test]
async fn test_stats_document_layout_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path());
    let counter = CounterStore::new(LocalStatsBackend::new(storage.clone()));

    counter.get_stats().await;

    let raw = std::fs::read_to_string(storage.path_for("stats")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["familiesCount"], 95);
    assert_eq!(json["foundingYear"], 2019);
    assert!(json["lastUpdated"].as_str().unwrap().parse::<chrono::DateTime<Utc>>().is_ok());
}

#[tokio::test]
async fn test_counter_survives_store_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let counter = CounterStore::new(LocalStatsBackend::new(FileStorage::new(temp_dir.path())));
        counter.increment_families_count().await;
        counter.increment_families_count().await;
    }

    let counter = CounterStore::new(LocalStatsBackend::new(FileStorage::new(temp_dir.path())));
    assert_eq!(counter.get_stats().await.families_count, 97);
}

#[tokio::test]
async fn test_get_stats_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let counter = CounterStore::new(LocalStatsBackend::new(FileStorage::new(temp_dir.path())));

    let first = counter.get_stats().await;
    let second = counter.get_stats().await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_reads_existing_document_written_by_the_site() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("stats.json"),
        r#"{"familiesCount":212,"lastUpdated":"2025-08-01T12:30:00.000Z","foundingYear":2019}"#,
    )
    .unwrap();
    let counter = CounterStore::new(LocalStatsBackend::new(FileStorage::new(temp_dir.path())));

    let stats = counter.increment_families_count().await;

    assert_eq!(stats.families_count, 213);
}

#[tokio::test]
async fn test_testimonial_round_trip_through_disk() {
    let temp_dir = TempDir::new().unwrap();
    let store = TestimonialStore::new(LocalTestimonialBackend::new(FileStorage::new(
        temp_dir.path(),
    )));
    let before = Utc::now();

    let stored = store.add_testimonial(candidate("Claire", 4)).await.unwrap();

    assert_eq!(stored.id, 1);
    assert!(stored.date >= before);

    let reopened = TestimonialStore::new(LocalTestimonialBackend::new(FileStorage::new(
        temp_dir.path(),
    )));
    assert_eq!(reopened.list_testimonials().await, vec![stored]);

    let raw = std::fs::read_to_string(temp_dir.path().join("testimonials.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(json.is_array());
    for field in ["id", "name", "relation", "rating", "text", "service", "date"] {
        assert!(json[0].get(field).is_some(), "missing field {}", field);
    }
}

#[tokio::test]
async fn test_seeded_store_reports_seed_rating() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path());
    let counter = CounterStore::new(LocalStatsBackend::new(storage.clone()));
    let store =
        TestimonialStore::new(LocalTestimonialBackend::new(storage)).with_seed(seed_testimonials());

    let snapshot = aggregator::snapshot(&counter, &store).await;
    assert_eq!(snapshot.satisfaction_rate, 100);
    assert_eq!(snapshot.families_count, 95);

    store.add_testimonial(candidate("Claire", 1)).await.unwrap();
    let snapshot = aggregator::snapshot(&counter, &store).await;
    // (5 + 1) / 10
    assert_eq!(snapshot.satisfaction_rate, 60);
}

#[tokio::test]
async fn test_ids_continue_after_gaps() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("testimonials.json"),
        r#"[{"id":4,"name":"A","relation":"","rating":5,"text":"t","service":"s","date":"2025-01-01T00:00:00Z"}]"#,
    )
    .unwrap();
    let store = TestimonialStore::new(LocalTestimonialBackend::new(FileStorage::new(
        temp_dir.path(),
    )));

    let stored = store.add_testimonial(candidate("Claire", 5)).await.unwrap();

    assert_eq!(stored.id, 5);
    let listed = store.list_testimonials().await;
    assert_eq!(listed.iter().map(|t| t.id).collect::<Vec<_>>(), vec![5, 4]);
}
