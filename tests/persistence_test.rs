use achieve::roadmap::{normalize_and_validate, GoalResponse};
use achieve::store::{FileRoadmapStore, MemoryRoadmapStore, RoadmapStore};
use serde_json::json;
use tempfile::TempDir;

fn roadmap(goal: &str, weeks: u32) -> GoalResponse {
    let document = json!({
        "user_goal": goal,
        "duration_weeks": weeks,
        "skill_level": "beginner",
        "time_commitment_per_day_minutes": 45,
        "overall_strategy": "One topic per week.",
        "weekly_checkpoints": [],
        "general_resources": []
    });
    normalize_and_validate(&document.to_string()).unwrap()
}

#[tokio::test]
async fn test_file_store_creates_directory_and_writes_pretty_json() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");
    let store = FileRoadmapStore::new(&data_dir);

    let path = store.save("user_roadmap", &roadmap("Learn Go", 6)).await.unwrap();

    assert_eq!(path, data_dir.join("user_roadmap.json"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"user_goal\": \"Learn Go\""), "not pretty-printed:\n{text}");
    assert!(text.ends_with("}\n"));
    assert!(text.contains("\"success_criteria\": null"));
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = FileRoadmapStore::new(dir.path());
    let original = roadmap("Learn Go", 6);

    store.save("user_roadmap", &original).await.unwrap();
    let loaded = store.load("user_roadmap").await.unwrap();

    assert_eq!(loaded, Some(original));
}

#[tokio::test]
async fn test_file_store_missing_entry_is_none() {
    let dir = TempDir::new().unwrap();
    let store = FileRoadmapStore::new(dir.path().join("never-created"));
    assert!(store.load("user_roadmap").await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_store_overwrites_previous_roadmap() {
    let dir = TempDir::new().unwrap();
    let store = FileRoadmapStore::new(dir.path());

    store.save("user_roadmap", &roadmap("Learn Go", 6)).await.unwrap();
    store.save("user_roadmap", &roadmap("Learn Rust", 8)).await.unwrap();

    let loaded = store.load("user_roadmap").await.unwrap().unwrap();
    assert_eq!(loaded.user_goal, "Learn Rust");
    assert_eq!(loaded.duration_weeks, 8);

    // only the target file remains; the temporary file was renamed over it
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_file_store_reports_unwritable_directory() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("data");
    std::fs::write(&blocker, "not a directory").unwrap();

    let store = FileRoadmapStore::new(&blocker);
    let err = store.save("user_roadmap", &roadmap("Learn Go", 6)).await.unwrap_err();
    assert!(err.to_string().contains("data"), "{err}");
}

#[tokio::test]
async fn test_memory_store() {
    let store = MemoryRoadmapStore::new();
    assert!(store.is_empty());
    assert!(store.load("a").await.unwrap().is_none());

    store.save("a", &roadmap("Learn Go", 6)).await.unwrap();
    store.save("a", &roadmap("Learn Go", 4)).await.unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.load("a").await.unwrap().unwrap().duration_weeks, 4);
}
