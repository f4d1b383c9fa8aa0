// SPDX-License-Identifier: MIT

use super::*;
use botpool_core::TaskConfig;
use std::collections::HashMap;

fn task(id: &str) -> TaskInfo {
    TaskInfo::new(TaskConfig {
        id: id.to_string(),
        nonce: "n".to_string(),
        property: HashMap::new(),
    })
}

#[tokio::test]
async fn save_then_get_round_trips() {
    let store = InMemoryTaskStore::new();
    let t = task("t1");
    store.save(&t).await.unwrap();
    let fetched = store.get(&t.id).unwrap();
    assert_eq!(fetched.id, t.id);
}

#[tokio::test]
async fn save_upserts_by_id() {
    let store = InMemoryTaskStore::new();
    let mut t = task("t1");
    store.save(&t).await.unwrap();
    t.progress = "50%".to_string();
    store.save(&t).await.unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&t.id).unwrap().progress, "50%");
}

#[tokio::test]
async fn delete_removes_record() {
    let store = InMemoryTaskStore::new();
    let t = task("t1");
    store.save(&t).await.unwrap();
    store.delete(&t.id).await;
    assert!(store.get(&t.id).is_none());
    assert!(store.is_empty());
}
