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
async fn records_save_and_delete_calls_in_order() {
    let store = FakeTaskStore::new();
    let t = task("t1");
    store.save(&t).await.unwrap();
    store.delete(&t.id).await;
    assert_eq!(
        store.calls(),
        vec![StoreCall::Save(t.id.clone()), StoreCall::Delete(t.id)]
    );
}

#[tokio::test]
async fn fail_saves_makes_every_subsequent_save_error() {
    let store = FakeTaskStore::new();
    store.fail_saves();
    let t = task("t1");
    let err = store.save(&t).await.unwrap_err();
    assert!(matches!(err, StoreError::SaveFailed(id, _) if id == t.id));
    assert!(!store.contains(&t.id));
}
