// SPDX-License-Identifier: MIT

use super::*;

#[tokio::test]
async fn accepting_fake_returns_success_and_records_call() {
    let client = FakeUpstreamClient::accepting();
    let msg = client.imagine("a cat", "n1").await.unwrap();
    assert!(msg.is_success());
    assert_eq!(
        client.calls(),
        vec![UpstreamCall::Imagine {
            prompt: "a cat".to_string(),
            nonce: "n1".to_string(),
        }]
    );
}

#[tokio::test]
async fn rejecting_fake_returns_configured_rejection() {
    let client = FakeUpstreamClient::rejecting(9, "banned word");
    let msg = client.imagine("x", "n1").await.unwrap();
    assert!(!msg.is_success());
    assert_eq!(msg.description, "banned word");
}

#[tokio::test]
async fn records_calls_across_operation_kinds() {
    let client = FakeUpstreamClient::accepting();
    client
        .upscale(ActionTarget {
            message_id: "m1".into(),
            index: 1,
            hash: "h".into(),
            flags: 0,
            nonce: "n".into(),
        })
        .await
        .unwrap();
    client.upload("f.png", "data:").await.unwrap();
    assert_eq!(
        client.calls(),
        vec![
            UpstreamCall::Upscale("m1".to_string()),
            UpstreamCall::Upload("f.png".to_string()),
        ]
    );
}
