// SPDX-License-Identifier: MIT

use super::*;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn acquire_then_release_returns_count_to_initial_value() {
    // R2
    let sem = BoundedSemaphore::new(2);
    sem.acquire().await;
    sem.acquire().await;
    assert_eq!(sem.available(), 0);
    sem.release();
    sem.release();
    assert_eq!(sem.available(), 2);
    assert_eq!(sem.outstanding(), 0);
}

#[tokio::test]
async fn try_acquire_succeeds_immediately_when_permits_free() {
    let sem = BoundedSemaphore::new(1);
    assert!(sem.try_acquire(Duration::from_millis(100)).await);
}

#[tokio::test]
async fn try_acquire_times_out_when_no_permits_free() {
    let sem = BoundedSemaphore::new(1);
    sem.acquire().await;
    let got = sem.try_acquire(Duration::from_millis(20)).await;
    assert!(!got);
}

#[tokio::test]
async fn coresize_one_serializes_execution() {
    // B2: coreSize = 1 permits only a single concurrent holder.
    let sem = Arc::new(BoundedSemaphore::new(1));
    sem.acquire().await;
    let sem2 = Arc::clone(&sem);
    let blocked = tokio::spawn(async move { sem2.try_acquire(Duration::from_millis(20)).await });
    assert!(!blocked.await.unwrap());
    sem.release();
    assert!(sem.try_acquire(Duration::from_millis(20)).await);
}

#[tokio::test]
#[should_panic(expected = "release called without a matching acquire")]
async fn release_without_acquire_panics() {
    let sem = BoundedSemaphore::new(1);
    sem.release();
}

#[tokio::test]
async fn released_permit_is_available_to_next_acquirer() {
    let sem = BoundedSemaphore::new(1);
    sem.acquire().await;
    sem.release();
    sem.acquire().await;
    assert_eq!(sem.outstanding(), 1);
}
