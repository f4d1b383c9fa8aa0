// SPDX-License-Identifier: MIT

use super::*;
use crate::instance::Instance;
use botpool_adapters::{FakeNotifyAdapter, FakeTaskStore, FakeUpstreamClient};
use botpool_balancer::{BestWaitIdle, RoundRobin};
use botpool_core::{Account, FakeClock, RuntimeConfig, TaskConfig, TaskInfo};
use std::collections::HashMap;

fn task(id: &str) -> TaskInfo {
    TaskInfo::new(TaskConfig {
        id: id.to_string(),
        nonce: String::new(),
        property: HashMap::new(),
    })
}

fn make_instance(
    id: &str,
    core_size: u32,
) -> Arc<Instance<FakeUpstreamClient, FakeTaskStore, FakeNotifyAdapter, FakeClock>> {
    Instance::new(
        Account::new(id, core_size),
        FakeUpstreamClient::accepting(),
        FakeTaskStore::new(),
        FakeNotifyAdapter::new(),
        FakeClock::new(0),
        RuntimeConfig::default(),
    )
}

#[tokio::test]
async fn no_live_instances_fails_with_reason() {
    let registry = Arc::new(InstanceRegistry::new());
    let facade = SubmissionFacade::new(registry, RoundRobin::new());

    let result = facade
        .submit(task("t1"), |instance| instance.imagine("x", "n"))
        .await;

    assert_eq!(result.code, SubmitCode::Failure);
    assert_eq!(result.description, "no available instance");
}

#[tokio::test]
async fn disabled_only_instance_is_not_a_candidate() {
    let registry = Arc::new(InstanceRegistry::new());
    let mut disabled_account = Account::new("acc-1", 4);
    disabled_account.enabled = false;
    let disabled = Instance::new(
        disabled_account,
        FakeUpstreamClient::accepting(),
        FakeTaskStore::new(),
        FakeNotifyAdapter::new(),
        FakeClock::new(0),
        RuntimeConfig::default(),
    );
    registry.register(disabled);

    let facade = SubmissionFacade::new(registry, RoundRobin::new());
    let result = facade
        .submit(task("t1"), |instance| instance.imagine("x", "n"))
        .await;

    assert_eq!(result.code, SubmitCode::Failure);
    assert_eq!(result.description, "no available instance");
}

#[tokio::test]
async fn routes_to_balancer_chosen_instance_and_forwards_submit_result() {
    let registry = Arc::new(InstanceRegistry::new());
    let a = make_instance("acc-a", 4);
    Arc::clone(&a).start();
    registry.register(a);

    let facade = SubmissionFacade::new(registry, RoundRobin::new());
    let result = facade
        .submit(task("t1"), |instance| instance.imagine("a cat", "n1"))
        .await;

    assert_eq!(result.code, SubmitCode::Success);
    assert_eq!(
        result.properties.get("discordInstanceId").and_then(|v| v.as_str()),
        Some("acc-a")
    );
}

#[tokio::test]
async fn best_wait_idle_prefers_the_least_loaded_live_instance() {
    let registry = Arc::new(InstanceRegistry::new());
    let busy = make_instance("acc-busy", 1);
    let forever: Thunk = Box::pin(std::future::pending());
    Arc::clone(&busy).start();
    let _ = busy.submit(task("occupying"), forever).await;
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }

    let idle = make_instance("acc-idle", 1);
    Arc::clone(&idle).start();

    registry.register(busy);
    registry.register(idle);

    let facade = SubmissionFacade::new(registry, BestWaitIdle);
    let result = facade
        .submit(task("t1"), |instance| instance.imagine("x", "n"))
        .await;

    assert_eq!(result.code, SubmitCode::Success);
    assert_eq!(
        result.properties.get("discordInstanceId").and_then(|v| v.as_str()),
        Some("acc-idle")
    );
}
