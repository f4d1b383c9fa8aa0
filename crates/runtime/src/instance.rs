// SPDX-License-Identifier: MIT

//! Per-account instance runtime (component C3) — the dominant piece of the
//! dispatcher: a FIFO pending queue, a bounded-concurrency dispatcher/executor
//! pair, and the lifecycle poll loop described in spec.md §4.3.

use crate::semaphore::BoundedSemaphore;
use crate::signal::WorkSignal;
use botpool_adapters::{ActionTarget, BlendDimensions, Notifier, TaskStore, UpstreamClient, UpstreamError};
use botpool_balancer::InstanceSnapshot;
use botpool_core::{Account, AccountId, Clock, Message, RuntimeConfig, TaskId, TaskInfo, TaskStatus};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A deferred call, bound to a specific account at enqueue time, that asks
/// the upstream to accept a job (spec.md §3 "Queue entry").
pub type Thunk = Pin<Box<dyn Future<Output = Result<Message, UpstreamError>> + Send>>;

struct QueueEntry {
    task: TaskInfo,
    thunk: Thunk,
}

/// `code ∈ {SUCCESS, IN_QUEUE, FAILURE}` per spec.md §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitCode {
    Success,
    InQueue,
    Failure,
}

/// Result of [`Instance::submit`] / the facade's [`crate::facade::SubmissionFacade::submit`].
#[derive(Debug, Clone)]
pub struct SubmitResult {
    pub code: SubmitCode,
    pub description: String,
    pub task_id: Option<TaskId>,
    pub properties: HashMap<String, serde_json::Value>,
}

impl SubmitResult {
    fn success(task_id: TaskId, account_id: &AccountId) -> Self {
        let mut properties = HashMap::new();
        properties.insert(
            "discordInstanceId".to_string(),
            serde_json::Value::String(account_id.as_str().to_string()),
        );
        Self {
            code: SubmitCode::Success,
            description: "submitted".to_string(),
            task_id: Some(task_id),
            properties,
        }
    }

    fn in_queue(task_id: TaskId, ahead: u64, account_id: &AccountId) -> Self {
        let mut properties = HashMap::new();
        properties.insert(
            "discordInstanceId".to_string(),
            serde_json::Value::String(account_id.as_str().to_string()),
        );
        properties.insert("numberOfQueues".to_string(), serde_json::Value::from(ahead));
        Self {
            code: SubmitCode::InQueue,
            description: format!("queued, {ahead} ahead"),
            task_id: Some(task_id),
            properties,
        }
    }

    pub(crate) fn failure(description: impl Into<String>) -> Self {
        Self {
            code: SubmitCode::Failure,
            description: description.into(),
            task_id: None,
            properties: HashMap::new(),
        }
    }
}

/// Per-account execution unit: owns the account, the pending queue `Q`, the
/// running set `R`, the running-future map `F`, and the bounded semaphore
/// `S` (spec.md §4.3).
pub struct Instance<U, S, N, C>
where
    U: UpstreamClient,
    S: TaskStore,
    N: Notifier,
    C: Clock,
{
    account: Account,
    upstream: Arc<U>,
    store: Arc<S>,
    notifier: N,
    clock: C,
    config: RuntimeConfig,
    semaphore: BoundedSemaphore,
    queue: Mutex<VecDeque<QueueEntry>>,
    running: Mutex<HashMap<TaskId, TaskInfo>>,
    futures: Mutex<HashMap<TaskId, JoinHandle<()>>>,
    work_signal: WorkSignal,
    shutting_down: AtomicBool,
}

/// Returned by [`Instance::start`]; the only way to stop the dispatcher and
/// drain in-flight work deterministically (design note "Long-lived
/// background worker started from a constructor").
pub struct InstanceHandle<U, S, N, C>
where
    U: UpstreamClient,
    S: TaskStore,
    N: Notifier,
    C: Clock,
{
    instance: Arc<Instance<U, S, N, C>>,
    dispatcher: JoinHandle<()>,
}

impl<U, S, N, C> InstanceHandle<U, S, N, C>
where
    U: UpstreamClient,
    S: TaskStore,
    N: Notifier,
    C: Clock,
{
    pub fn instance(&self) -> &Arc<Instance<U, S, N, C>> {
        &self.instance
    }

    /// Stops the dispatcher from starting new drains and awaits every
    /// in-flight executor already recorded in `F`. Consumes `self`, so a
    /// second shutdown is a type error rather than a runtime race.
    pub async fn shutdown(self) {
        self.instance.shutting_down.store(true, Ordering::SeqCst);
        self.instance.work_signal.signal();
        let _ = self.dispatcher.await;

        let handles: Vec<_> = self.instance.futures.lock().drain().map(|(_, h)| h).collect();
        for handle in handles {
            let _ = handle.await;
        }
    }
}

impl<U, S, N, C> Instance<U, S, N, C>
where
    U: UpstreamClient,
    S: TaskStore,
    N: Notifier,
    C: Clock,
{
    pub fn new(account: Account, upstream: U, store: S, notifier: N, clock: C, config: RuntimeConfig) -> Arc<Self> {
        if account.core_size_was_clamped() {
            tracing::warn!(
                account_id = %account.id,
                core_size = account.core_size,
                effective = account.effective_core_size(),
                "coreSize exceeds the hard cap; clamping effective concurrency",
            );
        }
        let permits = account.effective_core_size() as usize;
        Arc::new(Self {
            account,
            upstream: Arc::new(upstream),
            store: Arc::new(store),
            notifier,
            clock,
            config,
            semaphore: BoundedSemaphore::new(permits),
            queue: Mutex::new(VecDeque::new()),
            running: Mutex::new(HashMap::new()),
            futures: Mutex::new(HashMap::new()),
            work_signal: WorkSignal::new(),
            shutting_down: AtomicBool::new(false),
        })
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    /// A point-in-time view of this instance for the load balancer
    /// (spec.md §4.4): coreSize, current running count, and queue depth.
    pub fn snapshot(&self) -> InstanceSnapshot {
        let mut snapshot = InstanceSnapshot::new(self.account.id.clone(), self.account.effective_core_size());
        snapshot.running_count = self.futures.lock().len() as u32;
        snapshot.queue_len = self.queue.lock().len() as u32;
        snapshot.weight = self.account.weight;
        snapshot
    }

    /// Spawns the long-lived dispatcher worker.
    pub fn start(self: Arc<Self>) -> InstanceHandle<U, S, N, C> {
        let dispatcher_instance = Arc::clone(&self);
        let dispatcher = tokio::spawn(async move { dispatcher_instance.dispatcher_loop().await });
        InstanceHandle {
            instance: self,
            dispatcher,
        }
    }

    /// `Submit(task, thunk) → result` (spec.md §4.3).
    ///
    /// A permit is available right now only when the semaphore has one free
    /// *and* nothing is already ahead in `Q` — otherwise the submission is
    /// queued even if `Q` happens to be momentarily empty (e.g. every permit
    /// is held by already-running tasks), matching the worked example in
    /// spec.md §8 scenario 2 where a fully-occupied single-core instance
    /// queues every subsequent submission starting at `numberOfQueues=0`.
    pub async fn submit(self: &Arc<Self>, task: TaskInfo, thunk: Thunk) -> SubmitResult {
        if let Err(err) = self.store.save(&task).await {
            tracing::warn!(task_id = %task.id, error = %err, "admission save failed");
            self.store.delete(&task.id).await;
            return SubmitResult::failure(format!("enqueue failed: {err}"));
        }

        let task_id = task.id.clone();
        let (position, had_free_permit) = {
            let mut queue = self.queue.lock();
            let position = queue.len();
            let had_free_permit = self.semaphore.available() > 0;
            queue.push_back(QueueEntry { task, thunk });
            (position, had_free_permit)
        };
        self.work_signal.signal();

        if position == 0 && had_free_permit {
            SubmitResult::success(task_id, &self.account.id)
        } else {
            SubmitResult::in_queue(task_id, position as u64, &self.account.id)
        }
    }

    /// `ExitTask(task)`: supports cancelling a still-queued task. A task
    /// already running is mutated in place through [`Self::mutate_running`]
    /// so the live record (not a disconnected clone) becomes terminal;
    /// `F`/`R` are left untouched here and only cleared by `execute`'s own
    /// finally block once the executor actually observes the cancellation
    /// and returns, so a `JoinHandle` is never dropped out from under a
    /// still-running task.
    pub async fn exit_task(&self, task_id: &TaskId) -> Option<TaskInfo> {
        let from_queue = {
            let mut queue = self.queue.lock();
            let position = queue.iter().position(|entry| &entry.task.id == task_id);
            position.and_then(|index| queue.remove(index)).map(|entry| entry.task)
        };

        if let Some(mut task) = from_queue {
            if !task.is_terminal() && task.set_status(TaskStatus::Cancel, &self.clock).is_err() {
                tracing::warn!(task_id = %task.id, "exit_task: could not cancel an already-terminal task");
            }
            self.persist_and_notify(&task).await;
            return Some(task);
        }

        let snapshot = self.mutate_running(task_id, |task| {
            if !task.is_terminal() && task.set_status(TaskStatus::Cancel, &self.clock).is_err() {
                tracing::warn!(task_id = %task.id, "exit_task: could not cancel an already-terminal task");
            }
        })?;
        self.persist_and_notify(&snapshot).await;
        Some(snapshot)
    }

    pub fn running_tasks(&self) -> Vec<TaskInfo> {
        self.running.lock().values().cloned().collect()
    }

    pub fn queue_tasks(&self) -> Vec<TaskInfo> {
        self.queue.lock().iter().map(|entry| entry.task.clone()).collect()
    }

    pub fn running_futures(&self) -> usize {
        self.futures.lock().len()
    }

    /// Free permits on this instance's semaphore (diagnostics/tests).
    pub fn available_permits(&self) -> usize {
        self.semaphore.available()
    }

    pub fn find_running(&self, mut predicate: impl FnMut(&TaskInfo) -> bool) -> Option<TaskInfo> {
        self.running.lock().values().find(|task| predicate(task)).cloned()
    }

    pub fn get_running_by_nonce(&self, nonce: &str) -> Option<TaskInfo> {
        self.find_running(|task| task.nonce == nonce)
    }

    pub fn get_running_by_message_id(&self, message_id: &str) -> Option<TaskInfo> {
        self.find_running(|task| task.message_id.as_deref() == Some(message_id))
    }

    /// Applies an out-of-band upstream status update (spec.md §6: "the
    /// client is expected to, on inbound upstream events, update the
    /// corresponding TaskInfo") and persists+notifies the result.
    pub async fn mark_running_status(&self, task_id: &TaskId, status: TaskStatus) -> bool {
        let updated = self.mutate_running(task_id, |task| {
            if task.set_status(status, &self.clock).is_err() {
                tracing::warn!(task_id = %task.id, ?status, "external status update rejected");
            }
        });
        match updated {
            Some(snapshot) => {
                self.persist_and_notify(&snapshot).await;
                true
            }
            None => false,
        }
    }

    pub async fn mark_running_progress(&self, task_id: &TaskId, progress: impl Into<String>) -> bool {
        let progress = progress.into();
        let updated = self.mutate_running(task_id, |task| {
            let _ = task.set_progress(progress, &self.clock);
        });
        match updated {
            Some(snapshot) => {
                self.persist_and_notify(&snapshot).await;
                true
            }
            None => false,
        }
    }

    pub fn mark_running_message_id(&self, task_id: &TaskId, message_id: impl Into<String>) -> bool {
        self.mutate_running(task_id, |task| task.message_id = Some(message_id.into()))
            .is_some()
    }

    // --- Typed wrappers (spec.md §4.3): thin pass-throughs to the upstream
    // client, bound to this instance's account. They build `Thunk`s so every
    // call site constructs a thunk the same way. ---

    pub fn imagine(&self, prompt: impl Into<String>, nonce: impl Into<String>) -> Thunk {
        let upstream = Arc::clone(&self.upstream);
        let prompt = prompt.into();
        let nonce = nonce.into();
        Box::pin(async move { upstream.imagine(&prompt, &nonce).await })
    }

    pub fn upscale(&self, target: ActionTarget) -> Thunk {
        let upstream = Arc::clone(&self.upstream);
        Box::pin(async move { upstream.upscale(target).await })
    }

    pub fn variation(&self, target: ActionTarget) -> Thunk {
        let upstream = Arc::clone(&self.upstream);
        Box::pin(async move { upstream.variation(target).await })
    }

    pub fn reroll(&self, target: ActionTarget) -> Thunk {
        let upstream = Arc::clone(&self.upstream);
        Box::pin(async move { upstream.reroll(target).await })
    }

    pub fn action(
        &self,
        message_id: impl Into<String>,
        custom_id: impl Into<String>,
        flags: u32,
        nonce: impl Into<String>,
    ) -> Thunk {
        let upstream = Arc::clone(&self.upstream);
        let message_id = message_id.into();
        let custom_id = custom_id.into();
        let nonce = nonce.into();
        Box::pin(async move { upstream.action(&message_id, &custom_id, flags, &nonce).await })
    }

    pub fn describe(&self, final_file_name: impl Into<String>, nonce: impl Into<String>) -> Thunk {
        let upstream = Arc::clone(&self.upstream);
        let final_file_name = final_file_name.into();
        let nonce = nonce.into();
        Box::pin(async move { upstream.describe(&final_file_name, &nonce).await })
    }

    pub fn blend(&self, final_file_names: Vec<String>, dimensions: BlendDimensions, nonce: impl Into<String>) -> Thunk {
        let upstream = Arc::clone(&self.upstream);
        let nonce = nonce.into();
        Box::pin(async move { upstream.blend(final_file_names, dimensions, &nonce).await })
    }

    pub fn upload(&self, file_name: impl Into<String>, data_url: impl Into<String>) -> Thunk {
        let upstream = Arc::clone(&self.upstream);
        let file_name = file_name.into();
        let data_url = data_url.into();
        Box::pin(async move { upstream.upload(&file_name, &data_url).await })
    }

    pub fn send_image_message(&self, content: impl Into<String>, final_file_name: impl Into<String>) -> Thunk {
        let upstream = Arc::clone(&self.upstream);
        let content = content.into();
        let final_file_name = final_file_name.into();
        Box::pin(async move { upstream.send_image_message(&content, &final_file_name).await })
    }

    // --- Dispatcher / executor (spec.md §4.3) ---

    async fn dispatcher_loop(self: Arc<Self>) {
        loop {
            self.work_signal.wait().await;
            if self.shutting_down.load(Ordering::SeqCst) {
                return;
            }
            self.drain().await;
            if self.shutting_down.load(Ordering::SeqCst) {
                return;
            }
        }
    }

    async fn drain(self: &Arc<Self>) {
        loop {
            if self.queue.lock().is_empty() || self.shutting_down.load(Ordering::SeqCst) {
                return;
            }
            // The acquire-before-dequeue ordering ensures a task is never
            // taken out of the queue without a reserved execution slot.
            if !self.semaphore.try_acquire(self.config.acquire_poll_interval).await {
                continue;
            }
            let entry = self.queue.lock().pop_front();
            let Some(entry) = entry else {
                self.semaphore.release();
                continue;
            };
            let task_id = entry.task.id.clone();
            let worker = Arc::clone(self);
            let handle = tokio::spawn(async move { worker.execute(entry.task, entry.thunk).await });
            self.futures.lock().insert(task_id, handle);
        }
    }

    #[tracing::instrument(skip_all, fields(account_id = %self.account.id, task_id = %task.id))]
    async fn execute(self: Arc<Self>, task: TaskInfo, thunk: Thunk) {
        // The permit backing this execution was already reserved by
        // `drain`'s `TryAcquire`; `execute` releases it exactly once, in its
        // finally block below.
        self.running.lock().insert(task.id.clone(), task.clone());

        let outcome = thunk.await;
        let rejected = match outcome {
            Ok(message) if message.is_success() => None,
            Ok(message) => Some(message.description),
            Err(err) => Some(format!("[Internal Server Error] {err}")),
        };

        if let Some(reason) = rejected {
            if let Some(snapshot) = self.fail_running(&task.id, reason) {
                self.persist_and_notify(&snapshot).await;
            }
        } else {
            self.run_poll_loop(&task.id).await;
        }

        self.running.lock().remove(&task.id);
        self.futures.lock().remove(&task.id);
        self.semaphore.release();
    }

    async fn run_poll_loop(&self, task_id: &TaskId) {
        let submitted = self.mutate_running(task_id, |task| {
            let _ = task.set_status(TaskStatus::Submitted, &self.clock);
            let _ = task.set_progress("0%", &self.clock);
        });
        let Some(snapshot) = submitted else { return };
        self.persist_and_notify(&snapshot).await;

        // First grace period: give upstream time to register the job and
        // the correlating messageId.
        tokio::time::sleep(self.config.poll_interval).await;
        if let Some(snapshot) = self.snapshot_running(task_id) {
            self.persist_and_notify(&snapshot).await;
        }

        loop {
            let Some(snapshot) = self.snapshot_running(task_id) else {
                return;
            };
            if !matches!(snapshot.status, TaskStatus::Submitted | TaskStatus::InProgress) {
                return;
            }
            if self.watchdog_expired(&snapshot) {
                if let Some(snapshot) = self.fail_running(task_id, "timeout") {
                    self.persist_and_notify(&snapshot).await;
                }
                return;
            }

            tokio::time::sleep(self.config.poll_interval).await;
            if let Some(snapshot) = self.snapshot_running(task_id) {
                self.persist_and_notify(&snapshot).await;
            }
        }
    }

    fn watchdog_expired(&self, task: &TaskInfo) -> bool {
        let (Some(watchdog), Some(start)) = (self.config.watchdog, task.start_time) else {
            return false;
        };
        self.clock.epoch_ms().saturating_sub(start) > watchdog.as_millis() as u64
    }

    fn fail_running(&self, task_id: &TaskId, reason: impl Into<String>) -> Option<TaskInfo> {
        let reason = reason.into();
        self.mutate_running(task_id, |task| {
            if task.fail(reason, &self.clock).is_err() {
                tracing::warn!(task_id = %task.id, "fail() rejected: task already terminal");
            }
        })
    }

    fn mutate_running(&self, task_id: &TaskId, f: impl FnOnce(&mut TaskInfo)) -> Option<TaskInfo> {
        let mut running = self.running.lock();
        let task = running.get_mut(task_id)?;
        f(task);
        Some(task.clone())
    }

    fn snapshot_running(&self, task_id: &TaskId) -> Option<TaskInfo> {
        self.running.lock().get(task_id).cloned()
    }

    async fn persist_and_notify(&self, task: &TaskInfo) {
        if let Err(err) = self.store.save(task).await {
            tracing::warn!(task_id = %task.id, error = %err, "failed to persist task state");
        }
        if let Err(err) = self.notifier.notify_task_change(task).await {
            tracing::warn!(task_id = %task.id, error = %err, "failed to notify task change");
        }
    }
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;
