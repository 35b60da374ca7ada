use super::manager::{CommandOutcome, ScreenToken};
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub owner: Option<ScreenToken>,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Result of a background command, tagged with the screen that owns it
#[derive(Debug)]
pub struct TaskCompletion {
    pub id: TaskId,
    pub owner: Option<ScreenToken>,
    pub description: String,
    pub result: anyhow::Result<CommandOutcome>,
}

/// Runs background commands on the tokio runtime and reports their results
/// over a channel
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    completion_sender: mpsc::UnboundedSender<TaskCompletion>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TaskCompletion>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                completion_sender: tx,
            },
            rx,
        )
    }

    /// Spawn a background command owned by `owner`
    pub fn spawn<Fut>(&mut self, owner: Option<ScreenToken>, description: String, operation: Fut) -> TaskId
    where
        Fut: Future<Output = anyhow::Result<CommandOutcome>> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let completion_sender = self.completion_sender.clone();
        let desc_for_task = description.clone();

        log::debug!("Spawning task {}: {}", task_id, description);
        let handle = tokio::spawn(async move {
            let result = operation.await;
            let _ = completion_sender.send(TaskCompletion {
                id: task_id,
                owner,
                description: desc_for_task,
                result,
            });
        });

        let task = BackgroundTask {
            id: task_id,
            owner,
            handle,
            description,
            started_at: std::time::Instant::now(),
        };

        self.tasks.insert(task_id, task);
        task_id
    }

    /// Forget a task whose completion has been received
    pub fn finish(&mut self, task_id: TaskId) {
        self.tasks.remove(&task_id);
    }

    /// Abort every task owned by a screen that has been closed
    pub fn cancel_owned_by(&mut self, owner: ScreenToken) -> usize {
        let owned: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.owner == Some(owner))
            .map(|(id, _)| *id)
            .collect();

        for task_id in &owned {
            if let Some(task) = self.tasks.remove(task_id) {
                log::debug!(
                    "Cancelling task {} ({}) after {:?}",
                    task.id,
                    task.description,
                    task.started_at.elapsed()
                );
                task.handle.abort();
            }
        }
        owned.len()
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}
