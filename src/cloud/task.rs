use crossbeam::channel::{self, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

/// 周期任务句柄
///
/// 句柄 drop 时发送停止信号并等待线程结束，正在执行的一轮任务会先执行完
pub struct TaskHandle {
    name: &'static str,
    stop_sender: Option<Sender<()>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl TaskHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 任务线程是否已经退出
    pub fn is_finished(&self) -> bool {
        self.thread_handle
            .as_ref()
            .map_or(true, |handle| handle.is_finished())
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if let Some(sender) = self.stop_sender.take() {
            let _ = sender.send(());
        }
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

/// 启动周期任务：每等待 `interval` 执行一次 `task`，直到句柄被 drop
pub fn spawn_periodic<F>(name: &'static str, interval: Duration, mut task: F) -> TaskHandle
where
    F: FnMut() + Send + 'static,
{
    let (stop_tx, stop_rx) = channel::bounded::<()>(1);

    let thread_handle = thread::spawn(move || {
        loop {
            crossbeam::select! {
                recv(stop_rx) -> _ => break,
                default(interval) => task(),
            }
        }
        debug!(task = name, "periodic task stopped");
    });

    TaskHandle {
        name,
        stop_sender: Some(stop_tx),
        thread_handle: Some(thread_handle),
    }
}
