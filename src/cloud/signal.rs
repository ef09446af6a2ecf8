use crossbeam::channel::{self, Receiver, Sender};

/// 单槽位的更新通知
///
/// 最多只有一个未消费的通知。刷新线程用 [`UpdateSignal::notify`] 发送，
/// 已有未消费的通知时发送会被丢弃；消费方用 [`UpdateSignal::take`] 取走并清空
#[derive(Debug)]
pub struct UpdateSignal {
    sender: Sender<()>,
    receiver: Receiver<()>,
}

impl UpdateSignal {
    pub fn new() -> Self {
        let (sender, receiver) = channel::bounded(1);
        Self { sender, receiver }
    }

    /// 槽位为空时写入通知，返回是否写入
    pub fn notify(&self) -> bool {
        self.sender.try_send(()).is_ok()
    }

    /// 取走通知，返回之前是否有未消费的通知
    pub fn take(&self) -> bool {
        self.receiver.try_recv().is_ok()
    }

    /// 是否有未消费的通知，不改变状态
    pub fn is_pending(&self) -> bool {
        !self.receiver.is_empty()
    }
}

impl Default for UpdateSignal {
    fn default() -> Self {
        Self::new()
    }
}
