//! # 事件接收端
//!
//! 调用方提供的 `BatchEvent` 接收者。
//!
//! 引擎只在收集线程上调用 `emit`，因此实现无需线程安全。
//!
//! ## 依赖关系
//! - 被 `batch/engine.rs` 调用
//! - 使用 `crossbeam-channel` 支持拉取式消费

use crate::models::BatchEvent;

use crossbeam_channel::Sender;

/// 批处理事件接收端
pub trait EventSink {
    fn emit(&mut self, event: BatchEvent);
}

impl<F: FnMut(BatchEvent)> EventSink for F {
    fn emit(&mut self, event: BatchEvent) {
        self(event)
    }
}

/// 丢弃全部事件
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: BatchEvent) {}
}

/// 按顺序记录全部事件
impl EventSink for Vec<BatchEvent> {
    fn emit(&mut self, event: BatchEvent) {
        self.push(event)
    }
}

/// 转发到通道，供其他线程拉取
///
/// 接收端已关闭时静默丢弃事件。
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<BatchEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<BatchEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: BatchEvent) {
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_sink_forwards() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut sink = ChannelSink::new(tx);
        sink.emit(BatchEvent::BatchCompleted { results: vec![] });
        assert_eq!(rx.try_recv().unwrap(), BatchEvent::BatchCompleted { results: vec![] });
    }

    #[test]
    fn test_channel_sink_ignores_closed_receiver() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut sink = ChannelSink::new(tx);
        sink.emit(BatchEvent::BatchCompleted { results: vec![] });
    }

    #[test]
    fn test_vec_sink_records() {
        let mut sink: Vec<BatchEvent> = Vec::new();
        sink.emit(BatchEvent::FileStarted {
            index: 0,
            name: "a.txt".to_string(),
        });
        sink.emit(BatchEvent::BatchCompleted { results: vec![] });

        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].file_index(), Some(0));
        assert!(matches!(sink[1], BatchEvent::BatchCompleted { .. }));
    }

    #[test]
    fn test_closure_sink() {
        let mut count = 0;
        let mut sink = |_event: BatchEvent| count += 1;
        sink.emit(BatchEvent::BatchCompleted { results: vec![] });
        sink.emit(BatchEvent::BatchCompleted { results: vec![] });
        assert_eq!(count, 2);
    }
}
