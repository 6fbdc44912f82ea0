//! 实时消息分发
//!
//! 按消息类型注册处理函数，分发时先调用该类型的处理函数，再调用通配 `*` 处理函数，
//! 同组内按注册顺序执行

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::models::{topics, WsMessage};

/// 消息处理函数
pub type Handler = Arc<dyn Fn(&WsMessage) + Send + Sync>;

/// 订阅凭据，用于取消订阅
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    topic: String,
    handler: Handler,
}

/// 消息分发中心
#[derive(Default)]
pub struct MessageHub {
    next_id: AtomicU64,
    subscriptions: RwLock<Vec<Subscription>>,
}

impl MessageHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// 订阅指定类型的消息，`*` 订阅全部类型
    pub fn on<F>(&self, topic: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&WsMessage) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscriptions.write().push(Subscription {
            id,
            topic: topic.to_string(),
            handler: Arc::new(handler),
        });
        id
    }

    /// 取消单个订阅
    pub fn off(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscriptions.write();
        let before = subs.len();
        subs.retain(|s| s.id != id);
        subs.len() != before
    }

    /// 取消某类型的全部订阅，返回移除数量
    pub fn off_topic(&self, topic: &str) -> usize {
        let mut subs = self.subscriptions.write();
        let before = subs.len();
        subs.retain(|s| s.topic != topic);
        before - subs.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// 分发消息，返回被调用的处理函数数量
    ///
    /// 处理函数在锁外执行，可以在回调中继续订阅或取消订阅
    pub fn dispatch(&self, message: &WsMessage) -> usize {
        let handlers: Vec<Handler> = {
            let subs = self.subscriptions.read();
            let typed = subs.iter().filter(|s| s.topic == message.kind);
            let wildcard = subs.iter().filter(|s| s.topic == topics::WILDCARD);
            typed
                .chain(wildcard)
                .map(|s| Arc::clone(&s.handler))
                .collect()
        };

        for handler in &handlers {
            handler(message);
        }
        handlers.len()
    }
}
