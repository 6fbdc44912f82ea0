//! 实时推送模块
//!
//! `MessageHub` 负责按消息类型分发，`RealtimeClient` 负责产生消息（模拟定时器或 WebSocket）

pub mod client;
pub mod hub;

pub use client::{ConnectionState, RealtimeClient};
pub use hub::{Handler, MessageHub, SubscriptionId};
