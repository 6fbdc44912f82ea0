//! 实时推送客户端
//!
//! - 模拟模式：两个定时任务分别推送个股行情和市场状态，不建立网络连接
//! - 网络模式：WebSocket 会话，断开后按固定间隔重连，连上后重置重连计数
//!
//! 所有后台任务在 `disconnect` 或客户端销毁时取消

use chrono::Utc;
use futures::{SinkExt, StreamExt};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::config::RealtimeConfig;
use crate::error::{DataError, Result};
use crate::models::{topics, StockUpdate, SubscriptionRequest, WsMessage};
use crate::services::market_service::market_status;
use crate::services::mock::MockDataGenerator;

use super::hub::{MessageHub, SubscriptionId};

/// 连接状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// 发往会话任务的命令
enum Command {
    Send(String),
    Close,
}

/// 会话结束原因
#[derive(Debug, PartialEq, Eq)]
enum SessionEnd {
    /// 本端主动关闭，不再重连
    Client,
    /// 对端关闭或出错
    Remote,
}

/// 连接状态与发送通道，在客户端和会话任务间共享
#[derive(Default)]
struct Shared {
    state: RwLock<ConnectionState>,
    sender: RwLock<Option<mpsc::UnboundedSender<Command>>>,
}

impl Shared {
    fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    fn set_state(&self, state: ConnectionState) {
        *self.state.write() = state;
    }
}

/// 实时推送客户端
pub struct RealtimeClient {
    config: RealtimeConfig,
    mock_mode: bool,
    hub: Arc<MessageHub>,
    shared: Arc<Shared>,
    generator: Arc<MockDataGenerator>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl RealtimeClient {
    pub fn new(config: RealtimeConfig, mock_mode: bool) -> Self {
        Self::with_hub(config, mock_mode, Arc::new(MessageHub::new()))
    }

    /// 使用外部消息分发中心
    pub fn with_hub(config: RealtimeConfig, mock_mode: bool, hub: Arc<MessageHub>) -> Self {
        Self {
            config,
            mock_mode,
            hub,
            shared: Arc::new(Shared::default()),
            generator: Arc::new(MockDataGenerator::new()),
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn hub(&self) -> &Arc<MessageHub> {
        &self.hub
    }

    pub fn is_mock(&self) -> bool {
        self.mock_mode
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.state()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// 是否仍有后台任务在运行
    pub fn is_running(&self) -> bool {
        self.tasks.lock().iter().any(|t| !t.is_finished())
    }

    pub fn on<F>(&self, topic: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&WsMessage) + Send + Sync + 'static,
    {
        self.hub.on(topic, handler)
    }

    pub fn off(&self, id: SubscriptionId) -> bool {
        self.hub.off(id)
    }

    /// 建立连接；已有任务在运行时不重复连接
    ///
    /// 必须在 tokio 运行时内调用
    pub fn connect(&self) {
        let mut tasks = self.tasks.lock();
        tasks.retain(|t| !t.is_finished());
        if !tasks.is_empty() {
            log::debug!("实时连接已在运行");
            return;
        }

        if self.mock_mode {
            log::info!("实时推送运行在模拟模式");
            self.shared.set_state(ConnectionState::Connected);
            tasks.push(self.spawn_stock_updates());
            tasks.push(self.spawn_status_updates());
        } else {
            tasks.push(tokio::spawn(run_session(
                self.config.clone(),
                Arc::clone(&self.hub),
                Arc::clone(&self.shared),
            )));
        }
    }

    /// 断开连接并取消全部后台任务
    pub fn disconnect(&self) {
        if let Some(tx) = self.shared.sender.write().take() {
            let _ = tx.send(Command::Close);
        }
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
        self.shared.set_state(ConnectionState::Disconnected);
        log::info!("实时连接已断开");
    }

    /// 发送消息
    ///
    /// 模拟模式下没有对端，记录警告后丢弃并返回 Ok；网络模式未连接时返回 `NotConnected`
    pub fn send<P: Serialize>(&self, kind: &str, payload: &P) -> Result<()> {
        let message = WsMessage::new(kind, payload)?;

        if self.mock_mode {
            log::warn!("模拟模式下不发送实时消息: {}", message.kind);
            return Ok(());
        }

        let sender = self.shared.sender.read();
        match sender.as_ref() {
            Some(tx) if self.is_connected() => {
                let text = serde_json::to_string(&message)?;
                tx.send(Command::Send(text)).map_err(|_| DataError::NotConnected)
            }
            _ => {
                log::warn!("实时连接未建立，消息未发送: {}", message.kind);
                Err(DataError::NotConnected)
            }
        }
    }

    /// 订阅个股行情；模拟模式下已推送全部股票，无需订阅
    pub fn subscribe_to_stock(&self, symbol: &str) -> Result<()> {
        if self.mock_mode {
            return Ok(());
        }
        self.send(topics::SUBSCRIBE, &stock_subscription(symbol))
    }

    pub fn unsubscribe_from_stock(&self, symbol: &str) -> Result<()> {
        if self.mock_mode {
            return Ok(());
        }
        self.send(topics::UNSUBSCRIBE, &stock_subscription(symbol))
    }

    fn spawn_stock_updates(&self) -> JoinHandle<()> {
        let hub = Arc::clone(&self.hub);
        let generator = Arc::clone(&self.generator);
        let period = self.config.stock_update_interval();

        spawn_ticker(period, move || {
            let stock = generator.stock(None);
            let update = StockUpdate {
                symbol: stock.symbol,
                price: stock.price,
                change: stock.change,
                change_percent: stock.change_percent,
                volume: stock.volume,
                timestamp: Utc::now().to_rfc3339(),
            };
            publish(&hub, topics::STOCK_UPDATE, &update);
        })
    }

    fn spawn_status_updates(&self) -> JoinHandle<()> {
        let hub = Arc::clone(&self.hub);
        let period = self.config.market_status_interval();

        spawn_ticker(period, move || {
            publish(&hub, topics::MARKET_STATUS, &market_status(Utc::now()));
        })
    }
}

impl Drop for RealtimeClient {
    fn drop(&mut self) {
        for task in self.tasks.get_mut().drain(..) {
            task.abort();
        }
    }
}

fn stock_subscription(symbol: &str) -> SubscriptionRequest {
    SubscriptionRequest {
        kind: "stock".to_string(),
        symbol: symbol.to_string(),
    }
}

/// 构造消息并本地分发
fn publish<P: Serialize>(hub: &MessageHub, kind: &str, payload: &P) {
    match WsMessage::new(kind, payload) {
        Ok(message) => {
            hub.dispatch(&message);
        }
        Err(e) => log::error!("构造 {} 消息失败: {}", kind, e),
    }
}

/// 周期执行任务，首次执行在一个周期之后
fn spawn_ticker<F>(period: Duration, mut tick: F) -> JoinHandle<()>
where
    F: FnMut() + Send + 'static,
{
    let period = period.max(Duration::from_millis(1));
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        loop {
            interval.tick().await;
            tick();
        }
    })
}

/// WebSocket 会话循环，负责重连
async fn run_session(config: RealtimeConfig, hub: Arc<MessageHub>, shared: Arc<Shared>) {
    let mut attempts = 0;

    loop {
        shared.set_state(ConnectionState::Connecting);

        match connect_async(config.url.as_str()).await {
            Ok((stream, _)) => {
                log::info!("实时连接已建立: {}", config.url);
                attempts = 0;

                let (tx, rx) = mpsc::unbounded_channel();
                *shared.sender.write() = Some(tx);
                shared.set_state(ConnectionState::Connected);

                let end = pump(stream, rx, &hub).await;

                *shared.sender.write() = None;
                shared.set_state(ConnectionState::Disconnected);
                if end == SessionEnd::Client {
                    return;
                }
                log::warn!("实时连接断开: {}", config.url);
            }
            Err(e) => {
                shared.set_state(ConnectionState::Disconnected);
                log::error!("实时连接失败 {}: {}", config.url, e);
            }
        }

        if attempts >= config.max_reconnect_attempts {
            log::error!("已重连 {} 次，停止重连", attempts);
            return;
        }
        attempts += 1;
        tokio::time::sleep(config.reconnect_delay()).await;
        log::info!("正在重连（第 {} 次）", attempts);
    }
}

/// 收发帧直到连接结束
async fn pump<S>(
    stream: S,
    mut commands: mpsc::UnboundedReceiver<Command>,
    hub: &MessageHub,
) -> SessionEnd
where
    S: futures::Stream<Item = std::result::Result<Message, tokio_tungstenite::tungstenite::Error>>
        + futures::Sink<Message, Error = tokio_tungstenite::tungstenite::Error>
        + Unpin,
{
    let (mut write, mut read) = stream.split();

    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<WsMessage>(&text) {
                    Ok(message) => {
                        hub.dispatch(&message);
                    }
                    Err(e) => log::error!("解析实时消息失败: {}", e),
                },
                Some(Ok(Message::Close(_))) | None => return SessionEnd::Remote,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    log::error!("WebSocket 错误: {}", e);
                    return SessionEnd::Remote;
                }
            },
            command = commands.recv() => match command {
                Some(Command::Send(text)) => {
                    if let Err(e) = write.send(Message::Text(text)).await {
                        log::error!("发送实时消息失败: {}", e);
                        return SessionEnd::Remote;
                    }
                }
                Some(Command::Close) | None => {
                    let _ = write.close().await;
                    return SessionEnd::Client;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarketStatus;
    use tokio::net::TcpListener;
    use tokio::time::{sleep, timeout};

    fn fast_config() -> RealtimeConfig {
        RealtimeConfig {
            stock_update_interval_ms: 20,
            market_status_interval_secs: 0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_mock_timers_publish_and_stop() {
        let client = RealtimeClient::new(fast_config(), true);
        let stocks = Arc::new(Mutex::new(Vec::<StockUpdate>::new()));
        let statuses = Arc::new(Mutex::new(0usize));

        let s = Arc::clone(&stocks);
        client.on(topics::STOCK_UPDATE, move |m| {
            s.lock().push(m.payload_as().unwrap());
        });
        let st = Arc::clone(&statuses);
        client.on(topics::MARKET_STATUS, move |m| {
            let _: MarketStatus = m.payload_as().unwrap();
            *st.lock() += 1;
        });

        client.connect();
        assert!(client.is_connected());
        sleep(Duration::from_millis(150)).await;

        let seen = stocks.lock().len();
        println!("  收到 {} 条行情推送", seen);
        assert!(seen >= 3);
        assert!(*statuses.lock() >= 1);
        assert!(stocks.lock().iter().all(|u| u.price > 0.0));

        client.disconnect();
        assert!(!client.is_connected());
        let after = stocks.lock().len();
        sleep(Duration::from_millis(100)).await;
        assert_eq!(stocks.lock().len(), after);
        assert!(!client.is_running());
    }

    #[tokio::test]
    async fn test_mock_send_is_dropped() {
        let client = RealtimeClient::new(fast_config(), true);
        client.connect();
        assert!(client.is_connected());
        assert!(client.subscribe_to_stock("AAPL").is_ok());
        assert!(client.send("ping", &serde_json::json!({})).is_ok());
        client.disconnect();
        assert!(client.send("ping", &serde_json::json!({})).is_ok());
    }

    #[tokio::test]
    async fn test_reconnect_gives_up() {
        let config = RealtimeConfig {
            url: "ws://127.0.0.1:1".to_string(),
            max_reconnect_attempts: 2,
            reconnect_delay_secs: 0,
            ..Default::default()
        };
        let client = RealtimeClient::new(config, false);
        client.connect();

        for _ in 0..100 {
            if !client.is_running() {
                break;
            }
            sleep(Duration::from_millis(20)).await;
        }
        assert!(!client.is_running());
        assert_eq!(client.state(), ConnectionState::Disconnected);
        assert!(matches!(
            client.send("ping", &serde_json::json!({})),
            Err(DataError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_network_session_roundtrip() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (got_tx, mut got_rx) = mpsc::unbounded_channel::<String>();

        tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
            let push = WsMessage::new(topics::STOCK_UPDATE, &serde_json::json!({"symbol": "AAPL"})).unwrap();
            ws.send(Message::Text(serde_json::to_string(&push).unwrap()))
                .await
                .unwrap();
            while let Some(Ok(frame)) = ws.next().await {
                if let Message::Text(text) = frame {
                    let _ = got_tx.send(text);
                }
            }
        });

        let config = RealtimeConfig {
            url: format!("ws://{}", addr),
            ..Default::default()
        };
        let client = RealtimeClient::new(config, false);
        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel::<WsMessage>();
        client.on(topics::WILDCARD, move |m| {
            let _ = seen_tx.send(m.clone());
        });
        client.connect();

        let pushed = timeout(Duration::from_secs(2), seen_rx.recv()).await.unwrap().unwrap();
        assert_eq!(pushed.kind, topics::STOCK_UPDATE);
        assert_eq!(pushed.payload["symbol"], "AAPL");
        assert!(client.is_connected());

        client.subscribe_to_stock("MSFT").unwrap();
        let text = timeout(Duration::from_secs(2), got_rx.recv()).await.unwrap().unwrap();
        let frame: WsMessage = serde_json::from_str(&text).unwrap();
        assert_eq!(frame.kind, topics::SUBSCRIBE);
        let request: SubscriptionRequest = frame.payload_as().unwrap();
        assert_eq!(request, stock_subscription("MSFT"));

        client.disconnect();
        assert!(!client.is_connected());
    }
}
