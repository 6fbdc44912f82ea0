//! TickerFilter 后端服务
//!
//! 提供股票筛选、自选股、事件日历和市场概览的 RESTful API 服务
//! 数据来源：本地模拟生成器或上游 REST 接口

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use tickerfilter_backend::config::AppConfig;
use tickerfilter_backend::handlers;
use tickerfilter_backend::models::topics;
use tickerfilter_backend::services::{DataService, MarketService, RealtimeClient};

/// 应用程序入口
///
/// 加载配置后启动 HTTP 服务器，并在后台维持实时推送连接
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();

    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    log::info!(
        "启动 TickerFilter 后端服务，数据模式: {}",
        if config.data.mock_mode { "模拟" } else { "网络" }
    );

    let data = web::Data::new(DataService::from_config(&config.data)?);
    let market = web::Data::new(MarketService::new());

    let realtime = RealtimeClient::new(config.realtime.clone(), config.data.mock_mode);
    realtime.on(topics::WILDCARD, |msg| {
        log::debug!("实时消息: {} {}", msg.kind, msg.payload);
    });
    realtime.connect();

    let bind_addr = config.bind_addr();
    log::info!("监听地址: {}", bind_addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())  // 请求日志
            .app_data(data.clone())
            .app_data(market.clone())
            .configure(handlers::config)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server.bind(bind_addr)?.run().await;

    realtime.disconnect();
    log::info!("服务已停止");

    result.map_err(Into::into)
}
