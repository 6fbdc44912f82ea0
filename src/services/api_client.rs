//! 后端 REST 客户端
//!
//! 所有接口返回统一信封 `{success, data, message, timestamp}`，
//! 客户端负责拆信封；失败时先记录日志再把错误原样返回给调用方，不做重试

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::DataConfig;
use crate::error::{DataError, Result};
use crate::models::ApiResponse;

/// REST 客户端
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

/// 拆开响应信封，取出 data
pub fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<T> {
    if !envelope.success {
        return Err(DataError::Api {
            message: envelope.message.unwrap_or_else(|| "未知错误".to_string()),
        });
    }
    envelope.data.ok_or(DataError::EmptyData)
}

/// 仅检查信封的 success 标志，忽略 data
pub fn check_envelope<T>(envelope: ApiResponse<T>) -> Result<()> {
    if envelope.success {
        Ok(())
    } else {
        Err(DataError::Api {
            message: envelope.message.unwrap_or_else(|| "未知错误".to_string()),
        })
    }
}

/// 规范化根地址，保证以 `/` 结尾以便拼接相对路径
fn normalize_base(base: &str) -> Result<Url> {
    let mut base = base.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(Url::parse(&base)?)
}

impl ApiClient {
    pub fn new(config: &DataConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base(&config.base_url)?,
            auth_token: config.auth_token.clone().filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 拼接接口地址，path 可带或不带前导 `/`
    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let envelope = self.request(Method::GET, path, |req| req).await?;
        unwrap_envelope(envelope)
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let envelope = self.request(Method::GET, path, |req| req.query(query)).await?;
        unwrap_envelope(envelope)
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let envelope = self.request(Method::POST, path, |req| req.json(body)).await?;
        unwrap_envelope(envelope)
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let envelope = self.request(Method::PUT, path, |req| req.json(body)).await?;
        unwrap_envelope(envelope)
    }

    /// DELETE 请求，data 返回值按需解析
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let envelope = self.request(Method::DELETE, path, |req| req).await?;
        unwrap_envelope(envelope)
    }

    /// DELETE 请求，不关心 data
    pub async fn delete_unit(&self, path: &str) -> Result<()> {
        let envelope = self
            .request::<serde_json::Value, _>(Method::DELETE, path, |req| req)
            .await?;
        check_envelope(envelope)
    }

    /// 发送请求并解析信封；失败时记录日志
    async fn request<T, F>(&self, method: Method, path: &str, build: F) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let result = self.execute(method.clone(), path, build).await;
        if let Err(e) = &result {
            log::error!("API 请求失败 {} {}: {}", method, path, e);
        }
        result
    }

    async fn execute<T, F>(&self, method: Method, path: &str, build: F) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path)?;
        log::debug!("API 请求 {} {}", method, url);

        let mut req = self.client.request(method, url);
        if let Some(token) = &self.auth_token {
            req = req.bearer_auth(token);
        }
        let response = build(req).send().await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            // 尽量取出后端给出的错误信息
            let message = serde_json::from_slice::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|env| env.message)
                .unwrap_or_else(|| status.to_string());
            return Err(DataError::Api {
                message: format!("HTTP {}: {}", status.as_u16(), message),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
