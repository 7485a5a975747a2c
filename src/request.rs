use crate::error::{ClientError, ClientResult};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::rc::Rc;
use streamflow_shared::ErrorBody;

pub use streamflow_shared::protocol::HttpMethod;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// multipart 表单中的一段
#[derive(Debug, Clone, PartialEq)]
pub enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(String),
    Multipart(Vec<MultipartPart>),
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header("Authorization", &format!("Bearer {}", token))
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(RequestBody::Json(body.to_string()));
        self
    }

    /// multipart 的 Content-Type（含 boundary）由底层实现生成
    pub fn with_multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = Some(RequestBody::Multipart(parts));
        self
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        serde_json::from_str(&self.body).map_err(ClientError::from)
    }

    /// 非 2xx 响应的可展示消息：优先使用服务端给出的 `error`，否则为 `Error: <status>`
    pub fn error_message(&self) -> String {
        serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| format!("Error: {}", self.status))
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为浏览器环境下的 future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse>;
}

#[async_trait::async_trait(?Send)]
impl<T: HttpClient + ?Sized> HttpClient for Rc<T> {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        (**self).send(req).await
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub use mock::MockHttpClient;


// =========================================================
// 测试工具: 真实网络客户端 (仅用于手动冒烟测试)
// =========================================================

#[cfg(test)]
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[cfg(test)]
impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &req.url);

        for (k, v) in req.headers {
            builder = builder.header(k, v);
        }

        match req.body {
            Some(RequestBody::Json(body)) => builder = builder.body(body),
            Some(RequestBody::Multipart(parts)) => {
                let mut form = reqwest::multipart::Form::new();
                for part in parts {
                    form = match part {
                        MultipartPart::Text { name, value } => form.text(name, value),
                        MultipartPart::File {
                            name,
                            file_name,
                            content_type,
                            data,
                        } => {
                            let file = reqwest::multipart::Part::bytes(data)
                                .file_name(file_name)
                                .mime_str(&content_type)
                                .map_err(|e| ClientError::network(e.to_string()))?;
                            form.part(name, file)
                        }
                    };
                }
                builder = builder.multipart(form);
            }
            None => {}
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| ClientError::network(format!("Reqwest Error: {}", e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::network(format!("Reqwest Body Error: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
