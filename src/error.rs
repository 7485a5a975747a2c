use std::fmt;

// =========================================================
// 错误类型枚举
// =========================================================

/// 客户端错误的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    /// 请求未能到达服务（连接失败、CORS、DNS 等）
    Network,
    /// 服务返回了非 2xx 状态码
    Status,
    /// 响应体无法解析为预期的 JSON
    Parse,
    /// 客户端表单校验失败，请求不会被发出
    Validation,
    /// 浏览器本地存储读写失败
    Storage,
}

impl ClientErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientErrorKind::Network => "NETWORK_ERROR",
            ClientErrorKind::Status => "HTTP_STATUS",
            ClientErrorKind::Parse => "JSON_PARSE_ERROR",
            ClientErrorKind::Validation => "INVALID_INPUT",
            ClientErrorKind::Storage => "STORAGE_ERROR",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "api.send", "session.restore"
    pub operation: String,
    /// 额外的细节信息，如请求路径
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端统一错误
///
/// - kind: 错误分类
/// - message: 可以直接展示给用户的消息
/// - status: 非 2xx 响应的状态码
/// - spans: 结构化的调用追踪栈
#[derive(Debug)]
pub struct ClientError {
    kind: ClientErrorKind,
    message: String,
    status: Option<u16>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    spans: Vec<ErrorSpan>,
}

impl ClientError {
    pub fn new(kind: ClientErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Network, message)
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(ClientErrorKind::Status, message);
        err.status = Some(code);
        err
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Parse, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Validation, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Storage, message)
    }

    // --- Context builders ---

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    /// 设置原始错误源
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    pub fn kind(&self) -> ClientErrorKind {
        self.kind
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status
    }

    /// 令牌被服务端拒绝 (401)
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::parse(e.to_string()).with_source(e)
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
