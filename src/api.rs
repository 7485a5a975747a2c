use crate::config::ServiceEndpoints;
use crate::error::{ClientError, ClientResult};
use crate::forms::UploadSubmission;
use crate::request::{HttpClient, HttpRequest, MultipartPart};
use streamflow_shared::card::VideoCard;
use streamflow_shared::protocol::{
    ApiRequest, CommentRequest, HttpMethod, LikeRequest, ListVideosRequest, ProfileRequest,
    RecordViewRequest, SearchMode, SearchRequest, Service, SocialStatsRequest, SocialVideosRequest,
    UPLOAD_PATH,
};
use streamflow_shared::{
    Ack, AuthResponse, LoginRequest, RegisterRequest, SocialStats, User, Video,
};

// =========================================================
// 业务网关: StreamflowApi
// =========================================================

/// 四个外部服务的统一入口
///
/// 这里接受任何实现了 HttpClient 的客户端，
/// 从而解耦了具体的 HTTP 实现（浏览器 fetch / 测试 Mock）。
pub struct StreamflowApi<C> {
    client: C,
    endpoints: ServiceEndpoints,
}

impl<C: HttpClient> StreamflowApi<C> {
    pub fn new(client: C, endpoints: ServiceEndpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn endpoints(&self) -> &ServiceEndpoints {
        &self.endpoints
    }

    /// 发送一个类型化请求
    ///
    /// 非 2xx 响应会被转换为 `ClientErrorKind::Status`，
    /// 消息取自响应体的 `error` 字段。
    pub async fn send<R: ApiRequest>(&self, req: &R, token: Option<&str>) -> ClientResult<R::Response> {
        let path = req.path();
        let url = self.endpoints.url(R::SERVICE, &path);

        let mut http = HttpRequest::new(&url, R::METHOD);
        if R::JSON_BODY {
            http = http.with_json(serde_json::to_value(req)?);
        }
        if R::AUTHENTICATED {
            let token = token.ok_or_else(|| {
                ClientError::validation("Not signed in").in_op_with("api.auth", path.clone())
            })?;
            http = http.with_bearer(token);
        }

        log::debug!("{} {}", R::METHOD.as_str(), url);
        let resp = self
            .client
            .send(http)
            .await
            .map_err(|e| e.in_op_with("api.send", path.clone()))?;

        if !resp.ok() {
            return Err(ClientError::status(resp.status, resp.error_message())
                .in_op_with("api.status", path));
        }

        resp.json::<R::Response>()
            .map_err(|e| e.in_op_with("api.decode", path))
    }

    // --- Auth ---

    pub async fn login(&self, req: &LoginRequest) -> ClientResult<AuthResponse> {
        self.send(req, None).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<AuthResponse> {
        self.send(req, None).await
    }

    pub async fn profile(&self, token: &str) -> ClientResult<User> {
        self.send(&ProfileRequest, Some(token)).await
    }

    // --- Catalogue ---

    pub async fn list_videos(&self) -> ClientResult<Vec<VideoCard>> {
        let items = self.send(&ListVideosRequest, None).await?;
        Ok(items
            .iter()
            .map(|item| VideoCard::from_listing(item, &self.endpoints.video))
            .collect())
    }

    pub async fn search(&self, query: &str, mode: SearchMode) -> ClientResult<Vec<VideoCard>> {
        let req = SearchRequest {
            query: query.to_string(),
            mode,
        };
        let hits = self.send(&req, None).await?;
        Ok(hits
            .iter()
            .map(|hit| VideoCard::from_search_hit(hit, &self.endpoints.video))
            .collect())
    }

    // --- Social ---

    pub async fn social_stats(&self, video_id: &str) -> ClientResult<SocialStats> {
        self.send(
            &SocialStatsRequest {
                video_id: video_id.to_string(),
            },
            None,
        )
        .await
    }

    pub async fn record_view(&self, video_id: &str) -> ClientResult<Ack> {
        self.send(
            &RecordViewRequest {
                video_id: video_id.to_string(),
            },
            None,
        )
        .await
    }

    pub async fn like(&self, video_id: &str) -> ClientResult<Ack> {
        self.send(
            &LikeRequest {
                video_id: video_id.to_string(),
            },
            None,
        )
        .await
    }

    pub async fn comment(&self, video_id: &str, text: &str) -> ClientResult<Ack> {
        self.send(
            &CommentRequest {
                video_id: video_id.to_string(),
                text: text.to_string(),
            },
            None,
        )
        .await
    }

    pub async fn social_videos(&self) -> ClientResult<Vec<Video>> {
        self.send(&SocialVideosRequest, None).await
    }

    // --- Upload ---

    /// multipart 上传到视频服务根路径
    ///
    /// 字段: `video`（文件）、`title`、`description`、`uploader`，
    /// 时长可读时附带 `duration`（秒）。
    pub async fn upload(&self, submission: &UploadSubmission) -> ClientResult<()> {
        let url = self.endpoints.url(Service::Video, UPLOAD_PATH);

        let mut parts = vec![
            MultipartPart::File {
                name: "video".to_string(),
                file_name: submission.file.name.clone(),
                content_type: submission.file.content_type.clone(),
                data: submission.file.data.clone(),
            },
            MultipartPart::Text {
                name: "title".to_string(),
                value: submission.title.clone(),
            },
            MultipartPart::Text {
                name: "description".to_string(),
                value: submission.description.clone(),
            },
            MultipartPart::Text {
                name: "uploader".to_string(),
                value: submission.uploader.clone(),
            },
        ];
        if let Some(duration) = submission.duration.filter(|d| d.is_finite()) {
            parts.push(MultipartPart::Text {
                name: "duration".to_string(),
                value: duration.to_string(),
            });
        }

        let req = HttpRequest::new(&url, HttpMethod::Post).with_multipart(parts);
        let resp = self
            .client
            .send(req)
            .await
            .map_err(|e| e.in_op("api.upload"))?;

        if !resp.ok() {
            return Err(ClientError::status(resp.status, resp.error_message()).in_op("api.upload"));
        }
        Ok(())
    }
}
