//! HTTP 传输层
//!
//! 基于 `gloo-net` 的 fetch 实现，供核心 crate 的 `StreamflowApi` 使用。
//! multipart 请求由浏览器生成 boundary，因此不设置 Content-Type。

use gloo_net::http::{Method, RequestBuilder};
use streamflow::request::{HttpMethod, MultipartPart, RequestBody};
use streamflow::{ClientError, ClientResult, HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

fn js_error(context: &str, e: JsValue) -> ClientError {
    ClientError::network(format!("{}: {:?}", context, e))
}

fn to_form_data(parts: Vec<MultipartPart>) -> ClientResult<FormData> {
    let form = FormData::new().map_err(|e| js_error("创建 FormData 失败", e))?;
    for part in parts {
        match part {
            MultipartPart::Text { name, value } => form
                .append_with_str(&name, &value)
                .map_err(|e| js_error("写入表单字段失败", e))?,
            MultipartPart::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                let bytes = js_sys::Uint8Array::from(data.as_slice());
                let options = BlobPropertyBag::new();
                options.set_type(&content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(
                    &js_sys::Array::of1(&bytes),
                    &options,
                )
                .map_err(|e| js_error("创建 Blob 失败", e))?;
                form.append_with_blob_and_filename(&name, &blob, &file_name)
                    .map_err(|e| js_error("写入文件字段失败", e))?;
            }
        }
    }
    Ok(form)
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let method = match req.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut builder = RequestBuilder::new(&req.url).method(method);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(RequestBody::Json(body)) => builder.body(body),
            Some(RequestBody::Multipart(parts)) => builder.body(to_form_data(parts)?),
            None => builder.build(),
        }
        .map_err(|e| ClientError::network(e.to_string()))?;

        let resp = request
            .send()
            .await
            .map_err(|e| ClientError::network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
