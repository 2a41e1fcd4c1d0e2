//! HTTP页面抓取器
//! 超时、UA、响应体上限均来自 GlobalConfig
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::config::GlobalConfig;
use crate::error::{RstResult, RstagscanError};
use crate::service::PageSource;

/// HTTP页面抓取器
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl HttpPageFetcher {
    pub fn new(config: &GlobalConfig) -> RstResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

#[async_trait]
impl PageSource for HttpPageFetcher {
    async fn fetch(&self, url: &Url) -> RstResult<Vec<u8>> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RstagscanError::InvalidInput(format!(
                "不支持的协议：{}",
                url.scheme()
            )));
        }

        let mut response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        debug!("页面响应：{}，状态码 {}", url, status);

        if !status.is_success() {
            return Err(RstagscanError::FetchStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
            if body.len() > self.max_body_bytes {
                truncate_at_char_boundary(&mut body, self.max_body_bytes);
                warn!("响应体超过上限 {} 字节，已截断：{}", self.max_body_bytes, url);
                break;
            }
        }

        Ok(body)
    }
}

/// 截断到不超过 limit 的 UTF-8 字符边界
fn truncate_at_char_boundary(body: &mut Vec<u8>, limit: usize) {
    if body.len() <= limit {
        return;
    }
    let mut cut = limit;
    // 0b10xx_xxxx 为续字节
    while cut > 0 && (body[cut] & 0xC0) == 0x80 {
        cut -= 1;
    }
    body.truncate(cut);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::detector::TagDetector;
    use crate::rule::model::{TagStatus, TagType};
    use crate::service::ScanService;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// 单次应答的本地HTTP服务，返回监听地址与收到的请求头
    async fn serve_once(status_line: &str, body: &str) -> (SocketAddr, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_lowercase()
        });

        (addr, handle)
    }

    #[test]
    fn test_truncate_at_char_boundary() {
        let mut body = "ab中".as_bytes().to_vec(); // 中 = 3 字节
        truncate_at_char_boundary(&mut body, 3);
        assert_eq!(body, b"ab");

        let mut body = b"abcdef".to_vec();
        truncate_at_char_boundary(&mut body, 4);
        assert_eq!(body, b"abcd");

        let mut body = b"abc".to_vec();
        truncate_at_char_boundary(&mut body, 10);
        assert_eq!(body, b"abc");
    }

    #[tokio::test]
    async fn test_fetch_success_sends_user_agent() {
        let (addr, handle) = serve_once("200 OK", "<script>'GTM-AB12CD'</script>").await;
        let fetcher = HttpPageFetcher::new(&ConfigManager::get_default()).unwrap();
        let url = Url::parse(&format!("http://{}/", addr)).unwrap();

        let body = fetcher.fetch(&url).await.unwrap();
        assert_eq!(body, b"<script>'GTM-AB12CD'</script>");

        let request = handle.await.unwrap();
        assert!(request.starts_with("get / http/1.1"));
        assert!(request.contains("user-agent: tagsentry-tagscanner/1.0"));
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let (addr, _handle) = serve_once("404 Not Found", "missing").await;
        let fetcher = HttpPageFetcher::new(&ConfigManager::get_default()).unwrap();
        let url = Url::parse(&format!("http://{}/missing", addr)).unwrap();

        match fetcher.fetch(&url).await.unwrap_err() {
            RstagscanError::FetchStatus { status, reason } => {
                assert_eq!(status, 404);
                assert_eq!(reason, "Not Found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_truncates_large_body() {
        let page = "x".repeat(64);
        let (addr, _handle) = serve_once("200 OK", &page).await;
        let config = ConfigManager::custom().max_body_bytes(16).build();
        let fetcher = HttpPageFetcher::new(&config).unwrap();
        let url = Url::parse(&format!("http://{}/", addr)).unwrap();

        let body = fetcher.fetch(&url).await.unwrap();
        assert_eq!(body.len(), 16);
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_http_scheme() {
        let fetcher = HttpPageFetcher::new(&ConfigManager::get_default()).unwrap();
        let url = Url::parse("ftp://example.com/index.html").unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, RstagscanError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_scan_service_over_http() {
        let html = "<script>fbq('init', '123456789012345');</script>";
        let (addr, _handle) = serve_once("200 OK", html).await;
        let config = ConfigManager::get_default();
        let detector = Arc::new(TagDetector::new().unwrap());
        let service = ScanService::new(detector, HttpPageFetcher::new(&config).unwrap());

        let url = format!("http://{}/", addr);
        let report = service.scan(&url).await.unwrap();
        assert_eq!(report.url, url);
        let meta = report.tag(TagType::Meta).unwrap();
        assert_eq!(meta.status, TagStatus::Found);
        assert_eq!(meta.config_id.as_deref(), Some("123456789012345"));
    }
}
