//! 扫描服务：校验URL → 抓取页面 → 检测
//! 抓取失败在进入检测引擎之前返回错误，引擎只处理成功获取的页面
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use crate::detector::TagDetector;
use crate::error::{RstResult, RstagscanError};
use crate::rule::model::ScanReport;

/// 页面来源（抓取服务）
#[async_trait]
pub trait PageSource: Send + Sync {
    /// 返回完整响应体；非成功状态或网络错误需返回 Err
    async fn fetch(&self, url: &Url) -> RstResult<Vec<u8>>;
}

/// 校验URL：必须非空且为合法的绝对URL
pub fn validate_url(raw: &str) -> RstResult<Url> {
    if raw.trim().is_empty() {
        return Err(RstagscanError::InvalidInput("URL is required".to_string()));
    }
    Ok(Url::parse(raw)?)
}

/// 扫描服务
pub struct ScanService<S> {
    detector: Arc<TagDetector>,
    source: S,
}

impl<S: PageSource> ScanService<S> {
    pub fn new(detector: Arc<TagDetector>, source: S) -> Self {
        Self { detector, source }
    }

    pub fn detector(&self) -> &TagDetector {
        &self.detector
    }

    /// 扫描指定URL，报告中的 url 保持调用方输入原样
    pub async fn scan(&self, raw_url: &str) -> RstResult<ScanReport> {
        let url = validate_url(raw_url)?;
        debug!("开始抓取页面：{}", url);

        let body = self.source.fetch(&url).await?;
        debug!("页面抓取完成：{}，{} 字节", url, body.len());

        let report = self.detector.scan_bytes(raw_url, &body);
        info!(
            "扫描完成：{}，检测到{}/{}个平台",
            raw_url,
            report.found_count(),
            report.tags.len()
        );
        Ok(report)
    }
}
