//! 检测器核心：整合CMS识别、平台检测、建议生成，组装扫描报告
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use super::analyzer::{CmsAnalyzer, TagAnalyzer};
use super::recommender::Recommender;
use crate::compiler::{CompiledRuleLibrary, RuleCompiler};
use crate::error::{RstResult, RstagscanError};
use crate::rule::model::{CmsId, RuleLibrary, ScanReport, TagRecord};
use crate::rule::RuleLoader;

/// 跟踪代码检测器
/// 只持有不可变的编译后规则库，可跨线程共享
#[derive(Debug, Clone)]
pub struct TagDetector {
    compiled_lib: Arc<CompiledRuleLibrary>,
}

impl TagDetector {
    /// 使用内置规则创建检测器
    pub fn new() -> RstResult<Self> {
        Self::with_rules(&RuleLoader::builtin()?)
    }

    /// 使用自定义规则库创建检测器
    pub fn with_rules(rule_lib: &RuleLibrary) -> RstResult<Self> {
        let compiled_lib = RuleCompiler::compile(rule_lib)?;
        Ok(Self {
            compiled_lib: Arc::new(compiled_lib),
        })
    }

    pub fn compiled_lib(&self) -> &CompiledRuleLibrary {
        &self.compiled_lib
    }

    /// CMS识别
    pub fn classify_cms(&self, html: &str) -> Option<CmsId> {
        CmsAnalyzer::analyze(&self.compiled_lib, html)
    }

    /// 全平台检测（每个平台恰好一条记录，顺序固定）
    pub fn detect_tags(&self, html: &str) -> Vec<TagRecord> {
        TagAnalyzer::analyze(&self.compiled_lib, html)
    }

    /// 核心扫描接口：对任意文本输入都返回完整报告
    pub fn scan(&self, url: &str, html: &str) -> ScanReport {
        let start = Instant::now();

        let detected_cms = self.classify_cms(html);
        let tags = self.detect_tags(html);
        let recommendations = Recommender::synthesize(&tags);

        let report = ScanReport {
            url: url.to_string(),
            scan_timestamp: Utc::now(),
            detected_cms,
            tags,
            recommendations,
        };

        debug!(
            "扫描完成：url={}，CMS={:?}，检测到{}/{}个平台，耗时{:?}",
            report.url,
            report.detected_cms,
            report.found_count(),
            report.tags.len(),
            start.elapsed()
        );
        report
    }

    /// 扫描原始响应体（非UTF-8字节按替换字符处理）
    pub fn scan_bytes(&self, url: &str, body: &[u8]) -> ScanReport {
        let html: Cow<str> = String::from_utf8_lossy(body);
        self.scan(url, &html)
    }

    /// 扫描JSON信封：`{ "url": string, "html": string }`
    /// 字段缺失或类型不是字符串时返回 InvalidInput，不做部分检测
    pub fn scan_json(&self, envelope: &str) -> RstResult<ScanReport> {
        let value: Value = serde_json::from_str(envelope)?;
        let object = value
            .as_object()
            .ok_or_else(|| RstagscanError::InvalidInput("请求体必须是JSON对象".to_string()))?;

        let url = Self::string_field(object, "url")?;
        let html = Self::string_field(object, "html")?;
        Ok(self.scan(url, html))
    }

    fn string_field<'a>(object: &'a serde_json::Map<String, Value>, key: &str) -> RstResult<&'a str> {
        match object.get(key) {
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(_) => Err(RstagscanError::InvalidInput(format!("字段 {} 必须是字符串", key))),
            None => Err(RstagscanError::InvalidInput(format!("缺少字段 {}", key))),
        }
    }
}
