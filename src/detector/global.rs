//! 全局检测器单例管理
//! 仅缓存内置规则编译结果（只读），不保存任何扫描状态
use once_cell::sync::OnceCell;
use tracing::info;

use super::detector::TagDetector;
use crate::error::RstResult;
use crate::rule::model::ScanReport;

/// 全局检测器实例
static GLOBAL_DETECTOR: OnceCell<TagDetector> = OnceCell::new();

/// 获取全局检测器（首次调用时编译内置规则）
pub fn global_detector() -> RstResult<&'static TagDetector> {
    GLOBAL_DETECTOR.get_or_try_init(|| {
        let detector = TagDetector::new()?;
        info!("全局检测器初始化完成，平台数：{}", detector.compiled_lib().tag_rules.len());
        Ok(detector)
    })
}

/// 使用内置规则扫描HTML
pub fn scan_html(url: &str, html: &str) -> RstResult<ScanReport> {
    Ok(global_detector()?.scan(url, html))
}
