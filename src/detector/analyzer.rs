//! 检测分析器：CMS 指纹识别与平台跟踪代码识别
//! 纯文本匹配，不解析 DOM、不执行 JS
use tracing::debug;

use crate::compiler::{CompiledRuleLibrary, CompiledTagRule};
use crate::rule::model::{CmsId, TagRecord, TagStatus};

/// CMS分析器
pub struct CmsAnalyzer;

impl CmsAnalyzer {
    /// 按顺序匹配CMS指纹，首个命中即返回
    pub fn analyze(compiled_lib: &CompiledRuleLibrary, html: &str) -> Option<CmsId> {
        let cms = compiled_lib
            .cms_rules
            .iter()
            .find(|rule| rule.matcher.is_match(html))
            .map(|rule| rule.cms);

        if let Some(cms) = cms {
            debug!("CMS匹配成功：{}", cms);
        }
        cms
    }
}

/// 平台分析器（单一通用检测函数，由规则表驱动）
pub struct TagAnalyzer;

impl TagAnalyzer {
    /// 逐个平台检测，输出顺序与规则顺序一致
    pub fn analyze(compiled_lib: &CompiledRuleLibrary, html: &str) -> Vec<TagRecord> {
        compiled_lib
            .tag_rules
            .iter()
            .map(|rule| Self::detect(rule, html))
            .collect()
    }

    /// 检测单个平台
    /// ID模式命中 → found 并记录ID；否则任一信号命中 → found 但无ID；
    /// 仅当ID命中且缺少伴随调用时 → warning
    pub fn detect(rule: &CompiledTagRule, html: &str) -> TagRecord {
        let config_id = rule
            .id_pattern
            .as_ref()
            .and_then(|pattern| pattern.extract(html))
            .map(str::to_string);

        let signal_hit = if config_id.is_none() {
            rule.signals.iter().find(|signal| signal.is_match(html))
        } else {
            None
        };

        let mut warnings = Vec::new();
        let status = if config_id.is_some() {
            match &rule.companion {
                Some(companion) if !companion.is_satisfied(html) => {
                    warnings.push(companion.warning.clone());
                    TagStatus::Warning
                }
                _ => TagStatus::Found,
            }
        } else if signal_hit.is_some() {
            TagStatus::Found
        } else {
            TagStatus::NotFound
        };

        if status != TagStatus::NotFound {
            debug!(
                "平台匹配成功：平台={}，状态={}，ID={:?}，信号={}",
                rule.tag_type,
                status,
                config_id,
                signal_hit.map_or("-", |signal| signal.describe())
            );
        }

        TagRecord {
            tag_type: rule.tag_type,
            display_name: rule.name.clone(),
            status,
            config_id,
            warnings,
            icon_ref: rule.icon.clone(),
        }
    }
}
