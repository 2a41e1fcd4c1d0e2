//! 规则加载管理器
//! 负责加载内置规则库，或从本地文件 / JSON 字符串加载自定义规则库

use std::path::Path;
use tracing::debug;

use super::model::RuleLibrary;
use crate::error::{RstResult, RstagscanError};

/// 内置规则库（编译期嵌入）
const BUILTIN_RULES_JSON: &str = include_str!("../../data/tag_rules.json");

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 加载内置规则库
    pub fn builtin() -> RstResult<RuleLibrary> {
        Self::from_json_str(BUILTIN_RULES_JSON)
    }

    /// 从 JSON 字符串加载规则库
    pub fn from_json_str(json: &str) -> RstResult<RuleLibrary> {
        let rule_lib: RuleLibrary = serde_json::from_str(json)
            .map_err(|e| RstagscanError::RuleParseError(e.to_string()))?;

        debug!(
            "规则库解析成功，平台规则数：{}，CMS规则数：{}",
            rule_lib.tag_rules.len(),
            rule_lib.cms_rules.len()
        );
        Ok(rule_lib)
    }

    /// 从本地 JSON 文件加载规则库
    pub fn from_file(path: impl AsRef<Path>) -> RstResult<RuleLibrary> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            RstagscanError::RuleLoadError(format!("读取规则文件 {} 失败：{}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }
}
