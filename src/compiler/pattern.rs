//! 编译后模式模型
//! 正则编译后的结构

use regex::Regex;

use crate::rule::model::{CmsId, TagType};

#[derive(Debug, Clone)]
pub enum Matcher {
    Contains(String), // 包含匹配（区分大小写）
    Regex(Regex), // 正则匹配
}

impl Matcher {
    /// 简单匹配判断
    pub fn is_match(&self, input: &str) -> bool {
        match self {
            Matcher::Contains(s) => input.contains(s.as_str()),
            Matcher::Regex(regex) => regex.is_match(input),
        }
    }

    /// 规则描述（用于调试日志）
    pub fn describe(&self) -> &str {
        match self {
            Matcher::Contains(s) => s,
            Matcher::Regex(r) => r.as_str(),
        }
    }
}

/// 编译后的ID捕获模式
#[derive(Debug, Clone)]
pub struct CompiledIdPattern {
    pub regex: Regex,
    pub group: usize,
}

impl CompiledIdPattern {
    /// 提取ID，未命中返回 None
    pub fn extract<'a>(&self, input: &'a str) -> Option<&'a str> {
        self.regex
            .captures(input)
            .and_then(|cap| cap.get(self.group))
            .map(|m| m.as_str())
    }
}

/// 编译后的配置一致性规则
#[derive(Debug, Clone)]
pub struct CompiledCompanion {
    pub any_of: Vec<Matcher>,
    pub warning: String,
}

impl CompiledCompanion {
    pub fn is_satisfied(&self, input: &str) -> bool {
        self.any_of.iter().any(|m| m.is_match(input))
    }
}

/// 平台编译后的规则
#[derive(Debug, Clone)]
pub struct CompiledTagRule {
    pub tag_type: TagType,
    pub name: String,
    pub icon: String,
    pub id_pattern: Option<CompiledIdPattern>,
    pub signals: Vec<Matcher>,
    pub companion: Option<CompiledCompanion>,
}

/// CMS编译后的指纹
#[derive(Debug, Clone)]
pub struct CompiledCmsRule {
    pub cms: CmsId,
    pub matcher: Matcher,
}

/// 编译后的规则库（保持规则顺序）
#[derive(Debug, Clone)]
pub struct CompiledRuleLibrary {
    pub tag_rules: Vec<CompiledTagRule>,
    pub cms_rules: Vec<CompiledCmsRule>,
}
