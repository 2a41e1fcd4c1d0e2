//! 规则编译器核心
//! 仅负责将原始规则编译为可执行的匹配模式

use std::collections::HashSet;
use std::time::Instant;
use regex::Regex;
use tracing::debug;

use super::pattern::{
    CompiledCmsRule, CompiledCompanion, CompiledIdPattern, CompiledRuleLibrary, CompiledTagRule,
    Matcher,
};
use crate::rule::model::{CmsRule, IdPattern, RuleLibrary, SignalPattern, TagRule};
use crate::error::{RstResult, RstagscanError};

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则库
    pub fn compile(rule_lib: &RuleLibrary) -> RstResult<CompiledRuleLibrary> {
        let start = Instant::now();
        let mut stats = CompileStats::default();
        let mut seen = HashSet::new();

        // 1. 编译平台规则（保持顺序，拒绝重复平台）
        let mut tag_rules = Vec::with_capacity(rule_lib.tag_rules.len());
        for tag_rule in &rule_lib.tag_rules {
            if !seen.insert(tag_rule.tag_type) {
                return Err(RstagscanError::CompilerInitError(format!(
                    "平台重复定义：{}",
                    tag_rule.tag_type
                )));
            }
            tag_rules.push(Self::compile_tag_rule(tag_rule, &mut stats)?);
        }

        // 2. 编译CMS指纹
        let cms_rules = rule_lib
            .cms_rules
            .iter()
            .map(Self::compile_cms_rule)
            .collect::<RstResult<Vec<_>>>()?;

        // 3. 输出编译统计
        debug!("✅ 规则编译完成，总耗时{:?}", start.elapsed());
        debug!(
            "📊 编译统计：平台{}个、ID模式{}条、信号模式{}条、一致性规则{}条、CMS指纹{}条",
            tag_rules.len(),
            stats.id_count,
            stats.signal_count,
            stats.companion_count,
            cms_rules.len()
        );

        Ok(CompiledRuleLibrary { tag_rules, cms_rules })
    }

    /// 编译单个平台规则
    fn compile_tag_rule(tag_rule: &TagRule, stats: &mut CompileStats) -> RstResult<CompiledTagRule> {
        if tag_rule.id_pattern.is_none() && tag_rule.signals.is_empty() {
            return Err(RstagscanError::CompilerInitError(format!(
                "平台 {} 未定义任何检测模式",
                tag_rule.tag_type
            )));
        }

        let id_pattern = match &tag_rule.id_pattern {
            Some(pattern) => {
                stats.id_count += 1;
                Some(Self::compile_id_pattern(tag_rule, pattern)?)
            }
            None => None,
        };

        let signals = tag_rule
            .signals
            .iter()
            .map(Self::compile_signal)
            .collect::<RstResult<Vec<_>>>()?;
        stats.signal_count += signals.len();

        let companion = match &tag_rule.companion {
            Some(companion) => {
                if companion.any_of.is_empty() {
                    return Err(RstagscanError::CompilerInitError(format!(
                        "平台 {} 的一致性规则为空",
                        tag_rule.tag_type
                    )));
                }
                stats.companion_count += 1;
                Some(CompiledCompanion {
                    any_of: companion
                        .any_of
                        .iter()
                        .map(|literal| Matcher::Contains(literal.clone()))
                        .collect(),
                    warning: companion.warning.clone(),
                })
            }
            None => None,
        };

        Ok(CompiledTagRule {
            tag_type: tag_rule.tag_type,
            name: tag_rule.name.clone(),
            icon: tag_rule.icon.clone(),
            id_pattern,
            signals,
            companion,
        })
    }

    /// 编译ID模式（校验捕获分组存在）
    fn compile_id_pattern(tag_rule: &TagRule, pattern: &IdPattern) -> RstResult<CompiledIdPattern> {
        let regex = Regex::new(&pattern.regex)?;
        if pattern.group >= regex.captures_len() {
            return Err(RstagscanError::CompilerInitError(format!(
                "平台 {} 的ID模式不存在捕获分组 {}：{}",
                tag_rule.tag_type, pattern.group, pattern.regex
            )));
        }
        Ok(CompiledIdPattern {
            regex,
            group: pattern.group,
        })
    }

    fn compile_signal(signal: &SignalPattern) -> RstResult<Matcher> {
        match signal {
            SignalPattern::Contains(literal) => Ok(Matcher::Contains(literal.clone())),
            SignalPattern::Regex(raw) => Ok(Matcher::Regex(Regex::new(raw)?)),
        }
    }

    fn compile_cms_rule(cms_rule: &CmsRule) -> RstResult<CompiledCmsRule> {
        if cms_rule.fingerprint.is_empty() {
            return Err(RstagscanError::CompilerInitError(format!(
                "CMS {} 的指纹为空",
                cms_rule.cms
            )));
        }
        Ok(CompiledCmsRule {
            cms: cms_rule.cms,
            matcher: Matcher::Contains(cms_rule.fingerprint.clone()),
        })
    }
}

/// 编译统计
#[derive(Debug, Default)]
struct CompileStats {
    id_count: usize,
    signal_count: usize,
    companion_count: usize,
}
