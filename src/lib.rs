//! rstagscan - 营销/统计跟踪代码检测与建议生成引擎

// 导出全局错误类型
pub use self::error::{RstagscanError, RstResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出规则模块核心接口
pub use self::rule::{
    TagType, TagStatus, CmsId, TagRecord, ScanReport, TagRule, CmsRule, RuleLibrary, RuleLoader
};

// 导出编译模块核心接口
pub use self::compiler::{CompiledRuleLibrary, RuleCompiler};

// 导出检测模块核心接口
pub use self::detector::{TagDetector, Recommender, global_detector, scan_html};

// 导出报告与服务接口
pub use self::report::{DisplayStatus, DisplayTag, placeholder_tags, normalize_for_render};
pub use self::service::{PageSource, ScanService, validate_url};
#[cfg(feature = "fetch")]
pub use self::fetcher::HttpPageFetcher;

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod compiler;
pub mod detector;
pub mod report;
pub mod service;
#[cfg(feature = "fetch")]
pub mod fetcher;
