//! 检测模块：跟踪代码检测核心逻辑
pub mod global;
pub mod analyzer;
pub mod recommender;
pub mod detector;

// 导出核心接口
pub use self::global::{global_detector, scan_html};
pub use self::analyzer::{CmsAnalyzer, TagAnalyzer};
pub use self::recommender::Recommender;
pub use self::detector::TagDetector;
