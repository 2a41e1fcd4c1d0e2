//! 报告模块：展示占位、渲染前归一化、文本/JSON输出
pub mod display;
pub mod summary;

pub use self::display::{DisplayStatus, DisplayTag, placeholder_tags, normalize_for_render};
