//! 展示层状态：扫描进行中的占位记录，以及交给报告渲染前的状态归一化

use serde::{Deserialize, Serialize};

use crate::detector::TagDetector;
use crate::rule::model::{TagRecord, TagStatus, TagType};

/// 展示状态（含仅用于占位的 loading）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Loading,
    Found,
    NotFound,
    Warning,
}

impl From<TagStatus> for DisplayStatus {
    fn from(status: TagStatus) -> Self {
        match status {
            TagStatus::Found => DisplayStatus::Found,
            TagStatus::NotFound => DisplayStatus::NotFound,
            TagStatus::Warning => DisplayStatus::Warning,
        }
    }
}

impl DisplayStatus {
    /// loading 归一化为 not_found
    pub fn settle(self) -> TagStatus {
        match self {
            DisplayStatus::Loading | DisplayStatus::NotFound => TagStatus::NotFound,
            DisplayStatus::Found => TagStatus::Found,
            DisplayStatus::Warning => TagStatus::Warning,
        }
    }
}

/// 展示用平台记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTag {
    #[serde(rename = "type")]
    pub tag_type: TagType,
    pub name: String,
    pub status: DisplayStatus,
    pub id: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub icon: String,
}

impl From<&TagRecord> for DisplayTag {
    fn from(record: &TagRecord) -> Self {
        Self {
            tag_type: record.tag_type,
            name: record.display_name.clone(),
            status: record.status.into(),
            id: record.config_id.clone(),
            warnings: record.warnings.clone(),
            icon: record.icon_ref.clone(),
        }
    }
}

/// 每个平台一条 loading 占位记录，顺序与检测器规则一致
pub fn placeholder_tags(detector: &TagDetector) -> Vec<DisplayTag> {
    detector
        .compiled_lib()
        .tag_rules
        .iter()
        .map(|rule| DisplayTag {
            tag_type: rule.tag_type,
            name: rule.name.clone(),
            status: DisplayStatus::Loading,
            id: None,
            warnings: Vec::new(),
            icon: rule.icon.clone(),
        })
        .collect()
}

/// 转换为渲染器接受的记录
pub fn normalize_for_render(tags: &[DisplayTag]) -> Vec<TagRecord> {
    tags.iter()
        .map(|tag| {
            let status = tag.status.settle();
            TagRecord {
                tag_type: tag.tag_type,
                display_name: tag.name.clone(),
                status,
                // not_found 不携带ID
                config_id: if status == TagStatus::NotFound { None } else { tag.id.clone() },
                warnings: tag.warnings.clone(),
                icon_ref: tag.icon.clone(),
            }
        })
        .collect()
}
