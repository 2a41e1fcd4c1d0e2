//! 数据模型定义
//! 规则数据（TagRule/CmsRule/RuleLibrary）与检测结果（TagRecord/ScanReport），支持序列化/反序列化

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 受支持的跟踪平台（封闭枚举，顺序即报告顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagType {
    Gtm,
    Ga4,
    Meta,
    Ads,
    Microsoft,
    Linkedin,
    Twitter,
    Tiktok,
}

impl TagType {
    pub const ALL: [TagType; 8] = [
        TagType::Gtm,
        TagType::Ga4,
        TagType::Meta,
        TagType::Ads,
        TagType::Microsoft,
        TagType::Linkedin,
        TagType::Twitter,
        TagType::Tiktok,
    ];

    /// 稳定标识符（与JSON中的 `type` 字段一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            TagType::Gtm => "gtm",
            TagType::Ga4 => "ga4",
            TagType::Meta => "meta",
            TagType::Ads => "ads",
            TagType::Microsoft => "microsoft",
            TagType::Linkedin => "linkedin",
            TagType::Twitter => "twitter",
            TagType::Tiktok => "tiktok",
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个平台的检测状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagStatus {
    Found,
    NotFound,
    Warning,
}

impl TagStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagStatus::Found => "found",
            TagStatus::NotFound => "not_found",
            TagStatus::Warning => "warning",
        }
    }
}

impl fmt::Display for TagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 内容管理系统
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmsId {
    WordPress,
    Shopify,
    Drupal,
}

impl CmsId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CmsId::WordPress => "WordPress",
            CmsId::Shopify => "Shopify",
            CmsId::Drupal => "Drupal",
        }
    }
}

impl fmt::Display for CmsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个平台的检测记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    #[serde(rename = "type")]
    pub tag_type: TagType,
    #[serde(rename = "name")]
    pub display_name: String,
    pub status: TagStatus,
    #[serde(rename = "id")]
    pub config_id: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(rename = "icon")]
    pub icon_ref: String,
}

impl TagRecord {
    /// 是否检测到（warning 也算检测到）
    pub fn is_present(&self) -> bool {
        self.status != TagStatus::NotFound
    }
}

// ======== 为 TagRecord 实现 Display trait（用于 CLI / Report 输出） ========
impl fmt::Display for TagRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.config_id {
            Some(id) => write!(f, "{} [{}] {}", self.display_name, self.status, id),
            None => write!(f, "{} [{}]", self.display_name, self.status),
        }
    }
}

/// 扫描报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub url: String,
    #[serde(rename = "scanDate", with = "iso8601_millis")]
    pub scan_timestamp: DateTime<Utc>,
    #[serde(rename = "cms")]
    pub detected_cms: Option<CmsId>,
    pub tags: Vec<TagRecord>,
    pub recommendations: Vec<String>,
}

impl ScanReport {
    /// 查找指定平台的记录
    pub fn tag(&self, tag_type: TagType) -> Option<&TagRecord> {
        self.tags.iter().find(|tag| tag.tag_type == tag_type)
    }

    /// 检测到的平台数量
    pub fn found_count(&self) -> usize {
        self.tags.iter().filter(|tag| tag.is_present()).count()
    }
}

/// `scanDate` 按毫秒精度的 RFC3339 UTC 格式序列化（如 2024-01-01T00:00:00.000Z）
mod iso8601_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

// ================= 规则定义（从 JSON 解析） =================

/// ID 捕获模式
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdPattern {
    pub regex: String,
    /// 取值的捕获分组，0 表示整体匹配
    #[serde(default)]
    pub group: usize,
}

/// 存在性信号（仅判断是否出现，不提取ID）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SignalPattern {
    /// 子串包含（区分大小写）
    Contains(String),
    /// 正则匹配
    Regex(String),
}

/// 配置一致性规则：ID 命中但缺少任一伴随调用时产生告警
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompanionRule {
    pub any_of: Vec<String>,
    pub warning: String,
}

/// 跟踪平台规则
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TagRule {
    #[serde(rename = "type")]
    pub tag_type: TagType,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub id_pattern: Option<IdPattern>,
    #[serde(default)]
    pub signals: Vec<SignalPattern>,
    #[serde(default)]
    pub companion: Option<CompanionRule>,
}

/// CMS 指纹规则
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CmsRule {
    pub cms: CmsId,
    pub fingerprint: String,
}

/// 完整规则库（顺序敏感）
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleLibrary {
    #[serde(default)]
    pub cms_rules: Vec<CmsRule>,
    pub tag_rules: Vec<TagRule>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_report() -> ScanReport {
        ScanReport {
            url: "https://example.com/".to_string(),
            scan_timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            detected_cms: Some(CmsId::WordPress),
            tags: vec![TagRecord {
                tag_type: TagType::Gtm,
                display_name: "Google Tag Manager".to_string(),
                status: TagStatus::NotFound,
                config_id: None,
                warnings: vec![],
                icon_ref: "/google-tag-manager.svg".to_string(),
            }],
            recommendations: vec![],
        }
    }

    #[test]
    fn test_report_json_shape() {
        let value = serde_json::to_value(sample_report()).unwrap();

        assert_eq!(value["url"], "https://example.com/");
        assert_eq!(value["scanDate"], "2024-01-02T03:04:05.000Z");
        assert_eq!(value["cms"], "WordPress");
        let tag = &value["tags"][0];
        assert_eq!(tag["type"], "gtm");
        assert_eq!(tag["name"], "Google Tag Manager");
        assert_eq!(tag["status"], "not_found");
        assert!(tag["id"].is_null());
        assert_eq!(tag["warnings"], serde_json::json!([]));
        assert_eq!(tag["icon"], "/google-tag-manager.svg");
    }

    #[test]
    fn test_report_deserializes_from_wire_shape() {
        let json = serde_json::to_string(&sample_report()).unwrap();
        let parsed: ScanReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_report());
    }

    #[test]
    fn test_null_cms_serializes_as_null() {
        let mut report = sample_report();
        report.detected_cms = None;
        let value = serde_json::to_value(report).unwrap();
        assert!(value["cms"].is_null());
    }

    #[test]
    fn test_signal_pattern_tagged_form() {
        let signal: SignalPattern =
            serde_json::from_str(r#"{"kind":"contains","value":"snap.licdn.com"}"#).unwrap();
        assert_eq!(signal, SignalPattern::Contains("snap.licdn.com".to_string()));
    }

    #[test]
    fn test_tag_record_display() {
        let mut record = sample_report().tags.remove(0);
        assert_eq!(record.to_string(), "Google Tag Manager [not_found]");
        record.status = TagStatus::Found;
        record.config_id = Some("GTM-AB12CD".to_string());
        assert_eq!(record.to_string(), "Google Tag Manager [found] GTM-AB12CD");
    }
}
