//! 报告输出：文本摘要（CLI）与 JSON 序列化
use std::fmt;

use crate::error::RstResult;
use crate::rule::model::ScanReport;

impl ScanReport {
    pub fn to_json(&self) -> RstResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_pretty_json(&self) -> RstResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ======== 为 ScanReport 实现 Display trait（用于 CLI 输出） ========
impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "URL: {}", self.url)?;
        writeln!(f, "扫描时间: {}", self.scan_timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))?;
        match &self.detected_cms {
            Some(cms) => writeln!(f, "CMS: {}", cms)?,
            None => writeln!(f, "CMS: -")?,
        }
        writeln!(f, "跟踪代码 ({}/{}):", self.found_count(), self.tags.len())?;
        for tag in &self.tags {
            writeln!(f, "  {}", tag)?;
            for warning in &tag.warnings {
                writeln!(f, "    ! {}", warning)?;
            }
        }
        if !self.recommendations.is_empty() {
            writeln!(f, "建议:")?;
            for recommendation in &self.recommendations {
                writeln!(f, "  - {}", recommendation)?;
            }
        }
        Ok(())
    }
}
