//! 建议生成：根据平台检测记录输出改进建议
use crate::rule::model::{TagRecord, TagStatus};

pub struct Recommender;

impl Recommender {
    /// 两轮遍历，均保持输入顺序：
    /// 1. 未检测到的平台 → 建议接入
    /// 2. 存在告警的平台 → 建议修复配置
    pub fn synthesize(tags: &[TagRecord]) -> Vec<String> {
        let missing = tags
            .iter()
            .filter(|tag| tag.status == TagStatus::NotFound)
            .map(|tag| {
                format!(
                    "Consider implementing {} for better tracking capabilities",
                    tag.display_name
                )
            });

        let fixes = tags
            .iter()
            .filter(|tag| !tag.warnings.is_empty())
            .map(|tag| {
                format!(
                    "Fix {} configuration: {}",
                    tag.display_name,
                    tag.warnings.join(", ")
                )
            });

        missing.chain(fixes).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::model::TagType;

    fn tag(tag_type: TagType, name: &str, status: TagStatus, warnings: &[&str]) -> TagRecord {
        TagRecord {
            tag_type,
            display_name: name.to_string(),
            status,
            config_id: None,
            warnings: warnings.iter().map(|w| w.to_string()).collect(),
            icon_ref: String::new(),
        }
    }

    #[test]
    fn test_missing_before_fixes_in_input_order() {
        let tags = vec![
            tag(TagType::Gtm, "Google Tag Manager", TagStatus::NotFound, &[]),
            tag(TagType::Ga4, "Google Analytics 4", TagStatus::Warning, &["Incomplete configuration"]),
            tag(TagType::Meta, "Meta Pixel", TagStatus::Found, &[]),
            tag(TagType::Ads, "Google Ads", TagStatus::NotFound, &[]),
        ];

        assert_eq!(
            Recommender::synthesize(&tags),
            vec![
                "Consider implementing Google Tag Manager for better tracking capabilities",
                "Consider implementing Google Ads for better tracking capabilities",
                "Fix Google Analytics 4 configuration: Incomplete configuration",
            ]
        );
    }

    #[test]
    fn test_multiple_warnings_joined() {
        let tags = vec![tag(TagType::Ga4, "Google Analytics 4", TagStatus::Warning, &["a", "b"])];
        assert_eq!(
            Recommender::synthesize(&tags),
            vec!["Fix Google Analytics 4 configuration: a, b"]
        );
    }

    #[test]
    fn test_found_without_warnings_yields_nothing() {
        let tags = vec![
            tag(TagType::Gtm, "Google Tag Manager", TagStatus::Found, &[]),
            tag(TagType::Microsoft, "Microsoft Advertising", TagStatus::Found, &[]),
        ];
        assert!(Recommender::synthesize(&tags).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(Recommender::synthesize(&[]).is_empty());
    }
}
