//! 全局配置管理,存储所有可配置项

/// 默认抓取UA
pub const DEFAULT_USER_AGENT: &str = "TagSentry-TagScanner/1.0";
/// 默认最大响应体（2MB）
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 超时配置（单位：秒）
    pub http_timeout: u64,
    // 抓取页面时使用的User-Agent
    pub user_agent: String,
    // 响应体上限（字节），超出部分截断
    pub max_body_bytes: usize,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            http_timeout: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn http_timeout(mut self, timeout: u64) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.config.max_body_bytes = limit;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}
