//! 全局错误类型定义

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum RstagscanError {
    // 规则相关错误
    #[error("规则加载失败：{0}")]
    RuleLoadError(String),
    #[error("规则解析失败：{0}")]
    RuleParseError(String),

    // 编译相关错误
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),
    #[error("编译初始化失败：{0}")]
    CompilerInitError(String),

    // 输入相关错误
    #[error("无效输入：{0}")]
    InvalidInput(String),
    #[error("URL解析失败：{0}")]
    InvalidUrl(#[from] UrlParseError),

    // 网络相关错误
    #[error("页面抓取失败：HTTP {status} {reason}")]
    FetchStatus { status: u16, reason: String },
    #[cfg(feature = "fetch")]
    #[error("网络请求失败：{0}")]
    Http(#[from] reqwest::Error),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
}

// 全局Result类型
pub type RstResult<T> = Result<T, RstagscanError>;
