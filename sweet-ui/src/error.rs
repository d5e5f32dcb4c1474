//! # Error 模块
//!
//! 定义 sweet-ui 中使用的错误类型。
//!
//! 树操作与动画调度本身不会失败（不匹配、越界、缺失兄弟节点都按空操作处理），
//! 只有配置文件的读写与校验会返回错误。

use thiserror::Error;

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),

    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(String),

    /// 字段取值无效
    #[error("配置验证失败：'{field}' {message}")]
    Invalid { field: &'static str, message: String },
}

/// sweet-ui 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type UiResult<T> = Result<T, UiError>;
