use std::io;
use thiserror::Error;

/// 暴破过程中可能出现的错误
///
/// 单个子域名解析失败不会出现在这里，它们一律按“无地址”处理。
#[derive(Debug, Error)]
pub enum BruteError {
    /// 字典文件无法读取
    #[error("无法读取字典文件 {path}: {source}")]
    Wordlist {
        path: String,
        #[source]
        source: io::Error,
    },

    /// 自定义DNS服务器地址格式错误
    #[error("无效的DNS服务器地址: {0}")]
    InvalidNameserver(String),

    /// 结果文件写入失败
    #[error("结果导出失败: {0}")]
    Output(#[from] io::Error),

    #[error("结果序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BruteError>;
