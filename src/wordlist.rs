use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{BruteError, Result};

/// 子域名字典
///
/// 进程启动时加载一次，之后只读，所有域名和所有worker共享同一份数据。
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Arc<[String]>,
}

impl WordList {
    /// 从文件加载字典，按空白字符切分，保留原始顺序
    ///
    /// 非UTF-8字节按替换字符处理，只有文件读取失败才返回错误。
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| BruteError::Wordlist {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    pub fn parse(content: &str) -> Self {
        content.split_whitespace().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl FromIterator<String> for WordList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        WordList {
            words: iter.into_iter().collect(),
        }
    }
}
