use std::sync::atomic::{AtomicUsize, Ordering};

use crate::wordlist::WordList;

/// 待解析的候选子域名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub label: String,
    pub host: String,
}

/// 单个域名的候选子域名队列
///
/// 多个worker可以同时从同一个队列取数据，每个字典项只会被交付一次，
/// 交付顺序与字典顺序一致。每扫描一个域名就新建一个队列。
#[derive(Debug)]
pub struct CandidateSource {
    words: WordList,
    domain: String,
    cursor: AtomicUsize,
}

impl CandidateSource {
    pub fn new(words: WordList, domain: &str) -> Self {
        CandidateSource {
            words,
            domain: domain.to_string(),
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// 取出下一个候选子域名，队列耗尽后返回None
    pub fn next_candidate(&self) -> Option<Candidate> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        let label = self.words.get(index)?;
        Some(Candidate {
            label: label.to_string(),
            host: format!("{}.{}", label, self.domain),
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
