//! # 文本统计
//!
//! 行规范化、分词、计数与高频词排序。
//!
//! ## 依赖关系
//! - 被 `analyzer/mod.rs` 调用
//! - 使用 `regex` 清洗非单词字符

use crate::models::WordFrequency;

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// 高频词列表的最大长度
pub const TOP_WORDS: usize = 10;

/// 非 ASCII 字母、数字、空白的字符（作用于已小写的文本）
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").unwrap());

/// 按物理行重建内容：每行后面恰好跟一个 `\n`
///
/// 行分隔符可以是 `\n`、`\r\n` 或单独的 `\r`。最后一行即使没有换行符也会补上。
pub fn normalize_lines(raw: &str) -> String {
    let mut content = String::with_capacity(raw.len() + 1);
    let mut rest = raw;

    while !rest.is_empty() {
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(pos) => {
                content.push_str(&rest[..pos]);
                content.push('\n');
                let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + skip..];
            }
            None => {
                content.push_str(rest);
                content.push('\n');
                rest = "";
            }
        }
    }

    content
}

/// 分词：输入须已小写
pub fn tokenize(lowered: &str) -> Vec<String> {
    NON_WORD
        .replace_all(lowered, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// 不同词的数量
pub fn count_unique(words: &[String]) -> usize {
    words.iter().map(String::as_str).collect::<HashSet<_>>().len()
}

/// 字符数（Unicode 标量值，含换行符）
pub fn count_characters(content: &str) -> usize {
    content.chars().count()
}

/// 行数：按 `\n` 切分并丢弃末尾的所有空段
///
/// 不含 `\n` 的内容（包括空文件）计为 1 行。
pub fn count_lines(content: &str) -> usize {
    if !content.contains('\n') {
        return 1;
    }
    let trimmed = content.trim_end_matches('\n');
    if trimmed.is_empty() {
        0
    } else {
        trimmed.split('\n').count()
    }
}

/// 按频率降序取前 `limit` 个词
///
/// 频率相同时按词在文本中首次出现的顺序排列。
pub fn rank_top_words(words: &[String], limit: usize) -> Vec<WordFrequency> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for word in words {
        match slots.get(word.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(word.as_str(), counts.len());
                counts.push((word.as_str(), 1));
            }
        }
    }

    // 稳定排序保留首次出现顺序
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(limit)
        .map(|(word, frequency)| WordFrequency::new(word, frequency))
        .collect()
}
