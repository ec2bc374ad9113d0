//! # 词典情感分析
//!
//! 基于固定正/负面词典的子串计数，不做词边界匹配（"badly" 计入 "bad"）。
//!
//! ## 依赖关系
//! - 被 `analyzer/mod.rs` 调用

use crate::models::Sentiment;

/// 正面词典
pub const POSITIVE_WORDS: [&str; 14] = [
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "fantastic",
    "happy",
    "love",
    "best",
    "beautiful",
    "perfect",
    "awesome",
    "brilliant",
    "outstanding",
];

/// 负面词典
pub const NEGATIVE_WORDS: [&str; 14] = [
    "bad",
    "terrible",
    "awful",
    "horrible",
    "worst",
    "hate",
    "sad",
    "poor",
    "disappointing",
    "useless",
    "wrong",
    "fail",
    "error",
    "problem",
];

/// 一方计数需超过另一方的倍数
const DOMINANCE_RATIO: f64 = 1.2;

/// 从左到右、不重叠地统计子串出现次数
pub fn count_occurrences(text: &str, word: &str) -> usize {
    text.matches(word).count()
}

/// 统计词典命中数，返回 (正面, 负面)；输入须已小写
pub fn lexicon_counts(lowered: &str) -> (usize, usize) {
    let positive = POSITIVE_WORDS
        .iter()
        .map(|w| count_occurrences(lowered, w))
        .sum();
    let negative = NEGATIVE_WORDS
        .iter()
        .map(|w| count_occurrences(lowered, w))
        .sum();
    (positive, negative)
}

/// 根据计数给出情感标签
pub fn classify_counts(positive: usize, negative: usize) -> Sentiment {
    let (pos, neg) = (positive as f64, negative as f64);
    if pos > neg * DOMINANCE_RATIO {
        Sentiment::Positive
    } else if neg > pos * DOMINANCE_RATIO {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// 对已小写的文本做情感分类
pub fn classify(lowered: &str) -> Sentiment {
    let (positive, negative) = lexicon_counts(lowered);
    classify_counts(positive, negative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_occurrences_non_overlapping() {
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("badbadly", "bad"), 2);
        assert_eq!(count_occurrences("nothing", "bad"), 0);
    }

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify("this is good, great, wonderful"), Sentiment::Positive);
        assert_eq!(classify("good bad"), Sentiment::Neutral);
        assert_eq!(classify("terrible awful problem, but good"), Sentiment::Negative);
        assert_eq!(classify(""), Sentiment::Neutral);
    }

    #[test]
    fn test_classify_counts_threshold() {
        // 6 > 5 * 1.2 不成立
        assert_eq!(classify_counts(6, 5), Sentiment::Neutral);
        assert_eq!(classify_counts(7, 5), Sentiment::Positive);
        assert_eq!(classify_counts(1, 0), Sentiment::Positive);
        assert_eq!(classify_counts(0, 1), Sentiment::Negative);
    }

    #[test]
    fn test_substring_matching() {
        // "badly" -> bad, "errors" -> error
        assert_eq!(lexicon_counts("badly made, errors everywhere"), (0, 2));
    }
}
