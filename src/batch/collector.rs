//! # 文件收集器
//!
//! 根据命令行输入路径和模式收集待分析的文件列表。
//!
//! ## 功能
//! - 显式给出的文件原样保留（包括不存在的路径，由引擎报告失败）
//! - 目录按 glob 模式筛选（逗号分隔的多模式）
//! - 可选递归搜索
//! - 目录展开结果排序，保证批次顺序稳定
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 调用
//! - 使用 `walkdir` 遍历目录, `glob` 匹配文件名

use crate::error::{Result, TextBatchError};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 默认匹配模式
pub const DEFAULT_PATTERN: &str = "*.txt";

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    inputs: Vec<PathBuf>,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            patterns: vec![Pattern::new(DEFAULT_PATTERN).unwrap()],
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| TextBatchError::InvalidPattern {
                    pattern: s.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if !patterns.is_empty() {
            self.patterns = patterns;
        }
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有文件，保持输入顺序
    pub fn collect(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for input in &self.inputs {
            if input.is_dir() {
                files.extend(self.collect_dir(input));
            } else {
                files.push(input.clone());
            }
        }
        files
    }

    fn collect_dir(&self, dir: &Path) -> Vec<PathBuf> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches_patterns(e.path()))
            .map(|e| e.into_path())
            .collect();
        files.sort();
        files
    }

    /// 检查文件名是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => self.patterns.iter().any(|p| p.matches(name)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_collect_directory_with_default_pattern() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("b.txt"));
        touch(&dir.path().join("a.txt"));
        touch(&dir.path().join("notes.md"));
        touch(&dir.path().join("sub/c.txt"));

        let files = FileCollector::new(vec![dir.path().to_path_buf()]).collect();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }

    #[test]
    fn test_collect_recursive_multi_pattern() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a.txt"));
        touch(&dir.path().join("notes.md"));
        touch(&dir.path().join("sub/c.txt"));

        let files = FileCollector::new(vec![dir.path().to_path_buf()])
            .with_pattern("*.txt, *.md")
            .unwrap()
            .recursive(true)
            .collect();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_explicit_paths_are_kept() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.log");
        let files = FileCollector::new(vec![missing.clone()]).collect();
        assert_eq!(files, vec![missing]);
    }

    #[test]
    fn test_invalid_pattern() {
        let result = FileCollector::new(vec![]).with_pattern("[");
        assert!(matches!(result, Err(TextBatchError::InvalidPattern { .. })));
    }
}
