//! Parser 配置模块
//!
//! 把 dump 布局中可能随 mysqlbinlog 版本变化的部分（时间戳位置、格式、
//! 行事件前缀宽度）以及对可疑结构的处理策略集中到一处，
//! 核心扫描逻辑只读取配置而不硬编码这些值。

use std::ops::Range;

use crate::error::ParseError;
use crate::parser::constants::{MARKER_PREFIX_LENGTH, TIMESTAMP_FORMAT, TIMESTAMP_WINDOW};

/// Parser 配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// 事件头行中时间戳所在的字节范围
    pub timestamp_window: Range<usize>,

    /// 时间戳的 chrono 格式串
    pub timestamp_format: String,

    /// 行事件前缀（`### `）的宽度，正文从此偏移开始
    pub marker_prefix_len: usize,

    /// 是否允许没有任何行变更的语句（连续两个 `Table_map:`）
    pub allow_empty_statements: bool,
}

impl ParserConfig {
    /// mysqlbinlog `-v` / `--base64-output=DECODE-ROWS` 输出的默认布局
    pub fn mysqlbinlog_default() -> Self {
        Self {
            timestamp_window: TIMESTAMP_WINDOW,
            timestamp_format: TIMESTAMP_FORMAT.to_string(),
            marker_prefix_len: MARKER_PREFIX_LENGTH,
            allow_empty_statements: true,
        }
    }

    /// 拒绝空语句的严格配置
    pub fn strict() -> Self {
        Self {
            allow_empty_statements: false,
            ..Self::mysqlbinlog_default()
        }
    }

    /// 校验配置是否可用
    ///
    /// # 错误
    ///
    /// - 时间戳窗口为空或起止颠倒
    /// - 时间戳格式为空
    /// - 前缀宽度为 0
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.timestamp_window.start >= self.timestamp_window.end {
            return Err(ParseError::InvalidConfig(format!(
                "empty timestamp window {:?}",
                self.timestamp_window
            )));
        }
        if self.timestamp_format.is_empty() {
            return Err(ParseError::InvalidConfig(
                "timestamp format must not be empty".to_string(),
            ));
        }
        if self.marker_prefix_len == 0 {
            return Err(ParseError::InvalidConfig(
                "marker prefix length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::mysqlbinlog_default()
    }
}
