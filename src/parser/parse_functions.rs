//! 核心解析函数
//!
//! 扫描状态机在各个转移中调用的无状态小函数：截取时间戳、去除行事件前缀、
//! 由累积的正文构造 `Change`。

use chrono::NaiveDateTime;

use crate::error::ParseError;
use crate::parser_config::ParserConfig;
use crate::transaction::{Change, ChangeKind};

/// 从事件头行的固定窗口解析时间戳
///
/// mysqlbinlog 在每个事件头行写入 `#yymmdd HH:MM:SS`，小时位可能以空格补齐
/// （如 `#180129  9:28:04`），两位年份按 chrono 的世纪推断规则补全。
///
/// # 参数
///
/// * `line` - 携带时间戳的原始行
/// * `line_no` - 该行的行号，仅用于错误信息
/// * `config` - 提供时间戳窗口与格式
///
/// # 错误
///
/// 行长度不足以截取窗口，或窗口内容不符合格式时返回 `MalformedTimestamp`。
pub(crate) fn parse_timestamp(
    line: &str,
    line_no: usize,
    config: &ParserConfig,
) -> Result<NaiveDateTime, ParseError> {
    let window = line
        .get(config.timestamp_window.clone())
        .ok_or_else(|| ParseError::MalformedTimestamp {
            line: line_no,
            window: String::new(),
            reason: format!(
                "line too short for window {:?}",
                config.timestamp_window
            ),
            raw: line.to_string(),
        })?;

    NaiveDateTime::parse_from_str(window, &config.timestamp_format).map_err(|e| {
        ParseError::MalformedTimestamp {
            line: line_no,
            window: window.to_string(),
            reason: e.to_string(),
            raw: line.to_string(),
        }
    })
}

/// 去除行事件前缀（`### `），前缀之后没有内容时返回空串
#[inline]
pub(crate) fn strip_marker_prefix(line: &str, prefix_len: usize) -> &str {
    line.get(prefix_len..).unwrap_or("")
}

/// 由累积完成的正文构造 `Change`
///
/// 类型取正文的第一个以空白分隔的单词，正文原样保存。
pub(crate) fn create_change(body: String) -> Result<Change, ParseError> {
    let token = body.split_whitespace().next().unwrap_or("");
    let kind: ChangeKind = token.parse()?;
    Ok(Change {
        kind,
        actual_command: body,
    })
}
