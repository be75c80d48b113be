//! 错误类型定义
//!
//! 定义了解析 binlog 文本输出过程中可能出现的所有错误类型。
//! 所有错误都是致命的：解析器不会尝试跳过或修补不符合格式的输入。

use thiserror::Error;

/// 解析错误类型
///
/// 涉及具体输入行的变体都带有 1 起始的行号 `line` 以及原始行内容 `raw`，
/// 便于定位出问题的 dump 位置。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// 固定窗口内的时间戳无法按 `yymmdd HH:MM:SS` 解析
    #[error("malformed timestamp at line {line}: '{window}' ({reason})")]
    MalformedTimestamp {
        /// 携带时间戳的行号
        line: usize,
        /// 截取出的时间戳窗口（行过短时为空）
        window: String,
        /// chrono 给出的失败原因
        reason: String,
        /// 原始行内容
        raw: String,
    },

    /// 在没有打开的事务时遇到了需要事务上下文的标记
    #[error("'{marker}' at line {line} without an open transaction")]
    NoOpenTransaction {
        /// 触发错误的标记，如 `Table_map:` 或 `COMMIT`
        marker: &'static str,
        /// 行号
        line: usize,
        /// 原始行内容
        raw: String,
    },

    /// 上一个事务尚未 `COMMIT` 就再次遇到 `BEGIN`
    #[error("BEGIN at line {line} while transaction opened at line {opened_at} is still open")]
    NestedTransaction {
        /// 新 `BEGIN` 所在行号
        line: usize,
        /// 仍未提交的事务的 `BEGIN` 行号
        opened_at: usize,
    },

    /// 行事件出现在当前事务的第一个 `Table_map:` 之前
    #[error("row event at line {line} before any Table_map in the current transaction")]
    NoOpenStatement {
        /// 行号
        line: usize,
        /// 原始行内容
        raw: String,
    },

    /// `###` 继续行之前没有正在累积的行事件
    #[error("continuation line {line} has no row event to attach to")]
    OrphanContinuation {
        /// 行号
        line: usize,
        /// 原始行内容
        raw: String,
    },

    /// 事务在 `COMMIT` 时仍没有起始时间戳（从未出现 `Table_map:`）
    #[error("transaction committed at line {line} never saw a Table_map line")]
    MissingStartTimestamp {
        /// `COMMIT` 所在行号
        line: usize,
    },

    /// 配置禁止空语句时，语句在被替换或事务结束时仍没有任何变更
    #[error("statement closed at line {line} has no row changes")]
    EmptyStatement {
        /// 关闭该语句的行号
        line: usize,
    },

    /// 行事件正文的首个单词不是 INSERT / UPDATE / DELETE
    #[error("unknown change kind '{token}'")]
    UnknownChangeKind {
        /// 实际读到的首个单词
        token: String,
    },

    /// 解析器配置无效
    #[error("invalid parser config: {0}")]
    InvalidConfig(String),

    /// 文件未找到或无法访问
    #[error("file not found or inaccessible: {path}")]
    FileNotFound {
        /// 文件路径及底层错误描述
        path: String,
    },

    /// 读取输入时的 I/O 错误
    #[error("I/O error: {0}")]
    IoError(String),
}

impl ParseError {
    /// 返回错误关联的输入行号（如果有）
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MalformedTimestamp { line, .. }
            | ParseError::NoOpenTransaction { line, .. }
            | ParseError::NestedTransaction { line, .. }
            | ParseError::NoOpenStatement { line, .. }
            | ParseError::OrphanContinuation { line, .. }
            | ParseError::MissingStartTimestamp { line }
            | ParseError::EmptyStatement { line } => Some(*line),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::IoError(err.to_string())
    }
}
