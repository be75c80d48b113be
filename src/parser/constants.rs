//! 解析器使用的常量定义
//!
//! 定义了 binlog 文本输出中各类标记行的前缀、子串以及时间戳窗口。

use std::ops::Range;

// 事务边界标记

/// 事务起始行前缀
pub const BEGIN_MARKER: &str = "BEGIN";

/// 事务提交行前缀
pub const COMMIT_MARKER: &str = "COMMIT";

// 事件标记

/// Table_map 事件行中出现的子串（不要求位于行首）
pub const TABLE_MAP_MARKER: &str = "Table_map:";

/// 事件结束后的位置行前缀
pub const POSITION_FOOTER_MARKER: &str = "# at";

/// 行事件正文的行前缀
pub const ROW_EVENT_MARKER: &str = "###";

/// 行事件起始行的前缀集合
pub const ROW_EVENT_HEADERS: [&str; 3] = ["### UPDATE", "### INSERT", "### DELETE"];

// 长度相关常量

/// 行事件前缀 "### " 的长度
pub const MARKER_PREFIX_LENGTH: usize = 4;

/// 时间戳在事件头行中的字节范围（跳过行首的 '#'）
pub const TIMESTAMP_WINDOW: Range<usize> = 1..16;

/// 时间戳格式，形如 "180129 17:28:04"
pub const TIMESTAMP_FORMAT: &str = "%y%m%d %H:%M:%S";
