use memchr::memmem::Finder;
use once_cell::sync::Lazy;

use crate::parser::constants::{
    BEGIN_MARKER, COMMIT_MARKER, POSITION_FOOTER_MARKER, ROW_EVENT_HEADERS, ROW_EVENT_MARKER,
    TABLE_MAP_MARKER,
};

// 预先构建子串查找器，避免每行重新构建
static TABLE_MAP_FINDER: Lazy<Finder<'static>> =
    Lazy::new(|| Finder::new(TABLE_MAP_MARKER.as_bytes()));

/// 一行文本在 binlog dump 语法中的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `BEGIN`
    Begin,
    /// 含有 `Table_map:` 的事件头行
    TableMap,
    /// `### UPDATE` / `### INSERT` / `### DELETE`
    RowEventHeader,
    /// 其余以 `###` 开头的行
    RowEventContinuation,
    /// `# at <pos>`
    PositionFooter,
    /// `COMMIT`
    Commit,
    /// 对结构没有影响的行
    Other,
}

/// 行以 `BEGIN` 开头
#[inline]
pub fn is_begin_line(line: &str) -> bool {
    line.starts_with(BEGIN_MARKER)
}

/// 行内任意位置包含 `Table_map:`
///
/// mysqlbinlog 在这一行的行首写入 `#yymmdd HH:MM:SS` 形式的事件时间戳。
#[inline]
pub fn is_table_map_line(line: &str) -> bool {
    TABLE_MAP_FINDER.find(line.as_bytes()).is_some()
}

/// 行以 `### UPDATE`、`### INSERT` 或 `### DELETE` 开头，即一个新行事件的起始行
#[inline]
pub fn is_row_event_header(line: &str) -> bool {
    ROW_EVENT_HEADERS
        .iter()
        .any(|header| line.starts_with(header))
}

/// 行以 `###` 开头但不是行事件起始行，例如 `###   @1=1 /* INT ... */`
#[inline]
pub fn is_row_event_continuation(line: &str) -> bool {
    line.starts_with(ROW_EVENT_MARKER) && !is_row_event_header(line)
}

/// 行以 `# at` 开头，即事件结束后的位置行
#[inline]
pub fn is_position_footer(line: &str) -> bool {
    line.starts_with(POSITION_FOOTER_MARKER)
}

/// 行以 `COMMIT` 开头
#[inline]
pub fn is_commit_line(line: &str) -> bool {
    line.starts_with(COMMIT_MARKER)
}

///
/// 判断一行在 dump 语法中的角色。
///
/// 按以下优先级依次匹配，命中第一个即返回：
/// 1. `BEGIN` 开头
/// 2. 包含 `Table_map:`
/// 3. 行事件起始行
/// 4. 其余 `###` 行
/// 5. `# at` 开头
/// 6. `COMMIT` 开头
/// 7. 其他
pub fn classify_line(line: &str) -> LineKind {
    if is_begin_line(line) {
        LineKind::Begin
    } else if is_table_map_line(line) {
        LineKind::TableMap
    } else if is_row_event_header(line) {
        LineKind::RowEventHeader
    } else if line.starts_with(ROW_EVENT_MARKER) {
        LineKind::RowEventContinuation
    } else if is_position_footer(line) {
        LineKind::PositionFooter
    } else if is_commit_line(line) {
        LineKind::Commit
    } else {
        LineKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod predicate_tests {
        use super::*;

        #[test]
        fn begin_and_commit() {
            assert!(is_begin_line("BEGIN"));
            assert!(is_begin_line("BEGIN/*!*/;"));
            assert!(!is_begin_line(" BEGIN"));
            assert!(is_commit_line("COMMIT/*!*/;"));
            assert!(!is_commit_line("# COMMIT"));
        }

        #[test]
        fn table_map_anywhere_in_line() {
            assert!(is_table_map_line(
                "#180129 17:28:04 server id 1  end_log_pos 372 CRC32 0x5e1f0a4b \tTable_map: `db`.`t` mapped to number 108"
            ));
            assert!(is_table_map_line("Table_map:"));
            assert!(!is_table_map_line("Table_map `db`.`t`"));
        }

        #[test]
        fn row_event_header_vs_continuation() {
            for header in [
                "### UPDATE `db`.`t`",
                "### INSERT INTO `db`.`t`",
                "### DELETE FROM `db`.`t`",
            ] {
                assert!(is_row_event_header(header), "Failed for: {}", header);
                assert!(!is_row_event_continuation(header), "Failed for: {}", header);
            }

            for continuation in ["### WHERE", "### SET", "###   @1=1 /* INT meta=0 */", "###"] {
                assert!(!is_row_event_header(continuation), "Failed for: {}", continuation);
                assert!(is_row_event_continuation(continuation), "Failed for: {}", continuation);
            }

            assert!(!is_row_event_continuation("## UPDATE"));
        }

        #[test]
        fn position_footer() {
            assert!(is_position_footer("# at 432"));
            assert!(!is_position_footer("#180129 17:28:05 server id 1"));
            assert!(!is_position_footer("### at"));
        }
    }

    mod classify_tests {
        use super::*;

        #[test]
        fn each_shape() {
            let cases = [
                ("BEGIN", LineKind::Begin),
                (
                    "#180129 17:28:04 server id 1 \tTable_map: `db`.`t` mapped to number 108",
                    LineKind::TableMap,
                ),
                ("### INSERT INTO `db`.`t`", LineKind::RowEventHeader),
                ("### SET", LineKind::RowEventContinuation),
                ("# at 219", LineKind::PositionFooter),
                ("COMMIT/*!*/;", LineKind::Commit),
                ("#180129 17:28:05 server id 1 \tXid = 21", LineKind::Other),
                ("", LineKind::Other),
            ];
            for (line, expected) in cases {
                assert_eq!(classify_line(line), expected, "Failed for: {:?}", line);
            }
        }

        #[test]
        fn priority_order() {
            // Table_map 的检查先于 ### 前缀
            assert_eq!(classify_line("### Table_map: x"), LineKind::TableMap);
            // BEGIN 先于 Table_map
            assert_eq!(classify_line("BEGIN Table_map:"), LineKind::Begin);
        }
    }
}
