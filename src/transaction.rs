//! 解析结果的数据结构
//!
//! 解析产出一棵三层树：`Transaction` → `Statement` → `Change`。
//! 每一层都按照在 dump 中出现的顺序保存子节点。

use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// `Display` 输出中时间戳使用的格式
const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 行变更类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChangeKind {
    /// `### INSERT INTO ...`
    Insert,
    /// `### UPDATE ...`
    Update,
    /// `### DELETE FROM ...`
    Delete,
}

impl ChangeKind {
    /// 返回 dump 中使用的大写关键字
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Insert => "INSERT",
            ChangeKind::Update => "UPDATE",
            ChangeKind::Delete => "DELETE",
        }
    }
}

impl FromStr for ChangeKind {
    type Err = ParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "INSERT" => Ok(ChangeKind::Insert),
            "UPDATE" => Ok(ChangeKind::Update),
            "DELETE" => Ok(ChangeKind::Delete),
            other => Err(ParseError::UnknownChangeKind {
                token: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一次行级变更（一条 INSERT / UPDATE / DELETE 行事件）
///
/// `actual_command` 保存去掉 `### ` 前缀后的完整正文，多行之间以 `\n` 连接，
/// 末尾不带换行。
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Change {
    /// 变更类型
    pub kind: ChangeKind,

    /// 原始正文
    pub actual_command: String,
}

impl Change {
    /// 变更类型
    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// 原始正文
    pub fn actual_command(&self) -> &str {
        &self.actual_command
    }
}

/// 一个 `Table_map:` 块，聚合其后的行变更
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statement {
    /// 按出现顺序排列的变更
    pub changes: Vec<Change>,
}

impl Statement {
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// 一个 `BEGIN … COMMIT` 事务
///
/// 只有在起止时间戳都已知时才会被构造出来，因此 [`Transaction::duration`]
/// 总是可以直接计算。
///
/// # 示例
///
/// ```
/// use binlog_text_parser::parse_transactions_from_string;
///
/// let dump = [
///     "BEGIN",
///     "#180129 17:28:04 server id 1  end_log_pos 372 \tTable_map: `db`.`t` mapped to number 108",
///     "#180129 17:28:05 server id 1  end_log_pos 463 \tXid = 21",
///     "COMMIT/*!*/;",
/// ]
/// .join("\n");
///
/// let transactions = parse_transactions_from_string(&dump)?;
/// assert_eq!(transactions[0].duration(), 1);
/// assert_eq!(transactions[0].to_string(), "Transaction 2018-01-29 17:28:04 (duration: 1)");
/// # Ok::<(), binlog_text_parser::ParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transaction {
    /// 事务内第一个 `Table_map:` 行上的时间戳
    pub start_time: NaiveDateTime,

    /// `COMMIT` 前一行上的时间戳
    pub end_time: NaiveDateTime,

    /// 按出现顺序排列的语句
    pub statements: Vec<Statement>,
}

impl Transaction {
    /// 事务耗时（整秒，向零截断）
    pub fn duration(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// 事务内所有语句的变更总数
    pub fn change_count(&self) -> usize {
        self.statements.iter().map(Statement::len).sum()
    }

    /// 按顺序遍历事务内的全部变更
    pub fn changes(&self) -> impl Iterator<Item = &Change> {
        self.statements.iter().flat_map(|s| s.changes.iter())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction {} (duration: {})",
            self.start_time.format(DISPLAY_TIMESTAMP_FORMAT),
            self.duration()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 1, 29)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn change(kind: ChangeKind) -> Change {
        Change {
            kind,
            actual_command: format!("{} `db`.`t`", kind),
        }
    }

    #[test]
    fn change_kind_from_token() {
        assert_eq!("INSERT".parse::<ChangeKind>().unwrap(), ChangeKind::Insert);
        assert_eq!("UPDATE".parse::<ChangeKind>().unwrap(), ChangeKind::Update);
        assert_eq!("DELETE".parse::<ChangeKind>().unwrap(), ChangeKind::Delete);
        assert!("update".parse::<ChangeKind>().is_err());
        assert!("WHERE".parse::<ChangeKind>().is_err());
    }

    #[test]
    fn duration_and_display() {
        let trx = Transaction {
            start_time: ts(17, 28, 9),
            end_time: ts(17, 28, 11),
            statements: vec![],
        };
        assert_eq!(trx.duration(), 2);
        assert_eq!(trx.to_string(), "Transaction 2018-01-29 17:28:09 (duration: 2)");
    }

    #[test]
    fn duration_spanning_midnight() {
        let start = ts(23, 59, 58);
        let end = NaiveDate::from_ymd_opt(2018, 1, 30)
            .unwrap()
            .and_hms_opt(0, 0, 3)
            .unwrap();
        let trx = Transaction {
            start_time: start,
            end_time: end,
            statements: vec![],
        };
        assert_eq!(trx.duration(), 5);
    }

    #[test]
    fn change_count_across_statements() {
        let trx = Transaction {
            start_time: ts(0, 0, 0),
            end_time: ts(0, 0, 0),
            statements: vec![
                Statement {
                    changes: vec![change(ChangeKind::Insert)],
                },
                Statement::default(),
                Statement {
                    changes: vec![change(ChangeKind::Update), change(ChangeKind::Delete)],
                },
            ],
        };
        assert_eq!(trx.change_count(), 3);
        let kinds: Vec<_> = trx.changes().map(Change::kind).collect();
        assert_eq!(
            kinds,
            vec![ChangeKind::Insert, ChangeKind::Update, ChangeKind::Delete]
        );
        assert!(trx.statements()[1].is_empty());
    }
}
