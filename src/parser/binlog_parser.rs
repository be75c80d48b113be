//! BinlogParser - 逐行扫描 binlog 文本输出并构建事务树
//!
//! 扫描过程是单遍的：每一行先由 [`classify_line`] 判定角色，
//! 再驱动 `ScanState` 上对应的转移。所有状态都局限在一次 `parse` 调用内，
//! 同一个 `BinlogParser` 可以被多个线程同时使用。

use chrono::NaiveDateTime;
use log::{debug, trace, warn};
use std::io::BufRead;

use crate::error::ParseError;
use crate::parser::constants::{COMMIT_MARKER, TABLE_MAP_MARKER};
use crate::parser::parse_functions::{create_change, parse_timestamp, strip_marker_prefix};
use crate::parser_config::ParserConfig;
use crate::tools::{LineKind, classify_line};
use crate::transaction::{Statement, Transaction};

/// binlog 文本输出解析器
///
/// # 示例
///
/// ```
/// use binlog_text_parser::BinlogParser;
///
/// let dump = [
///     "BEGIN",
///     "/*!*/;",
///     "#180129 17:28:04 server id 1  end_log_pos 372 CRC32 0x5e1f0a4b \tTable_map: `db`.`t` mapped to number 108",
///     "#180129 17:28:04 server id 1  end_log_pos 432 CRC32 0x0c1d2e3f \tWrite_rows: table id 108 flags: STMT_END_F",
///     "### INSERT INTO `db`.`t`",
///     "### SET",
///     "###   @1=1 /* INT meta=0 nullable=1 is_null=0 */",
///     "# at 432",
///     "#180129 17:28:05 server id 1  end_log_pos 463 CRC32 0x7a8b9c0d \tXid = 21",
///     "COMMIT/*!*/;",
/// ];
///
/// let parser = BinlogParser::new();
/// let transactions = parser.parse(dump)?;
///
/// assert_eq!(transactions.len(), 1);
/// let change = &transactions[0].statements[0].changes[0];
/// assert_eq!(change.actual_command, "INSERT INTO `db`.`t`\nSET\n  @1=1 /* INT meta=0 nullable=1 is_null=0 */");
/// # Ok::<(), binlog_text_parser::ParseError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinlogParser {
    config: ParserConfig,
}

impl BinlogParser {
    /// 使用默认配置创建解析器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用自定义配置创建解析器
    ///
    /// # 错误
    ///
    /// 配置未通过 [`ParserConfig::validate`] 时返回 `InvalidConfig`。
    pub fn with_config(config: ParserConfig) -> Result<Self, ParseError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// 解析按原始顺序给出的行序列
    ///
    /// 行尾的 `\n` / `\r\n` 会被忽略，因此既可以传入 `str::lines()`，
    /// 也可以传入保留了换行符的行。
    ///
    /// # 返回
    ///
    /// * `Ok(Vec<Transaction>)` - 按出现顺序排列的已提交事务；没有 `BEGIN` 时为空
    /// * `Err(ParseError)` - 遇到的第一个格式错误
    pub fn parse<I, S>(&self, lines: I) -> Result<Vec<Transaction>, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = ScanState::new(&self.config);
        for line in lines {
            state.feed(line.as_ref())?;
        }
        Ok(state.finish())
    }

    /// 从任意 `BufRead` 逐行读取并解析
    ///
    /// 读取时复用同一个行缓冲区。
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> Result<Vec<Transaction>, ParseError> {
        let mut state = ScanState::new(&self.config);
        let mut buffer = String::new();
        loop {
            buffer.clear();
            if reader.read_line(&mut buffer)? == 0 {
                break;
            }
            state.feed(&buffer)?;
        }
        Ok(state.finish())
    }
}

/// `BEGIN` 之后、`COMMIT` 之前的事务
#[derive(Debug)]
struct OpenTransaction {
    opened_at: usize,
    start_time: Option<NaiveDateTime>,
    statements: Vec<Statement>,
}

/// 单次解析的扫描状态
struct ScanState<'c> {
    config: &'c ParserConfig,
    transactions: Vec<Transaction>,
    current_transaction: Option<OpenTransaction>,
    /// 正在累积的行事件正文，`None` 表示没有进行中的变更
    change_buffer: Option<String>,
    previous_line: String,
    line_no: usize,
}

impl<'c> ScanState<'c> {
    fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            transactions: Vec::new(),
            current_transaction: None,
            change_buffer: None,
            previous_line: String::new(),
            line_no: 0,
        }
    }

    fn feed(&mut self, line: &str) -> Result<(), ParseError> {
        let line = line.trim_end_matches(['\n', '\r']);
        self.line_no += 1;

        match classify_line(line) {
            LineKind::Begin => self.on_begin()?,
            LineKind::TableMap => self.on_table_map(line)?,
            LineKind::RowEventHeader => self.on_row_event_header(line)?,
            LineKind::RowEventContinuation => self.on_row_event_continuation(line)?,
            LineKind::PositionFooter => self.flush_change(line)?,
            LineKind::Commit => self.on_commit(line)?,
            LineKind::Other => {}
        }

        self.previous_line.clear();
        self.previous_line.push_str(line);
        Ok(())
    }

    fn finish(self) -> Vec<Transaction> {
        if let Some(open) = self.current_transaction {
            warn!(
                "dropping transaction opened at line {} without COMMIT ({} statements)",
                open.opened_at,
                open.statements.len()
            );
        }
        self.transactions
    }

    fn on_begin(&mut self) -> Result<(), ParseError> {
        if let Some(open) = &self.current_transaction {
            return Err(ParseError::NestedTransaction {
                line: self.line_no,
                opened_at: open.opened_at,
            });
        }
        self.current_transaction = Some(OpenTransaction {
            opened_at: self.line_no,
            start_time: None,
            statements: Vec::new(),
        });
        Ok(())
    }

    fn on_table_map(&mut self, line: &str) -> Result<(), ParseError> {
        self.flush_change(line)?;
        self.close_statement()?;

        let line_no = self.line_no;
        let config = self.config;
        let trx = self
            .current_transaction
            .as_mut()
            .ok_or_else(|| ParseError::NoOpenTransaction {
                marker: TABLE_MAP_MARKER,
                line: line_no,
                raw: line.to_string(),
            })?;

        if trx.start_time.is_none() {
            trx.start_time = Some(parse_timestamp(line, line_no, config)?);
        }
        trx.statements.push(Statement::default());
        trace!("statement #{} opened at line {}", trx.statements.len(), line_no);
        Ok(())
    }

    /// 新的行事件起始行：先结束上一条正文，再以本行开始新正文
    fn on_row_event_header(&mut self, line: &str) -> Result<(), ParseError> {
        self.flush_change(line)?;
        if !self.has_open_statement() {
            return Err(ParseError::NoOpenStatement {
                line: self.line_no,
                raw: line.to_string(),
            });
        }
        let body = strip_marker_prefix(line, self.config.marker_prefix_len);
        self.change_buffer = Some(body.to_string());
        Ok(())
    }

    fn on_row_event_continuation(&mut self, line: &str) -> Result<(), ParseError> {
        let content = strip_marker_prefix(line, self.config.marker_prefix_len);
        match self.change_buffer.as_mut() {
            Some(body) => {
                body.push('\n');
                body.push_str(content);
                Ok(())
            }
            None => Err(ParseError::OrphanContinuation {
                line: self.line_no,
                raw: line.to_string(),
            }),
        }
    }

    fn on_commit(&mut self, line: &str) -> Result<(), ParseError> {
        self.flush_change(line)?;
        self.close_statement()?;

        let line_no = self.line_no;
        let open = self
            .current_transaction
            .take()
            .ok_or_else(|| ParseError::NoOpenTransaction {
                marker: COMMIT_MARKER,
                line: line_no,
                raw: line.to_string(),
            })?;

        let start_time = open
            .start_time
            .ok_or(ParseError::MissingStartTimestamp { line: line_no })?;
        // 事务的结束时间戳写在 COMMIT 的前一行（Xid 事件头）上
        let end_time = parse_timestamp(&self.previous_line, line_no - 1, self.config)?;

        let transaction = Transaction {
            start_time,
            end_time,
            statements: open.statements,
        };
        debug!(
            "transaction #{} committed at line {}: {} statements, {} changes, duration {}s",
            self.transactions.len(),
            line_no,
            transaction.statements.len(),
            transaction.change_count(),
            transaction.duration()
        );
        self.transactions.push(transaction);
        Ok(())
    }

    /// 把已缓冲的正文作为一个 `Change` 追加到当前语句；没有缓冲时什么也不做
    fn flush_change(&mut self, line: &str) -> Result<(), ParseError> {
        let Some(body) = self.change_buffer.take() else {
            return Ok(());
        };
        let change = create_change(body)?;
        let line_no = self.line_no;
        let statement = self
            .current_transaction
            .as_mut()
            .and_then(|trx| trx.statements.last_mut())
            .ok_or_else(|| ParseError::NoOpenStatement {
                line: line_no,
                raw: line.to_string(),
            })?;
        trace!("{} change closed at line {}", change.kind, line_no);
        statement.changes.push(change);
        Ok(())
    }

    /// 当前语句即将被替换或随事务结束时，按配置检查空语句
    fn close_statement(&self) -> Result<(), ParseError> {
        if self.config.allow_empty_statements {
            return Ok(());
        }
        let last_is_empty = self
            .current_transaction
            .as_ref()
            .and_then(|trx| trx.statements.last())
            .is_some_and(Statement::is_empty);
        if last_is_empty {
            return Err(ParseError::EmptyStatement { line: self.line_no });
        }
        Ok(())
    }

    fn has_open_statement(&self) -> bool {
        self.current_transaction
            .as_ref()
            .is_some_and(|trx| !trx.statements.is_empty())
    }
}
