//! # Binlog Text Parser
//!
//! 将 `mysqlbinlog -v --base64-output=DECODE-ROWS` 生成的行格式 binlog 文本
//! 解析为结构化的事务树，用于离线审计复制流到底执行了什么。
//!
//! ## 功能特性
//!
//! - **单遍扫描**: 逐行识别标记，只保留一条行事件正文和上一行作为状态
//! - **结构化结果**: `Transaction` → `Statement` → `Change`，保持出现顺序
//! - **严格的错误处理**: 时间戳或结构不符合 dump 语法时立即返回错误，不做猜测
//! - **多文件并行**: 彼此独立的 dump 文件可以并行解析
//!
//! ## 快速开始
//!
//! ```rust
//! use binlog_text_parser::{BinlogParser, ChangeKind};
//!
//! let dump = [
//!     "BEGIN",
//!     "#180129 17:28:04 server id 1  end_log_pos 372 \tTable_map: `db`.`t` mapped to number 108",
//!     "### DELETE FROM `db`.`t`",
//!     "### WHERE",
//!     "###   @1=3 /* INT meta=0 nullable=1 is_null=0 */",
//!     "# at 432",
//!     "#180129 17:28:06 server id 1  end_log_pos 463 \tXid = 21",
//!     "COMMIT/*!*/;",
//! ];
//!
//! let transactions = BinlogParser::new().parse(dump)?;
//! let trx = &transactions[0];
//!
//! assert_eq!(trx.duration(), 2);
//! assert_eq!(trx.statements[0].changes[0].kind, ChangeKind::Delete);
//! println!("{}", trx); // Transaction 2018-01-29 17:28:04 (duration: 2)
//! # Ok::<(), binlog_text_parser::ParseError>(())
//! ```
//!
//! ### 从文件读取
//!
//! ```rust,no_run
//! use binlog_text_parser::parse_transactions_from_file;
//!
//! let transactions = parse_transactions_from_file("binlog.000001.txt")?;
//! println!("共 {} 个事务", transactions.len());
//! # Ok::<(), binlog_text_parser::ParseError>(())
//! ```
//!
//! ## 识别的行
//!
//! ```text
//! BEGIN                                    事务开始
//! #180129 17:28:04 ... Table_map: ...      新语句；事务的起始时间戳
//! ### UPDATE / ### INSERT / ### DELETE     新的行事件
//! ###   @1=1 /* INT ... */                 行事件正文的继续行
//! # at 432                                 事件结束
//! #180129 17:28:05 ... Xid = 21            COMMIT 前一行；事务的结束时间戳
//! COMMIT/*!*/;                             事务提交
//! ```

pub mod error;
pub mod parser;
pub mod parser_config;
pub mod tools;
pub mod transaction;

pub use error::ParseError;
pub use parser::{
    BinlogParser, parse_transactions_from_file, parse_transactions_from_files,
    parse_transactions_from_reader, parse_transactions_from_string,
};
pub use parser_config::ParserConfig;
pub use transaction::{Change, ChangeKind, Statement, Transaction};
