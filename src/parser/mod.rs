//! Parser 模块 - 解析 mysqlbinlog 文本输出
//!
//! 此模块提供了完整的解析功能,包括:
//! - 行事件正文累积与事务树构建
//! - 时间戳与变更类型解析
//! - 便捷 API 函数

mod api;
pub(crate) mod binlog_parser;
pub(crate) mod constants;
pub(crate) mod parse_functions;

pub use api::{
    parse_transactions_from_file, parse_transactions_from_files, parse_transactions_from_reader,
    parse_transactions_from_string,
};
pub use binlog_parser::BinlogParser;
