//! 便捷 API 函数
//!
//! 提供了一组方便使用的高层 API，使用默认配置解析字符串、Reader 或文件。

use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::ParseError;
use crate::parser::binlog_parser::BinlogParser;
use crate::transaction::Transaction;

/// 解析内存中的完整 dump 文本
///
/// # 示例
///
/// ```
/// use binlog_text_parser::parse_transactions_from_string;
///
/// let transactions = parse_transactions_from_string("")?;
/// assert!(transactions.is_empty());
/// # Ok::<(), binlog_text_parser::ParseError>(())
/// ```
pub fn parse_transactions_from_string(content: &str) -> Result<Vec<Transaction>, ParseError> {
    BinlogParser::new().parse(content.lines())
}

/// 从任何实现了 `Read` 的源读取并解析（内部使用 `BufReader`）
pub fn parse_transactions_from_reader<R: Read>(reader: R) -> Result<Vec<Transaction>, ParseError> {
    BinlogParser::new().parse_reader(BufReader::new(reader))
}

/// 从文件读取并解析
///
/// # 参数
///
/// * `path` - mysqlbinlog 输出文件路径
///
/// # 返回
///
/// * `Ok(Vec<Transaction>)` - 按出现顺序排列的事务
/// * `Err(ParseError)` - 文件打开失败或 dump 格式错误
///
/// # 示例
///
/// ```no_run
/// use binlog_text_parser::parse_transactions_from_file;
///
/// let transactions = parse_transactions_from_file("binlog.000001.txt")?;
/// for trx in &transactions {
///     println!("{}", trx);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_transactions_from_file<P>(path: P) -> Result<Vec<Transaction>, ParseError>
where
    P: AsRef<Path>,
{
    let path_ref = path.as_ref();
    let file = File::open(path_ref).map_err(|e| ParseError::FileNotFound {
        path: format!("{}: {}", path_ref.display(), e),
    })?;
    parse_transactions_from_reader(file)
}

/// 并行解析多个彼此独立的 dump 文件
///
/// 每个文件单独从空状态开始解析，事务不会跨文件拼接。
/// 返回结果与输入路径一一对应、顺序一致，单个文件的失败不影响其他文件。
///
/// # 示例
///
/// ```no_run
/// use binlog_text_parser::parse_transactions_from_files;
///
/// let results = parse_transactions_from_files(&["binlog.000001.txt", "binlog.000002.txt"]);
/// for (idx, result) in results.iter().enumerate() {
///     match result {
///         Ok(transactions) => println!("文件 {}: {} 个事务", idx, transactions.len()),
///         Err(err) => eprintln!("文件 {}: {}", idx, err),
///     }
/// }
/// ```
pub fn parse_transactions_from_files<P>(paths: &[P]) -> Vec<Result<Vec<Transaction>, ParseError>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(parse_transactions_from_file)
        .collect()
}
