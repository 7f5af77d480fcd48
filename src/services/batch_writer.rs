//! 批次输出写入服务 - 业务能力层
//!
//! 只负责"追加一行"能力，不关心流程

use crate::error::WriteError;
use crate::models::{FailureRecord, OutputRow, OUTPUT_HEADERS};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 批次输出写入服务
///
/// 职责：
/// - 向 `<批次编号>.csv` 追加输出行，文件首次创建时先写表头
/// - 向 `<批次编号>_not_found.txt` 追加失败记录
/// - 每次调用都是一次完整的 `write_all`，进程中途被杀不会破坏已写入的行
///
/// 批次严格顺序处理，同一文件不会被并发写入，因此不加锁
pub struct BatchWriter {
    output_dir: PathBuf,
}

impl BatchWriter {
    /// 创建写入服务
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 确保输出目录存在
    pub fn ensure_output_dir(&self) -> Result<(), WriteError> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| WriteError::new(self.output_dir.display().to_string(), e))
    }

    /// 输出表格路径
    pub fn table_path(&self, batch_index: u64) -> PathBuf {
        self.output_dir.join(format!("{}.csv", batch_index))
    }

    /// 失败日志路径
    pub fn failure_log_path(&self, batch_index: u64) -> PathBuf {
        self.output_dir.join(format!("{}_not_found.txt", batch_index))
    }

    /// 追加一行输出；文件不存在时表头与首行一起写入
    pub fn append_row(&self, batch_index: u64, row: &OutputRow) -> Result<(), WriteError> {
        let path = self.table_path(batch_index);
        let write_header = !path.exists();

        let mut buf = Vec::new();
        if write_header {
            encode_record(&mut buf, &OUTPUT_HEADERS).map_err(|e| WriteError::new(display(&path), e))?;
        }
        encode_record(&mut buf, &row.fields()).map_err(|e| WriteError::new(display(&path), e))?;

        debug!(
            "写入输出行: 批次 {} | 编号 {} | 表头: {}",
            batch_index, row.manufacturer_part_number, write_header
        );

        append(&path, &buf)
    }

    /// 追加一条失败记录
    pub fn append_failure(&self, batch_index: u64, failure: &FailureRecord) -> Result<(), WriteError> {
        let path = self.failure_log_path(batch_index);
        let line = format!("{}\n", failure.to_line());

        debug!("写入失败记录: 批次 {} | 编号 {}", batch_index, failure.identifier);

        append(&path, line.as_bytes())
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn append(path: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| WriteError::new(display(path), e))?;

    file.write_all(bytes).map_err(|e| WriteError::new(display(path), e))
}

/// 所有字段都加双引号，内部双引号加倍，记录以 `\n` 结尾
fn encode_record(buf: &mut Vec<u8>, fields: &[&str]) -> std::io::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(buf);
    writer.write_record(fields)?;
    writer.flush()?;
    Ok(())
}
