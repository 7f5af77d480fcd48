use crate::config::leading_number;
use crate::error::SourceError;
use crate::models::batch::Batch;
use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Reader};
use std::path::Path;
use tokio::fs;

/// 可识别的批次文件扩展名
const SPREADSHEET_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];
const CSV_EXTENSION: &str = "csv";

fn is_batch_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ext == CSV_EXTENSION || SPREADSHEET_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// 扫描输入目录，返回编号不小于 `resume_offset` 的批次，按编号升序排列
///
/// 目录不存在或过滤后为空时返回空列表
pub async fn list_batches(input_dir: &Path, resume_offset: u64) -> Result<Vec<Batch>> {
    if !input_dir.exists() {
        tracing::warn!("⚠️ 输入目录不存在: {}，请先运行转换程序", input_dir.display());
        return Ok(Vec::new());
    }

    let mut batches = Vec::new();
    let mut entries = fs::read_dir(input_dir)
        .await
        .with_context(|| format!("无法读取文件夹: {}", input_dir.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !is_batch_file(&path) {
            continue;
        }
        let index = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(leading_number)
            .unwrap_or(0);
        batches.push(Batch::new(index, path));
    }

    batches.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.source_path.cmp(&b.source_path)));
    batches.retain(|b| b.index >= resume_offset);

    if batches.is_empty() {
        tracing::warn!(
            "⚠️ {} 中没有编号 >= {} 的批次文件",
            input_dir.display(),
            resume_offset
        );
    }

    Ok(batches)
}

/// 读取批次文件中的所有编号
///
/// 按行优先顺序读取第一个工作表（csv 则为全部记录）的所有单元格，
/// 去除首尾空白并丢弃空字符串。文件不存在时返回空列表。
pub fn extract_identifiers(batch: &Batch) -> Result<Vec<String>, SourceError> {
    let path = &batch.source_path;
    if !path.exists() {
        return Ok(Vec::new());
    }

    let is_csv = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION))
        .unwrap_or(false);

    let cells = if is_csv {
        read_csv_cells(path)?
    } else {
        read_sheet_cells(path)?
    };

    Ok(cells
        .into_iter()
        .map(|cell| cell.trim().to_string())
        .filter(|cell| !cell.is_empty())
        .collect())
}

fn unreadable(path: &Path, source: impl std::error::Error + Send + Sync + 'static) -> SourceError {
    SourceError::Unreadable {
        path: path.display().to_string(),
        source: Box::new(source),
    }
}

fn read_sheet_cells(path: &Path) -> Result<Vec<String>, SourceError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SourceError::NoSheet {
            path: path.display().to_string(),
        })?
        .map_err(|e| unreadable(path, e))?;

    Ok(range
        .rows()
        .flat_map(|row| row.iter().map(|cell| cell.to_string()))
        .collect())
}

fn read_csv_cells(path: &Path) -> Result<Vec<String>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| unreadable(path, e))?;

    let mut cells = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| unreadable(path, e))?;
        cells.extend(record.iter().map(str::to_string));
    }
    Ok(cells)
}
