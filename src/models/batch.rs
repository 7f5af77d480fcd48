use std::path::PathBuf;

/// 一个待处理批次：一个编号列表文件对应一个输出表格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// 批次编号（文件名开头的数字，无法解析时为 0）
    pub index: u64,
    /// 源文件路径
    pub source_path: PathBuf,
}

impl Batch {
    pub fn new(index: u64, source_path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            source_path: source_path.into(),
        }
    }

    /// 源文件名（仅用于日志显示）
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

