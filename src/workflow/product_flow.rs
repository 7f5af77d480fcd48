//! 编号处理流程 - 流程层
//!
//! 核心职责：定义"一个编号"的完整处理流程
//!
//! 流程顺序：
//! 1. 查询产品详情 → 追加输出行
//! 2. 查询失败 → 追加失败记录（兜底）
//!
//! 每个编号恰好落到两者之一

use chrono::Utc;
use tracing::{info, warn};

use crate::clients::ProductClient;
use crate::error::WriteError;
use crate::models::FailureRecord;
use crate::services::BatchWriter;
use crate::utils::logging::truncate_text;
use crate::workflow::batch_ctx::BatchCtx;

/// 编号处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    /// 已追加输出行
    Appended,
    /// 已追加失败记录
    Failed,
}

/// 编号处理流程
///
/// - 不持有令牌，令牌来自 `BatchCtx`
/// - 查询失败不向上传播，只有写入失败才返回错误
pub struct ProductFlow<'a> {
    product_client: &'a ProductClient,
    writer: &'a BatchWriter,
}

impl<'a> ProductFlow<'a> {
    /// 创建新的编号处理流程
    pub fn new(product_client: &'a ProductClient, writer: &'a BatchWriter) -> Self {
        Self {
            product_client,
            writer,
        }
    }

    pub async fn run(&self, ctx: &BatchCtx, identifier: &str) -> Result<ProcessResult, WriteError> {
        match self
            .product_client
            .fetch(&ctx.token, &ctx.client_id, identifier)
            .await
        {
            Ok(row) => {
                self.writer.append_row(ctx.batch_index, &row)?;
                info!(
                    "[批次 {}] ✓ 已追加 {} 到 {}",
                    ctx.batch_index,
                    identifier,
                    self.writer.table_path(ctx.batch_index).display()
                );
                Ok(ProcessResult::Appended)
            }
            Err(e) => {
                let record = FailureRecord::from_error(&e, Utc::now());
                self.writer.append_failure(ctx.batch_index, &record)?;
                warn!(
                    "[批次 {}] ⚠️ {} 查询失败 ({}: {})，已写入 {}",
                    ctx.batch_index,
                    identifier,
                    record.status,
                    truncate_text(&record.message, 120),
                    self.writer.failure_log_path(ctx.batch_index).display()
                );
                Ok(ProcessResult::Failed)
            }
        }
    }
}
