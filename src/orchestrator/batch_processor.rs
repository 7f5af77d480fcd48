//! 单个批次处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理单个批次的所有编号，是批次级别的编排器。
//!
//! ## 状态流转
//!
//! ```text
//! PENDING → IDENTIFIERS_LOADED → TOKEN_ACQUIRED → PROCESSING → DONE
//!     │              │
//!     │              ├─ 编号为空 ──→ SKIPPED_EMPTY
//!     │              └─ 令牌失败 ──→ SKIPPED_AUTH_FAILED
//!     └─ 文件无法读取 ──→ SKIPPED_UNREADABLE
//! ```
//!
//! 编号按提取顺序逐个处理，每次尝试之后（无论成败）都固定等待一个间隔。

use crate::clients::{AuthClient, ProductClient};
use crate::error::WriteError;
use crate::models::{extract_identifiers, Batch, CredentialPair};
use crate::services::{BatchWriter, RequestThrottle};
use crate::workflow::{BatchCtx, ProcessResult, ProductFlow};
use std::fmt;
use tracing::{debug, error, info, warn};

/// 批次状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Pending,
    IdentifiersLoaded,
    TokenAcquired,
    Processing,
    Done,
    /// 没有编号，不请求令牌，不创建任何输出文件
    SkippedEmpty,
    /// 令牌获取失败，跳过整个批次
    SkippedAuthFailed,
    /// 源文件无法读取
    SkippedUnreadable,
}

impl BatchState {
    /// 是否为终止状态
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BatchState::Done
                | BatchState::SkippedEmpty
                | BatchState::SkippedAuthFailed
                | BatchState::SkippedUnreadable
        )
    }

    pub fn is_skipped(&self) -> bool {
        self.is_terminal() && *self != BatchState::Done
    }
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchState::Pending => "PENDING",
            BatchState::IdentifiersLoaded => "IDENTIFIERS_LOADED",
            BatchState::TokenAcquired => "TOKEN_ACQUIRED",
            BatchState::Processing => "PROCESSING",
            BatchState::Done => "DONE",
            BatchState::SkippedEmpty => "SKIPPED_EMPTY",
            BatchState::SkippedAuthFailed => "SKIPPED_AUTH_FAILED",
            BatchState::SkippedUnreadable => "SKIPPED_UNREADABLE",
        };
        f.write_str(name)
    }
}

/// 单个批次的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub batch_index: u64,
    pub position: usize,
    pub client_id: String,
    pub state: BatchState,
    /// 提取到的编号数量
    pub identifiers: usize,
    pub appended: usize,
    pub failed: usize,
}

impl BatchOutcome {
    fn new(batch: &Batch, position: usize, credential: &CredentialPair) -> Self {
        Self {
            batch_index: batch.index,
            position,
            client_id: credential.id.clone(),
            state: BatchState::Pending,
            identifiers: 0,
            appended: 0,
            failed: 0,
        }
    }

    fn transition(&mut self, next: BatchState) {
        debug!("[批次 {}] 状态: {} → {}", self.batch_index, self.state, next);
        self.state = next;
    }
}

/// 单个批次处理器
pub struct BatchProcessor<'a> {
    auth_client: &'a AuthClient,
    product_client: &'a ProductClient,
    writer: &'a BatchWriter,
    throttle: RequestThrottle,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(
        auth_client: &'a AuthClient,
        product_client: &'a ProductClient,
        writer: &'a BatchWriter,
        throttle: RequestThrottle,
    ) -> Self {
        Self {
            auth_client,
            product_client,
            writer,
            throttle,
        }
    }

    /// 处理单个批次
    ///
    /// # 参数
    /// - `batch`: 批次
    /// - `position`: 批次在本次运行中的轮询位置
    /// - `credential`: 分配给本批次的凭据
    ///
    /// # 返回
    /// 令牌和查询失败都在本函数内消化；只有写入失败会返回错误
    pub async fn process(
        &self,
        batch: &Batch,
        position: usize,
        credential: &CredentialPair,
    ) -> Result<BatchOutcome, WriteError> {
        let mut outcome = BatchOutcome::new(batch, position, credential);

        info!(
            "[批次 {}] 处理 {} (client_id={})",
            batch.index,
            batch.file_name(),
            credential.id
        );

        let identifiers = match extract_identifiers(batch) {
            Ok(ids) => ids,
            Err(e) => {
                error!("[批次 {}] ❌ {}", batch.index, e);
                outcome.transition(BatchState::SkippedUnreadable);
                return Ok(outcome);
            }
        };
        outcome.identifiers = identifiers.len();
        outcome.transition(BatchState::IdentifiersLoaded);

        if identifiers.is_empty() {
            info!("[批次 {}] {} 中没有找到编号，跳过", batch.index, batch.file_name());
            outcome.transition(BatchState::SkippedEmpty);
            return Ok(outcome);
        }

        let token = match self.auth_client.fetch_token(credential).await {
            Ok(token) => token,
            Err(e) => {
                error!("[批次 {}] ❌ 令牌获取失败，跳过文件 {}: {}", batch.index, batch.file_name(), e);
                outcome.transition(BatchState::SkippedAuthFailed);
                return Ok(outcome);
            }
        };
        outcome.transition(BatchState::TokenAcquired);

        let ctx = BatchCtx::new(batch.index, position, credential.id.clone(), token);
        let flow = ProductFlow::new(self.product_client, self.writer);
        let total = identifiers.len();

        outcome.transition(BatchState::Processing);
        for (i, identifier) in identifiers.iter().enumerate() {
            debug!("{} 编号 {}/{}: {}", ctx, i + 1, total, identifier);

            match flow.run(&ctx, identifier).await? {
                ProcessResult::Appended => outcome.appended += 1,
                ProcessResult::Failed => outcome.failed += 1,
            }

            self.throttle.pause().await;
        }
        outcome.transition(BatchState::Done);

        if outcome.failed > 0 {
            warn!(
                "[批次 {}] 完成: 成功 {}/{}，失败 {}",
                batch.index, outcome.appended, total, outcome.failed
            );
        }

        Ok(outcome)
    }
}
