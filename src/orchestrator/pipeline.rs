//! 批次流水线 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责所有批次的调度和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：加载凭据、创建输出目录、构建 HTTP 客户端
//! 2. **批次发现**：扫描输入目录，按起始编号过滤
//! 3. **凭据轮询**：第 i 个批次使用 `credentials[i % N]`
//! 4. **顺序处理**：一次只处理一个批次，委托 `BatchProcessor`
//! 5. **全局统计**：汇总所有批次的处理结果

use crate::clients::{build_http_client, AuthClient, ProductClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{assign_credential, list_batches, load_credentials, CredentialPair};
use crate::orchestrator::batch_processor::{BatchOutcome, BatchProcessor, BatchState};
use crate::services::{BatchWriter, RequestThrottle};
use crate::utils::logging::{
    log_batch_complete, log_batch_start, log_batches_loaded, log_startup, print_final_stats,
};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// 一次运行的结果
#[derive(Debug, Default)]
pub struct RunReport {
    pub batches: Vec<BatchOutcome>,
}

impl RunReport {
    pub fn done(&self) -> usize {
        self.batches.iter().filter(|b| b.state == BatchState::Done).count()
    }

    pub fn skipped(&self) -> usize {
        self.batches.iter().filter(|b| b.state.is_skipped()).count()
    }

    pub fn appended(&self) -> usize {
        self.batches.iter().map(|b| b.appended).sum()
    }

    pub fn failed(&self) -> usize {
        self.batches.iter().map(|b| b.failed).sum()
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    credentials: Vec<CredentialPair>,
    auth_client: AuthClient,
    product_client: ProductClient,
    writer: BatchWriter,
}

impl App {
    /// 初始化应用
    ///
    /// 凭据文件缺失或为空时返回配置错误，此时还没有处理任何批次
    pub async fn initialize(config: Config) -> AppResult<Self> {
        let credentials = load_credentials(&config.keys_file).await?;
        Self::with_credentials(config, credentials)
    }

    /// 使用已加载的凭据创建应用
    pub fn with_credentials(config: Config, credentials: Vec<CredentialPair>) -> AppResult<Self> {
        if credentials.is_empty() {
            return Err(crate::error::ConfigError::NoCredentials {
                path: config.keys_file.display().to_string(),
            }
            .into());
        }

        let http = build_http_client(&config)?;
        let writer = BatchWriter::new(&config.output_dir);
        writer.ensure_output_dir()?;

        log_startup(config.resume_offset, credentials.len(), config.request_delay_secs);

        Ok(Self {
            auth_client: AuthClient::new(http.clone(), config.token_url.clone()),
            product_client: ProductClient::new(http, config.product_api_base_url.clone()),
            writer,
            credentials,
            config,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunReport> {
        info!("\n📁 正在扫描待处理的批次...");
        let batches = list_batches(&self.config.input_dir, self.config.resume_offset).await?;

        let mut report = RunReport::default();

        let (first, last) = match (batches.first(), batches.last()) {
            (Some(first), Some(last)) => (first.index, last.index),
            _ => {
                warn!("⚠️ 没有找到待处理的批次文件，程序结束");
                return Ok(report);
            }
        };
        log_batches_loaded(batches.len(), first, last);

        let processor = BatchProcessor::new(
            &self.auth_client,
            &self.product_client,
            &self.writer,
            RequestThrottle::new(self.config.request_delay()),
        );

        for (position, batch) in batches.iter().enumerate() {
            let credential = assign_credential(&self.credentials, position);
            log_batch_start(position, batches.len(), batch.index);

            let outcome = processor
                .process(batch, position, credential)
                .await
                .with_context(|| format!("批次 {} 写入失败，终止运行", batch.index))?;

            log_batch_complete(
                outcome.batch_index,
                &outcome.state.to_string(),
                outcome.appended,
                outcome.identifiers,
            );
            report.batches.push(outcome);
        }

        print_final_stats(
            report.done(),
            report.skipped(),
            report.appended(),
            report.failed(),
            &self.config.output_dir.display().to_string(),
        );

        Ok(report)
    }
}
