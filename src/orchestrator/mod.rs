//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `pipeline` - 批次流水线
//! - 加载凭据，扫描批次
//! - 按位置轮询分配凭据
//! - 顺序驱动所有批次，输出全局统计
//!
//! ### `batch_processor` - 单个批次处理器
//! - 提取编号 → 获取令牌 → 逐个查询
//! - 每次查询后固定等待
//! - 维护批次状态
//!
//! ## 层次关系
//!
//! ```text
//! pipeline (处理 Vec<Batch>)
//!     ↓
//! batch_processor (处理 Vec<编号>)
//!     ↓
//! workflow::ProductFlow (处理单个编号)
//!     ↓
//! services / clients (能力层：映射 / 写入 / 限速 / HTTP)
//! ```

pub mod batch_processor;
pub mod pipeline;

// 重新导出主要类型
pub use batch_processor::{BatchOutcome, BatchProcessor, BatchState};
pub use pipeline::{App, RunReport};
