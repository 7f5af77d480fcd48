pub mod batch_ctx;
pub mod product_flow;

pub use batch_ctx::BatchCtx;
pub use product_flow::{ProcessResult, ProductFlow};
