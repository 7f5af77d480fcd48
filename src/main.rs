use anyhow::Result;
use part_enricher::{logger, App, AppError, Config};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置，命令行第一个参数为起始批次编号
    let arg = std::env::args().nth(1);
    let config = Config::load()?.with_resume_arg(arg.as_deref());

    // 初始化日志
    logger::init(config.verbose_logging);

    // 凭据问题直接退出，不处理任何批次
    let app = match App::initialize(config).await {
        Ok(app) => app,
        Err(AppError::Config(e)) => {
            error!("❌ {}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    app.run().await?;

    Ok(())
}
