use anyhow::Result;
use exam_forecast::utils::logging;
use exam_forecast::{App, Command, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let command = Command::parse(std::env::args().skip(1))?;

    // 初始化并运行应用
    App::initialize(config).await?.run(command).await?;

    Ok(())
}
