use clap::Parser;

use sql2es::cli::Cli;
use sql2es::config::{DEFAULT_CONFIG_PATH, get_config, init_config_from};
use sql2es::runtime::modes::{self, Mode};
use sql2es::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 配置必须在其他模块之前加载
    init_config_from(cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH));

    match (modes::detect_mode(cli.command.as_ref()), cli.command) {
        (Mode::Cli, Some(command)) => {
            if let Err(e) = modes::run_cli(command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
        _ => {
            let config = get_config();
            // guard 需要存活到进程结束，保证日志刷盘
            let _guard = match init_logging(&config.logging) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("{}", e.format_colored());
                    std::process::exit(1);
                }
            };

            modes::run_server().await
        }
    }
}
