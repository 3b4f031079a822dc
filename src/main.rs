use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use carlog::core::config;
use carlog::shell::{self, Command};

#[derive(Parser)]
#[command(name = "carlog", about = "车辆信息记录系统 terminal client")]
struct Args {
    /// Backend base URL (overrides config file and CARLOG_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to carlog.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("carlog.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("config failed to load: {e}");
            eprintln!("配置加载失败: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(&file_config, args.base_url.as_deref());

    log::info!("carlog starting against {}", resolved.base_url);

    if let Err(e) = shell::run(args.command, &resolved).await {
        log::error!("command failed: {e}");
        eprintln!("操作失败: {e}");
        std::process::exit(1);
    }
}
