//! Greenscan CLI -- 바코드 분류, 제품 조회, 지속가능성 평가 명령줄 도구

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;

use greenscan_core::config::GreenscanConfig;

use crate::cli::Cli;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let Cli {
        config,
        log_level,
        output,
        command,
    } = Cli::parse();

    // 로깅 설정만 미리 읽고, 설정 에러 보고는 각 명령이 담당
    let mut general = GreenscanConfig::load_or_default(&config)
        .await
        .map(|c| c.general)
        .unwrap_or_default();
    if let Some(level) = log_level {
        general.log_level = level;
    }
    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("warning: {e:#}");
    }

    greenscan_core::metrics::describe_all();
    tracing::debug!(config = %config.display(), "greenscan starting");

    let writer = OutputWriter::new(output);
    match commands::dispatch(command, &config, &writer).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}
