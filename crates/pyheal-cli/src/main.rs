use anyhow::{Context, Result};
use clap::Parser;
use pyheal_core::{heal_file, HealOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "pyheal", version, about = "Python 语法自愈工具")]
struct Cli {
    /// 目标 Python 文件路径（.py）
    path: Option<PathBuf>,
}

fn main() -> ExitCode {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    // 未给路径：打印用法并以退出码 1 结束（clap 的缺参退出码是 2，这里需要 1）
    let Some(path) = cli.path else {
        eprintln!("error: no file specified");
        eprintln!();
        eprintln!("usage:   pyheal <python_file.py>");
        eprintln!("example: pyheal hello.py");
        return ExitCode::from(1);
    };

    // 所有失败（输入校验 / 读写异常）统一走诊断输出 + 退出码 1；
    // 有无修复都算成功（含仅配平错误的情况），退出码 0
    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "heal failed");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(path: &Path) -> Result<()> {
    let opts = HealOptions::default();
    let mut out = io::stdout().lock();

    print_banner(&mut out)?;

    info!(path = %path.display(), "starting heal");
    let outcome = heal_file(path, &mut out, &opts).context("heal file")?;
    info!(
        total_found = outcome.total_found,
        fixable = outcome.fixable_count,
        wrote = outcome.did_write,
        "heal finished"
    );
    out.flush().ok();
    Ok(())
}

fn print_banner(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "================================")?;
    writeln!(out, "  pyheal - Python syntax healer")?;
    writeln!(out, "================================")?;
    writeln!(out)?;
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 支持通过环境变量 RUST_LOG 控制日志等级，如：RUST_LOG=debug
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
