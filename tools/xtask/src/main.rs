//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-core`: 运行 sweet-ui 覆盖率
//! - `cov-workspace`: 运行 workspace 覆盖率
//! - `config-check`: 严格检查配置文件（解析失败即报错，不回退默认值）

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use clap::{Parser, Subcommand};
use sweet_ui::UiConfig;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "开发辅助工具")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// 运行 fmt、clippy、test 门禁检查
    CheckAll,
    /// 运行 sweet-ui 覆盖率报告
    CovCore,
    /// 运行 workspace 覆盖率报告
    CovWorkspace,
    /// 检查配置文件
    ConfigCheck {
        /// 配置文件路径（默认：ui.json）
        #[arg(default_value = "ui.json")]
        path: PathBuf,
    },
}

fn run(step: &str, cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn cargo(args: &[&str]) -> anyhow::Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.args(args);
    run(&format!("cargo {}", args.join(" ")), &mut cmd)
}

fn ensure_cargo_llvm_cov_available() -> anyhow::Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.args(["llvm-cov", "--version"]);
    let status = cmd.status();
    match status {
        Ok(s) if s.success() => Ok(()),
        _ => anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        ),
    }
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Task::CheckAll => {
            cargo(&["fmt", "--all", "--", "--check"])?;
            cargo(&["clippy", "--workspace", "--all-targets"])?;
            cargo(&["test", "--workspace"])?;
        }
        Task::CovCore => {
            ensure_cargo_llvm_cov_available()?;
            cargo(&["llvm-cov", "-p", "sweet-ui", "--all-features", "--html"])?;
            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        Task::CovWorkspace => {
            ensure_cargo_llvm_cov_available()?;
            // 排除 xtask，避免工具代码稀释覆盖率
            cargo(&[
                "llvm-cov",
                "--workspace",
                "--exclude",
                "xtask",
                "--all-features",
                "--html",
            ])?;
            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        Task::ConfigCheck { path } => config_check(&path)?,
    }

    Ok(())
}

//=============================================================================
// config-check 命令实现
//=============================================================================

/// 严格解析并校验配置文件
///
/// 与 `UiConfig::load` 不同，文件缺失或解析失败都视为错误。
fn config_check(path: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("读取 {} 失败: {e}", path.display()))?;
    let config: UiConfig = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("解析 {} 失败: {e}", path.display()))?;
    config.validate()?;

    eprintln!("✅ {} 检查通过", path.display());
    eprintln!(
        "   屏幕 {}x{} @{}x，时间轴 {} fps",
        config.screen.width, config.screen.height, config.screen.scale, config.timeline.frame_rate
    );
    Ok(())
}
