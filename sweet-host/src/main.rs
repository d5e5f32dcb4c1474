//! # Sweet Host
//!
//! 无头宿主：构建演示场景，按固定帧率推进时间轴，输出节点树。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p sweet-host -- demo
//! cargo run -p sweet-host -- demo --seconds 3 --log-level debug
//! cargo run -p sweet-host -- --config ui.json tree
//! cargo run -p sweet-host -- init-config ui.json
//! ```

mod scene;

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sweet_ui::{Scheduler, Timeline, UiConfig};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

use scene::DemoScene;

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "sweet-host")]
#[command(about = "Sweet UI 无头宿主 - 构建演示场景并推进动画")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件路径（JSON），缺省时使用默认配置
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 日志级别
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行演示动画，结束后输出节点树
    Demo {
        /// 最多推进的时长（秒）
        #[arg(short, long, default_value = "8")]
        seconds: f32,
    },

    /// 只输出演示场景的节点树，不运行动画
    Tree,

    /// 把默认配置写入文件
    InitConfig {
        /// 输出路径
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::from(cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => UiConfig::load(path),
        None => UiConfig::default(),
    };
    config.validate().context("配置无效")?;

    match cli.command {
        Commands::Demo { seconds } => run_demo(&config, seconds),
        Commands::Tree => {
            let scene = DemoScene::build(&config.environment());
            println!("{}", scene.root.dump_tree());
            Ok(())
        }
        Commands::InitConfig { path } => {
            UiConfig::default()
                .save(&path)
                .with_context(|| format!("写入配置失败: {}", path.display()))?;
            info!(path = %path.display(), "默认配置已写入");
            Ok(())
        }
    }
}

fn run_demo(config: &UiConfig, seconds: f32) -> Result<()> {
    let env = config.environment();
    let timeline = Rc::new(Timeline::new());
    let scheduler = Scheduler::new(timeline.clone());

    let scene = DemoScene::build(&env);
    info!(
        title = %scene.title.text(),
        width = env.screen.width,
        height = env.screen.height,
        "演示场景已构建"
    );
    scene.animate(&scheduler, &config.animation);

    scene::play(&timeline, &config.timeline, seconds);

    println!("{}", scene.root.dump_tree());
    Ok(())
}
