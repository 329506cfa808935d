// ==========================================
// 订单标准化系统 - 命令行入口
// ==========================================
// 职责: 选择预设 → 读取 CSV → 执行管道 → 输出 JSON 预览与文件
// 错误只在这里转换为展示字符串
// ==========================================

use anyhow::Context;
use clap::Parser;
use order_normalizer::config::{ConverterSettings, PresetRegistry, PresetStore};
use order_normalizer::importer::OrderPipeline;
use order_normalizer::{logging, ZeroQuantityPolicy, VERSION};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

/// 供应商 CSV 订单标准化与产品订单转换
#[derive(Parser, Debug)]
#[command(name = "order-normalizer", version, about)]
struct Cli {
    /// 待转换的 CSV 文件
    #[arg(required_unless_present = "list_presets")]
    csv: Option<PathBuf>,

    /// 供应商预设名
    #[arg(
        short,
        long,
        env = "ORDER_NORMALIZER_SUPPLIER",
        default_value = "Default Example"
    )]
    supplier: String,

    /// 额外的预设文件（JSON），同名覆盖内置预设
    #[arg(long, env = "ORDER_NORMALIZER_PRESETS")]
    presets: Option<PathBuf>,

    /// 输出目录（默认系统临时目录）
    #[arg(short, long, env = "ORDER_NORMALIZER_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// 零数量行处理方式: accept / skip
    #[arg(long, env = "ORDER_NORMALIZER_ZERO_QUANTITY", default_value = "accept")]
    zero_quantity: ZeroQuantityPolicy,

    /// 列出可用预设后退出
    #[arg(long)]
    list_presets: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    log_json: bool,
}

fn main() {
    // 加载 .env（不存在时忽略）
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    if cli.log_json {
        logging::init_json(level);
    } else {
        logging::init(level);
    }

    info!(version = VERSION, "订单标准化工具启动");

    if let Err(e) = execute(&cli) {
        error!(error = %e, "转换失败");
        eprintln!("❌ Error: {:#}", e);
        process::exit(1);
    }
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let registry = PresetRegistry::layered(
        PresetRegistry::default_path().as_deref(),
        cli.presets.as_deref(),
    )?;

    if cli.list_presets {
        println!("{}", serde_json::to_string_pretty(&registry.to_json_value())?);
        return Ok(());
    }

    let csv_path = cli.csv.as_deref().context("缺少 CSV 文件参数")?;
    let bytes = std::fs::read(csv_path)
        .with_context(|| format!("CSV 文件读取失败: {}", csv_path.display()))?;

    if registry.get_preset(&cli.supplier).is_none() {
        anyhow::bail!(
            "供应商预设不存在: {}（可用: {}）",
            cli.supplier,
            registry.supplier_names().join(", ")
        );
    }

    let settings = ConverterSettings {
        zero_quantity: cli.zero_quantity,
    };
    let pipeline = OrderPipeline::new(registry, settings);
    let outcome = pipeline.run(&cli.supplier, &bytes)?;

    let json = outcome.to_json()?;
    let output_dir = cli.output_dir.clone().unwrap_or_else(std::env::temp_dir);
    let output_path = outcome.write_json(&output_dir)?;

    println!("{}", json);
    eprintln!(
        "已转换 {} 行，跳过 {} 行，输出文件: {}",
        outcome.batch.product_rows,
        outcome.batch.skipped_rows,
        output_path.display()
    );
    for diagnostic in outcome.diagnostics() {
        eprintln!(
            "  行 {} [{}]: {}",
            diagnostic.row_number, diagnostic.stage, diagnostic.reason
        );
    }

    Ok(())
}
