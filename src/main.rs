// ==========================================
// 集装箱堆场排位系统 - 命令行入口
// ==========================================
// 用法: container-yard-aps <vessels.csv> [--config <file>]
//       [--yard <file>] [--start YYYY-MM-DD] [--end YYYY-MM-DD]
//       [--events-json <out>]
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use container_yard_aps::{
    logging, PlanningConfig, TimelineOrchestrator, VesselImporter, YardImporter,
};

struct CliArgs {
    vessels_path: String,
    config_path: Option<String>,
    yard_path: Option<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    events_json_path: Option<String>,
}

fn print_usage() {
    eprintln!("用法: container-yard-aps <vessels.csv> [选项]");
    eprintln!();
    eprintln!("选项:");
    eprintln!("  --config <file>       运行参数 JSON（缺省用内置默认值）");
    eprintln!("  --yard <file>         箱区容量表 CSV（缺省按配置网格生成）");
    eprintln!("  --start <YYYY-MM-DD>  模拟开始日（缺省按船表推导）");
    eprintln!("  --end <YYYY-MM-DD>    模拟结束日（缺省按船表推导）");
    eprintln!("  --events-json <out>   事件流 JSON 输出路径");
}

fn parse_args() -> Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut vessels_path = None;
    let mut config_path = None;
    let mut yard_path = None;
    let mut start = None;
    let mut end = None;
    let mut events_json_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = Some(args.next().context("--config 缺少参数")?),
            "--yard" => yard_path = Some(args.next().context("--yard 缺少参数")?),
            "--start" => {
                let raw = args.next().context("--start 缺少参数")?;
                start = Some(parse_date(&raw)?);
            }
            "--end" => {
                let raw = args.next().context("--end 缺少参数")?;
                end = Some(parse_date(&raw)?);
            }
            "--events-json" => {
                events_json_path = Some(args.next().context("--events-json 缺少参数")?)
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with("--") => bail!("未知选项: {}", other),
            other => {
                if vessels_path.is_some() {
                    bail!("多余的位置参数: {}", other);
                }
                vessels_path = Some(other.to_string());
            }
        }
    }

    let Some(vessels_path) = vessels_path else {
        print_usage();
        bail!("缺少船表文件参数");
    };

    Ok(CliArgs {
        vessels_path,
        config_path,
        yard_path,
        start,
        end,
        events_json_path,
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("日期格式错误（期望 YYYY-MM-DD）: {}", raw))
}

fn run() -> Result<()> {
    let args = parse_args()?;

    let config = match &args.config_path {
        Some(path) => PlanningConfig::from_file(path)?,
        None => PlanningConfig::default(),
    };

    let vessels = VesselImporter::import_from_csv(&args.vessels_path)?;
    let yard = match &args.yard_path {
        Some(path) => YardImporter::import_from_csv(path)?,
        None => config.yard.build_yard(),
    };

    let window = match (args.start, args.end) {
        (Some(start), Some(end)) => Some((start, end)),
        (None, None) => None,
        _ => bail!("--start 与 --end 必须成对给出"),
    };

    let orchestrator = TimelineOrchestrator::new(config);
    let result = orchestrator.run(vessels, yard, window)?;

    // ===== 事件流 =====
    println!("===== 事件流 =====");
    for event in &result.events {
        println!("{}", event);
    }

    // ===== 期末箱组报表 =====
    println!();
    println!("===== 期末箱组报表 =====");
    for report in result.cluster_reports() {
        println!(
            "{:<28} 目标 {:>6}  已放 {:>6}  余量 {:>6}",
            report.cluster_id.to_string(),
            report.target_boxes,
            report.placed_boxes,
            report.remaining_boxes
        );
    }

    let unfinished = result.unfinished_vessels();
    if !unfinished.is_empty() {
        println!();
        println!("===== 未完成服务的船舶 =====");
        for vessel in &unfinished {
            println!(
                "{:<20} 未放余量 {:>6}",
                vessel.master.vessel_name,
                vessel.remaining_boxes()
            );
        }
    }

    if let Some(path) = &args.events_json_path {
        let file = std::fs::File::create(path)
            .with_context(|| format!("事件流输出文件创建失败: {}", path))?;
        serde_json::to_writer_pretty(file, &result.events)?;
        tracing::info!(path = %path, "事件流已写出");
    }

    let summary = result.summary();
    println!();
    println!(
        "运行 {} 完成: {} 艘船, {} 个模拟日, {} 条事件, {} 艘未完成",
        summary.run_id,
        summary.vessel_count,
        summary.day_count,
        summary.event_count,
        summary.unfinished_vessel_count
    );

    Ok(())
}

fn main() {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 船期驱动分配引擎", container_yard_aps::APP_NAME);
    tracing::info!("系统版本: {}", container_yard_aps::VERSION);
    tracing::info!("==================================================");

    if let Err(err) = run() {
        eprintln!("运行失败: {:#}", err);
        std::process::exit(1);
    }
}
