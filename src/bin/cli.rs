//! adjgraph 命令行演示工具
//!
//! 构建示例图或导入边表，并打印每个顶点的邻接情况

use adjgraph::{Config, EdgeListImporter, Graph, VertexPolicy};
use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::hash::Hash;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "adjgraph-cli")]
#[command(about = "adjgraph 无向带权图演示工具")]
struct Args {
    /// 边表文件（缺省时构建内置示例图）
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 输入格式: csv, jsonl
    #[arg(short, long, default_value = "csv")]
    format: String,

    /// JSON 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 已存在的顶点不再替换
    #[arg(long)]
    keep_existing: bool,

    /// 边表首行不是表头
    #[arg(long)]
    no_headers: bool,

    /// 字段分隔符
    #[arg(short, long)]
    delimiter: Option<char>,

    /// 以 JSON 输出统计与整张图
    #[arg(long)]
    json: bool,

    /// 日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&args)?;
    info!(?config, "配置已加载");

    match &args.input {
        None => {
            println!("Graph Start!");
            let mut graph: Graph<u32, i64> = Graph::with_config(config.graph.clone());
            graph.add_edge(0, 1, 2);
            graph.add_edge(2, 3, 2);
            graph.add_edge(2, 1, 3);
            report(&graph, args.json)
        }
        Some(path) => {
            let mut graph: Graph<String, f64> = Graph::with_config(config.graph.clone());
            let importer = EdgeListImporter::with_config(config.import.clone());
            let stats = match args.format.as_str() {
                "csv" => importer.import_path(&mut graph, path),
                "jsonl" => {
                    let file =
                        File::open(path).with_context(|| format!("无法打开 {:?}", path))?;
                    importer.import_jsonl(&mut graph, file)
                }
                other => bail!("不支持的格式: {}", other),
            }
            .with_context(|| format!("导入 {:?} 失败", path))?;

            if let Some(header) = &stats.header {
                eprintln!("首行按表头跳过: {:?}（无表头文件请加 --no-headers）", header);
            }
            if !args.json {
                println!(
                    "导入完成: {} 条边, {} 个顶点, {} 行错误, 耗时 {} ms",
                    stats.edges_imported, stats.vertices_created, stats.errors, stats.duration_ms
                );
            }
            report(&graph, args.json)
        }
    }
}

/// 合并配置文件与命令行参数，命令行优先
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    if args.keep_existing {
        config.graph.vertex_policy = VertexPolicy::KeepExisting;
    }
    if args.no_headers {
        config.import.has_headers = false;
    }
    if let Some(delimiter) = args.delimiter {
        config.import.delimiter = delimiter;
    }
    Ok(config)
}

fn report<K, W>(graph: &Graph<K, W>, json: bool) -> anyhow::Result<()>
where
    K: Eq + Hash + Clone + fmt::Debug + fmt::Display + Serialize,
    W: Clone + Serialize,
{
    if json {
        let output = serde_json::json!({
            "stats": graph.stats(),
            "graph": graph,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    // 按键查找
    for key in graph.get_vertices() {
        if let Some(vertex) = graph.get_vertex(key) {
            println!("{}", vertex);
        }
    }
    // 直接遍历
    for vertex in graph {
        println!("{}", vertex);
    }

    let stats = graph.stats();
    println!(
        "顶点数: {} (计数器 {}), 边数: {}",
        stats.distinct_vertices, stats.vertex_count, stats.edge_count
    );
    Ok(())
}
