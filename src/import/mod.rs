//! 数据导入模块
//!
//! 支持从分隔文本（`u,v[,w]`）或 JSON Lines 批量导入边表

use crate::config::ImportConfig;
use crate::error::{Error, Result};
use crate::graph::Graph;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::hash::Hash;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::{info, warn};

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub vertices_created: usize,
    pub edges_imported: usize,
    pub errors: usize,
    pub duration_ms: u64,
    /// 被当作表头跳过的首行
    pub header: Option<Vec<String>>,
}

/// 边记录（JSON 格式）
#[derive(Debug, Deserialize)]
struct EdgeRecord<K, W> {
    from: K,
    to: K,
    #[serde(default)]
    weight: Option<W>,
}

/// 边表导入器
///
/// 导入中途遇到 IO 错误时返回 [`Error::IoError`]，此前已读入的边保留在图中。
#[derive(Debug, Clone, Default)]
pub struct EdgeListImporter {
    config: ImportConfig,
}

impl EdgeListImporter {
    /// 创建导入器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用给定配置创建导入器
    pub fn with_config(config: ImportConfig) -> Self {
        Self { config }
    }

    /// 从分隔文本文件导入
    pub fn import_path<K, W, P>(&self, graph: &mut Graph<K, W>, path: P) -> Result<ImportStats>
    where
        K: Eq + Hash + Clone + fmt::Debug + FromStr,
        W: Clone + Default + FromStr,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path)?;
        info!(path = ?path, "开始导入边表");
        self.import_reader(graph, file)
    }

    /// 从任意读取源导入分隔文本
    ///
    /// 每行 `u,v[,w]`，缺省权重取 `W::default()`，`#` 开头的行视为注释。
    /// 格式错误的行计入 `errors` 并跳过，底层 IO 错误直接返回。
    /// 开启 `has_headers` 时首行不导入，其内容记入 `ImportStats::header`。
    pub fn import_reader<K, W, R>(&self, graph: &mut Graph<K, W>, reader: R) -> Result<ImportStats>
    where
        K: Eq + Hash + Clone + fmt::Debug + FromStr,
        W: Clone + Default + FromStr,
        R: Read,
    {
        let start = Instant::now();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.config.has_headers)
            .delimiter(self.config.delimiter_byte()?)
            .comment(Some(b'#'))
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let before = graph.len();
        let mut stats = ImportStats::default();

        if self.config.has_headers {
            let header = reader.headers().map_err(csv_io_error)?;
            if !header.is_empty() {
                warn!(header = ?header, "首行按表头处理，不作为边导入");
                stats.header = Some(header.iter().map(str::to_string).collect());
            }
        }

        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(csv_io_error(e)),
                Err(e) => {
                    warn!(error = %e, "跳过无法解析的行");
                    stats.errors += 1;
                    continue;
                }
            };

            match parse_edge::<K, W>(&record) {
                Ok((u, v, weight)) => {
                    graph.add_edge(u, v, weight);
                    stats.edges_imported += 1;
                }
                Err(e) => {
                    let line = record.position().map(|p| p.line()).unwrap_or(0);
                    warn!(line, error = %e, "跳过格式错误的行");
                    stats.errors += 1;
                }
            }
        }

        stats.vertices_created = graph.len() - before;
        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            edges = stats.edges_imported,
            vertices = stats.vertices_created,
            errors = stats.errors,
            "边表导入完成"
        );
        Ok(stats)
    }

    /// 从 JSON Lines 读取源导入
    ///
    /// 每行 `{"from": .., "to": .., "weight": ..}`，`weight` 可省略。
    pub fn import_jsonl<K, W, R>(&self, graph: &mut Graph<K, W>, reader: R) -> Result<ImportStats>
    where
        K: Eq + Hash + Clone + fmt::Debug + DeserializeOwned,
        W: Clone + Default + DeserializeOwned,
        R: Read,
    {
        let start = Instant::now();
        let before = graph.len();
        let mut stats = ImportStats::default();

        for (index, line) in BufReader::new(reader).split(b'\n').enumerate() {
            let line = line?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            match serde_json::from_slice::<EdgeRecord<K, W>>(&line) {
                Ok(record) => {
                    graph.add_edge(record.from, record.to, record.weight.unwrap_or_default());
                    stats.edges_imported += 1;
                }
                Err(e) => {
                    warn!(line = index + 1, error = %e, "跳过格式错误的 JSON 行");
                    stats.errors += 1;
                }
            }
        }

        stats.vertices_created = graph.len() - before;
        stats.duration_ms = start.elapsed().as_millis() as u64;
        Ok(stats)
    }
}

/// csv 的 IO 错误还原为 [`Error::IoError`]，其余错误归为导入错误
fn csv_io_error(e: csv::Error) -> Error {
    if e.is_io_error() {
        Error::IoError(io::Error::from(e))
    } else {
        Error::ImportError(format!("读取边表失败: {}", e))
    }
}

/// 解析单行边记录
fn parse_edge<K, W>(record: &csv::StringRecord) -> Result<(K, K, W)>
where
    K: FromStr,
    W: Default + FromStr,
{
    if record.len() < 2 {
        return Err(Error::ImportError(format!(
            "至少需要 2 列，实际为 {} 列",
            record.len()
        )));
    }

    let u = parse_field::<K>(&record[0], "起点")?;
    let v = parse_field::<K>(&record[1], "终点")?;
    let weight = match record.get(2) {
        Some(field) if !field.is_empty() => parse_field::<W>(field, "权重")?,
        _ => W::default(),
    };

    Ok((u, v, weight))
}

fn parse_field<T: FromStr>(field: &str, what: &str) -> Result<T> {
    field
        .parse::<T>()
        .map_err(|_| Error::ImportError(format!("无法解析{}: {:?}", what, field)))
}
