//! 配置
//!
//! 图行为与边表导入的可调参数，支持从 JSON 文件加载

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 对已存在的键再次调用 `add_vertex` 时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexPolicy {
    /// 替换为新顶点（丢弃原有邻接关系），计数器照常递增
    #[default]
    Replace,
    /// 键已存在时不做任何事
    KeepExisting,
}

/// 图配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub vertex_policy: VertexPolicy,
}

impl GraphConfig {
    pub fn with_vertex_policy(mut self, policy: VertexPolicy) -> Self {
        self.vertex_policy = policy;
        self
    }
}

/// 边表导入配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// 首行是否为表头
    pub has_headers: bool,
    /// 字段分隔符（单字节）
    pub delimiter: char,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: ',',
        }
    }
}

impl ImportConfig {
    /// 分隔符转为 csv 所需的单字节
    pub(crate) fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(Error::ConfigError(format!(
                "分隔符必须是 ASCII 字符: {:?}",
                self.delimiter
            )))
        }
    }
}

/// 顶层配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub graph: GraphConfig,
    pub import: ImportConfig,
}

impl Config {
    /// 从 JSON 文件加载，缺省字段取默认值
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)
            .map_err(|e| Error::ConfigError(format!("读取配置 {:?} 失败: {}", path, e)))?;
        Self::from_json_slice(&data)
    }

    /// 从 JSON 字节解析
    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        let config: Config = serde_json::from_slice(data)
            .map_err(|e| Error::ConfigError(format!("解析配置失败: {}", e)))?;
        config.import.delimiter_byte()?;
        Ok(config)
    }
}
