//! adjgraph - 无向带权邻接表图容器
//!
//! 以任意可哈希键标记顶点，支持：
//! - 顶点插入与按键查找
//! - 对称的带权边插入（缺失端点自动创建）
//! - 按插入顺序遍历顶点
//! - 读写锁保护的共享图句柄
//! - 从分隔文本或 JSON Lines 导入边表

pub mod config;
pub mod error;
pub mod graph;
pub mod import;

// 重导出常用类型
pub use config::{Config, GraphConfig, ImportConfig, VertexPolicy};
pub use error::{Error, Result};
pub use graph::{Graph, GraphStats, SharedGraph, Vertex};
pub use import::{EdgeListImporter, ImportStats};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
