//! 顶点定义
//!
//! 顶点持有自身的键，以及邻居键到边权重的映射

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::hash::Hash;

/// 顶点
///
/// 邻接表只记录本端视角：无向边 (u, v, w) 在 u 与 v 上各存一条镜像记录。
/// 邻居键必须同时是所属图中的顶点键，这一点由 [`Graph`](super::Graph) 维护。
#[derive(Debug, Clone, Serialize)]
pub struct Vertex<K, W> {
    /// 顶点键
    key: K,
    /// 邻居键 -> 边权重
    neighbors: IndexMap<K, W>,
}

impl<K, W> Vertex<K, W>
where
    K: Eq + Hash + Clone,
    W: Clone,
{
    /// 创建新顶点
    pub fn new(key: K) -> Self {
        Self {
            key,
            neighbors: IndexMap::new(),
        }
    }

    /// 添加或覆盖到 `neighbor` 的边权重
    pub fn add_neighbor(&mut self, neighbor: K, weight: W) {
        self.neighbors.insert(neighbor, weight);
    }

    /// 以默认权重添加邻居
    pub fn add_unweighted_neighbor(&mut self, neighbor: K)
    where
        W: Default,
    {
        self.add_neighbor(neighbor, W::default());
    }

    /// 获取所有邻居键
    pub fn connections(&self) -> impl Iterator<Item = &K> + '_ {
        self.neighbors.keys()
    }

    /// 获取所有 (邻居, 权重)
    pub fn weights(&self) -> impl Iterator<Item = (&K, &W)> + '_ {
        self.neighbors.iter()
    }

    /// 获取到 `neighbor` 的边权重
    ///
    /// 从未建立的邻接关系返回 [`Error::EdgeNotFound`]，不会回落到默认值。
    pub fn get_weight(&self, neighbor: &K) -> Result<W>
    where
        K: fmt::Debug,
    {
        self.neighbors.get(neighbor).cloned().ok_or_else(|| {
            Error::EdgeNotFound(format!("{:?} -> {:?}", self.key, neighbor))
        })
    }

    /// 是否与 `neighbor` 相邻
    pub fn is_connected_to(&self, neighbor: &K) -> bool {
        self.neighbors.contains_key(neighbor)
    }

    /// 获取顶点键
    pub fn key(&self) -> &K {
        &self.key
    }

    /// 邻居数量（自环计一次）
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

impl<K, W> fmt::Display for Vertex<K, W>
where
    K: fmt::Display + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&K> = self.neighbors.keys().collect();
        write!(f, "{} connected to {:?}", self.key, keys)
    }
}
