//! 线程安全的图句柄
//!
//! 整张图由一把读写锁保护，边的两侧镜像记录在同一次写锁内完成

use super::graph::{Graph, GraphStats};
use crate::error::{Error, Result};
use parking_lot::RwLock;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// 可跨线程共享的图
pub struct SharedGraph<K, W = i64> {
    inner: Arc<RwLock<Graph<K, W>>>,
}

impl<K, W> Clone for SharedGraph<K, W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, W> SharedGraph<K, W>
where
    K: Eq + Hash + Clone + fmt::Debug,
    W: Clone,
{
    /// 创建空的共享图
    pub fn new() -> Self {
        Self::from_graph(Graph::new())
    }

    /// 包装已有的图
    pub fn from_graph(graph: Graph<K, W>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// 添加顶点
    pub fn add_vertex(&self, key: K) {
        self.inner.write().add_vertex(key);
    }

    /// 添加无向边
    pub fn add_edge(&self, u: K, v: K, weight: W) {
        self.inner.write().add_edge(u, v, weight);
    }

    /// 以默认权重添加无向边
    pub fn add_unweighted_edge(&self, u: K, v: K)
    where
        W: Default,
    {
        self.inner.write().add_unweighted_edge(u, v);
    }

    /// 是否包含顶点
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.read().contains_key(key)
    }

    /// 获取 `u` 与 `v` 之间的边权重
    pub fn get_weight(&self, u: &K, v: &K) -> Result<W> {
        self.inner.read().get_weight(u, v)
    }

    /// 获取顶点计数器
    pub fn vertex_count(&self) -> usize {
        self.inner.read().vertex_count()
    }

    /// 不同顶点的数量
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// 顶点键快照
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().get_vertices().cloned().collect()
    }

    /// 获取统计快照
    pub fn stats(&self) -> GraphStats {
        self.inner.read().stats()
    }

    /// 在读锁内访问整张图
    pub fn read<R>(&self, f: impl FnOnce(&Graph<K, W>) -> R) -> R {
        let guard = self.inner.read();
        f(&*guard)
    }

    /// 取回内部的图，仍有其他句柄存活时失败
    pub fn into_inner(self) -> Result<Graph<K, W>> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|arc| Error::StillShared(Arc::strong_count(&arc) - 1))
    }
}

impl<K, W> Default for SharedGraph<K, W>
where
    K: Eq + Hash + Clone + fmt::Debug,
    W: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
