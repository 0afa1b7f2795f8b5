//! 图数据结构
//!
//! 以顶点键为索引的无向带权邻接表

use super::vertex::Vertex;
use crate::config::{GraphConfig, VertexPolicy};
use crate::error::{Error, Result};
use indexmap::map::Values;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace, warn};

/// 图统计快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphStats {
    /// 顶点计数器
    pub vertex_count: usize,
    /// 实际不同顶点数
    pub distinct_vertices: usize,
    /// 无向边数（自环计一次）
    pub edge_count: usize,
    /// 自环数
    pub self_loops: usize,
}

/// 无向带权图
///
/// 所有顶点由图独占，外部只能拿到共享引用。边是对称的：
/// `add_edge(u, v, w)` 之后 u 的邻接表里有 `v -> w`，v 的邻接表里有 `u -> w`。
///
/// 遍历顺序为顶点的首次插入顺序。遍历期间无法修改图（借用检查保证）。
#[derive(Debug, Clone, Serialize)]
pub struct Graph<K, W = i64> {
    /// 创建行为配置
    #[serde(skip)]
    config: GraphConfig,
    /// 顶点计数器
    vertex_count: usize,
    /// 顶点键 -> 顶点
    vertices: IndexMap<K, Vertex<K, W>>,
}

impl<K, W> Graph<K, W>
where
    K: Eq + Hash + Clone + fmt::Debug,
    W: Clone,
{
    /// 创建空图
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// 使用给定配置创建空图
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            vertex_count: 0,
            vertices: IndexMap::new(),
        }
    }

    /// 获取配置
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点
    ///
    /// `VertexPolicy::Replace` 下，已存在的键会被替换为新的空顶点，原有邻接关系被丢弃，
    /// 且计数器仍然递增，此后 `vertex_count()` 会大于 `len()`。
    /// 被丢弃的一侧不会从邻居那里撤销，对端仍保留指向该键的记录。
    /// `VertexPolicy::KeepExisting` 下已存在的键不做任何处理。
    pub fn add_vertex(&mut self, key: K) {
        if self.config.vertex_policy == VertexPolicy::KeepExisting
            && self.vertices.contains_key(&key)
        {
            trace!(key = ?key, "顶点已存在，保留原顶点");
            return;
        }

        self.vertex_count += 1;
        let vertex = Vertex::new(key.clone());
        match self.vertices.insert(key, vertex) {
            Some(old) if old.degree() > 0 => {
                warn!(key = ?old.key(), dropped = old.degree(), "替换已存在顶点，原有边被丢弃");
            }
            Some(old) => debug!(key = ?old.key(), "替换已存在顶点"),
            None => debug!(count = self.vertex_count, "创建顶点"),
        }
    }

    /// 获取顶点
    pub fn get_vertex(&self, key: &K) -> Option<&Vertex<K, W>> {
        self.vertices.get(key)
    }

    /// 是否包含顶点
    pub fn contains_key(&self, key: &K) -> bool {
        self.vertices.contains_key(key)
    }

    /// 获取所有顶点键
    pub fn get_vertices(&self) -> impl Iterator<Item = &K> + '_ {
        self.vertices.keys()
    }

    /// 遍历所有顶点
    pub fn iter(&self) -> Values<'_, K, Vertex<K, W>> {
        self.vertices.values()
    }

    /// 获取顶点计数器
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// 不同顶点的数量
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ==================== 边操作 ====================

    /// 添加无向边
    ///
    /// 先确保 `u`、再确保 `v` 存在（缺失则自动创建），然后写入两侧的镜像记录。
    /// 重复添加同一条边会覆盖权重。`u == v` 时生成自环。
    pub fn add_edge(&mut self, u: K, v: K, weight: W) {
        if !self.vertices.contains_key(&u) {
            self.add_vertex(u.clone());
        }
        if !self.vertices.contains_key(&v) {
            self.add_vertex(v.clone());
        }

        trace!(u = ?u, v = ?v, "添加边");

        // 两端此时必定存在
        self.vertices[&u].add_neighbor(v.clone(), weight.clone());
        self.vertices[&v].add_neighbor(u, weight);
    }

    /// 以默认权重添加无向边
    pub fn add_unweighted_edge(&mut self, u: K, v: K)
    where
        W: Default,
    {
        self.add_edge(u, v, W::default());
    }

    /// 获取 `u` 与 `v` 之间的边权重
    pub fn get_weight(&self, u: &K, v: &K) -> Result<W> {
        self.get_vertex(u)
            .ok_or_else(|| Error::VertexNotFound(format!("{:?}", u)))?
            .get_weight(v)
    }

    /// 无向边数量（自环计一次）
    ///
    /// 只统计两侧镜像记录都在的边，`Replace` 替换顶点后残留的单侧记录不计入。
    pub fn edge_count(&self) -> usize {
        self.vertices
            .values()
            .enumerate()
            .flat_map(|(i, vertex)| vertex.connections().map(move |n| (i, vertex, n)))
            .filter(|&(i, vertex, neighbor)| {
                match self.vertices.get_full(neighbor) {
                    Some((j, _, other)) => j >= i && other.is_connected_to(vertex.key()),
                    None => false,
                }
            })
            .count()
    }

    fn self_loop_count(&self) -> usize {
        self.vertices
            .values()
            .filter(|v| v.is_connected_to(v.key()))
            .count()
    }

    /// 获取统计快照
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            vertex_count: self.vertex_count,
            distinct_vertices: self.vertices.len(),
            edge_count: self.edge_count(),
            self_loops: self.self_loop_count(),
        }
    }
}

impl<K, W> Default for Graph<K, W>
where
    K: Eq + Hash + Clone + fmt::Debug,
    W: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, W> IntoIterator for &'a Graph<K, W>
where
    K: Eq + Hash + Clone + fmt::Debug,
    W: Clone,
{
    type Item = &'a Vertex<K, W>;
    type IntoIter = Values<'a, K, Vertex<K, W>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, W> Extend<(K, K, W)> for Graph<K, W>
where
    K: Eq + Hash + Clone + fmt::Debug,
    W: Clone,
{
    fn extend<I: IntoIterator<Item = (K, K, W)>>(&mut self, iter: I) {
        for (u, v, weight) in iter {
            self.add_edge(u, v, weight);
        }
    }
}

impl<K, W> FromIterator<(K, K, W)> for Graph<K, W>
where
    K: Eq + Hash + Clone + fmt::Debug,
    W: Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, K, W)>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn sample_graph() -> Graph<u32, i64> {
        let mut graph = Graph::new();
        graph.add_edge(0, 1, 2);
        graph.add_edge(2, 3, 2);
        graph.add_edge(2, 1, 3);
        graph
    }

    #[test]
    fn test_graph_basic() {
        let graph = sample_graph();

        assert_eq!(graph.get_vertices().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.len(), 4);

        assert_eq!(graph.get_vertex(&1).unwrap().get_weight(&0).unwrap(), 2);
        assert_eq!(graph.get_vertex(&1).unwrap().get_weight(&2).unwrap(), 3);
        assert_eq!(graph.get_vertex(&2).unwrap().get_weight(&3).unwrap(), 2);
        assert_eq!(
            graph.get_vertex(&0).unwrap().connections().copied().collect::<Vec<_>>(),
            vec![1]
        );
    }

    #[test]
    fn test_missing_edge() {
        let graph = sample_graph();

        let err = graph.get_vertex(&0).unwrap().get_weight(&3).unwrap_err();
        assert!(matches!(err, Error::EdgeNotFound(_)));

        assert!(matches!(graph.get_weight(&9, &0), Err(Error::VertexNotFound(_))));
        assert!(matches!(graph.get_weight(&0, &3), Err(Error::EdgeNotFound(_))));
    }

    #[test]
    fn test_get_vertex_absent() {
        let graph = sample_graph();

        assert!(graph.get_vertex(&42).is_none());
        assert!(!graph.contains_key(&42));
        assert!(graph.contains_key(&3));
    }

    #[test]
    fn test_edge_idempotent() {
        let mut graph = sample_graph();
        let before = graph.stats();

        graph.add_edge(2, 1, 3);

        assert_eq!(graph.stats(), before);
        assert_eq!(graph.get_weight(&1, &2).unwrap(), 3);
    }

    #[test]
    fn test_edge_overwrite() {
        let mut graph = sample_graph();
        graph.add_edge(1, 0, 10);

        assert_eq!(graph.get_weight(&0, &1).unwrap(), 10);
        assert_eq!(graph.get_weight(&1, &0).unwrap(), 10);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_self_loop() {
        let mut graph: Graph<&str, i64> = Graph::new();
        graph.add_edge("x", "x", 4);

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.vertex_count(), 1);

        let x = graph.get_vertex(&"x").unwrap();
        assert_eq!(x.degree(), 1);
        assert_eq!(x.get_weight(&"x").unwrap(), 4);

        let stats = graph.stats();
        assert_eq!(stats.edge_count, 1);
        assert_eq!(stats.self_loops, 1);
    }

    #[test]
    fn test_unweighted_edge() {
        let mut graph: Graph<char, f64> = Graph::new();
        graph.add_unweighted_edge('a', 'b');

        assert_eq!(graph.get_weight(&'a', &'b').unwrap(), 0.0);
        assert_eq!(graph.get_weight(&'b', &'a').unwrap(), 0.0);
    }

    #[test]
    fn test_replace_policy_quirk() {
        let mut graph = sample_graph();
        graph.add_vertex(1);

        // 计数器多计一次，且 1 的邻接关系被清空
        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.get_vertex(&1).unwrap().degree(), 0);
        // 对端保留原记录
        assert_eq!(graph.get_weight(&0, &1).unwrap(), 2);
        assert!(graph.get_weight(&1, &0).unwrap_err().is_not_found());
        // 原插入位置不变
        assert_eq!(graph.get_vertices().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);

        // 只剩 2-3 两侧完整
        let stats = graph.stats();
        assert_eq!(stats.edge_count, 1);
        assert_eq!(stats.vertex_count, 5);
        assert_eq!(stats.distinct_vertices, 4);
    }

    #[test]
    fn test_replace_leaves_no_symmetric_edge() {
        let mut graph: Graph<u32, i64> = Graph::new();
        graph.add_edge(0, 1, 2);
        graph.add_edge(2, 1, 3);
        graph.add_vertex(1);

        assert_eq!(graph.get_weight(&0, &1).unwrap(), 2);
        assert!(graph.get_weight(&1, &0).is_err());
        assert_eq!(graph.edge_count(), 0);

        graph.add_edge(1, 0, 5);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_keep_existing_policy() {
        let config = GraphConfig::default().with_vertex_policy(VertexPolicy::KeepExisting);
        let mut graph: Graph<u32, i64> = Graph::with_config(config);
        graph.add_edge(0, 1, 2);
        graph.add_vertex(1);
        graph.add_vertex(1);
        graph.add_vertex(5);

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.get_weight(&1, &0).unwrap(), 2);
    }

    #[test]
    fn test_add_vertex_counts() {
        let mut graph: Graph<u32, i64> = Graph::new();
        for i in 0..6 {
            graph.add_vertex(i);
        }

        assert_eq!(graph.vertex_count(), 6);
        assert!(graph.iter().all(|v| v.degree() == 0));
    }

    #[test]
    fn test_iteration() {
        let empty: Graph<u32, i64> = Graph::new();
        assert!(empty.is_empty());
        assert_eq!(empty.iter().count(), 0);

        let graph = sample_graph();
        let first: Vec<u32> = graph.iter().map(|v| *v.key()).collect();
        let second: Vec<u32> = (&graph).into_iter().map(|v| *v.key()).collect();

        assert_eq!(first, vec![0, 1, 2, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_iterator() {
        let graph: Graph<&str, i64> = vec![("a", "b", 1), ("b", "c", 2)].into_iter().collect();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.get_weight(&"c", &"b").unwrap(), 2);
    }

    #[test]
    fn test_random_edges_symmetric() {
        let mut rng = rand::thread_rng();
        let mut graph: Graph<u16, i64> = Graph::new();
        let mut keys = std::collections::HashSet::new();

        for _ in 0..500 {
            let u = rng.gen_range(0..50u16);
            let v = rng.gen_range(0..50u16);
            let w = rng.gen_range(-100..100i64);
            keys.insert(u);
            keys.insert(v);

            graph.add_edge(u, v, w);
            assert_eq!(graph.get_weight(&u, &v).unwrap(), w);
            assert_eq!(graph.get_weight(&v, &u).unwrap(), w);
        }

        assert_eq!(graph.vertex_count(), keys.len());
        assert_eq!(graph.len(), keys.len());

        for vertex in &graph {
            for (neighbor, weight) in vertex.weights() {
                assert!(graph.contains_key(neighbor));
                assert_eq!(&graph.get_weight(neighbor, vertex.key()).unwrap(), weight);
            }
        }
    }

    #[test]
    fn test_serialize_json() {
        let graph = sample_graph();
        let json = serde_json::to_value(&graph).unwrap();

        assert_eq!(json["vertex_count"], 4);
        assert_eq!(json["vertices"]["2"]["neighbors"]["1"], 3);
    }
}
