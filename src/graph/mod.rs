//! 图核心模块
//!
//! 定义顶点、图以及线程安全的共享图句柄

mod graph;
mod shared;
mod vertex;

pub use graph::{Graph, GraphStats};
pub use shared::SharedGraph;
pub use vertex::Vertex;
