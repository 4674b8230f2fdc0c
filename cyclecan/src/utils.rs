mod node_pool;
mod pending_list;

pub use node_pool::{MAX_CAPACITY, Node, NodeIdx, NodePool};
pub use pending_list::{Iter, PendingList};
