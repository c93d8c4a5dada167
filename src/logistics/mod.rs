//! Logistics - assignment policies and the order pipeline

pub mod assignment;
pub mod order;
pub mod queue;

pub use assignment::{
    AssignmentPolicy, BasicAssignmentPolicy, LoadBalancedAssignmentPolicy,
    NearestAssignmentPolicy, PolicyKind,
};
pub use order::{Order, OrderId, OrderKind, OrderStatus};
pub use queue::OrderQueue;
