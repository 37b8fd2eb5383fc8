mod allocation;
mod resource;

pub use allocation::{AllocationFilter, NewAllocation, ResourceAllocation};
pub use resource::{NewResource, Resource, ResourcePatch};
