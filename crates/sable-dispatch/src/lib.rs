//! Virtual, interface and special method dispatch over a class universe.

#![forbid(unsafe_code)]

mod config;
mod error;
mod resolver;

pub use config::{DiamondPolicy, DispatchConfig};
pub use error::{ResolveError, Result};
pub use resolver::{
    can_dispatch, partition_dispatches_in_classes, resolve_abstract_dispatch,
    resolve_all_dispatches, resolve_all_dispatches_in_classes, resolve_concrete_dispatch,
    resolve_concrete_dispatch_with, resolve_special_dispatch, DispatchPartition,
};
