//! Data source configuration: capture a pool factory as a property map and rebuild it.

pub mod accessor;
mod builder;
pub mod decorator;
pub mod descriptor;
pub mod error;
mod extractor;
pub mod naming;
pub mod pool;
pub mod property;
pub mod registry;

pub use accessor::{Getter, Introspect, PooledConnectionFactory, PropertyTable, Setter};
pub use decorator::FactoryDecorator;
pub use descriptor::{ConfigurationDescriptor, CUSTOM_POOL_PROPS_KEY};
pub use error::DescriptorError;
pub use property::{PropertyValue, ValueKind};
pub use registry::FactoryRegistry;
