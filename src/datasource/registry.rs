//! Named constructors and property tables of the known factory types.

use crate::datasource::accessor::{Introspect, PooledConnectionFactory};
use crate::datasource::decorator::FactoryDecorator;
use crate::datasource::error::DescriptorError;
use crate::datasource::pool::{BasicPoolFactory, PgPoolFactory};
use crate::datasource::property::PropertyValue;
use crate::datasource::{builder, extractor};
use indexmap::IndexMap;
use log::warn;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

type Props = IndexMap<String, PropertyValue>;
type Constructor = Box<dyn Fn() -> Box<dyn PooledConnectionFactory> + Send + Sync>;
type Extract = Box<dyn Fn(&dyn PooledConnectionFactory) -> Result<Props, DescriptorError> + Send + Sync>;
type Configure =
    Box<dyn Fn(&mut dyn PooledConnectionFactory, &Props) -> Result<usize, DescriptorError> + Send + Sync>;

struct Registration {
    type_id: TypeId,
    construct: Constructor,
    extract: Extract,
    configure: Configure,
}

/// Registry of factory types that descriptors can be built into and extracted from.
#[derive(Default)]
pub struct FactoryRegistry {
    registrations: HashMap<String, Registration>,
    names: HashMap<TypeId, String>,
    decorators: Vec<Box<dyn FactoryDecorator>>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// registry holding the pools shipped with this crate
    pub fn with_builtin_pools() -> Self {
        let mut registry = Self::new();
        registry
            .register::<PgPoolFactory>(PgPoolFactory::TYPE_NAME)
            .register::<BasicPoolFactory>(BasicPoolFactory::TYPE_NAME);
        registry
    }

    /// Register `T` under `type_name`; its property table is built once here.
    pub fn register<T: Introspect>(&mut self, type_name: impl Into<String>) -> &mut Self {
        let type_name = type_name.into();
        let table = Arc::new(T::property_table());

        let extract_table = table.clone();
        let extract_name = type_name.clone();
        let extract: Extract = Box::new(move |factory: &dyn PooledConnectionFactory| {
            let target = factory
                .as_any()
                .downcast_ref::<T>()
                .ok_or_else(|| access_error::<T>(&extract_name))?;
            Ok(extractor::find_all_getter_properties(&*extract_table, target))
        });

        let configure_name = type_name.clone();
        let configure: Configure = Box::new(move |factory: &mut dyn PooledConnectionFactory, props: &Props| {
            let target = factory
                .as_any_mut()
                .downcast_mut::<T>()
                .ok_or_else(|| access_error::<T>(&configure_name))?;
            builder::configure(&*table, target, props)
        });

        let registration = Registration {
            type_id: TypeId::of::<T>(),
            construct: Box::new(|| Box::new(T::default()) as Box<dyn PooledConnectionFactory>),
            extract,
            configure,
        };
        if let Some(replaced) = self.registrations.insert(type_name.clone(), registration) {
            warn!("data source type {type_name} registered twice, previous registration replaced");
            self.names.remove(&replaced.type_id);
        }
        self.names.insert(TypeId::of::<T>(), type_name);
        self
    }

    /// Append a decorator; decorators run in registration order.
    pub fn add_decorator(&mut self, decorator: impl FactoryDecorator + 'static) -> &mut Self {
        self.decorators.push(Box::new(decorator));
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.registrations.contains_key(type_name)
    }

    /// name `factory`'s concrete type was registered under
    pub fn type_name_of(&self, factory: &dyn PooledConnectionFactory) -> Option<&str> {
        self.names.get(&factory.as_any().type_id()).map(String::as_str)
    }

    pub(crate) fn instantiate(
        &self,
        type_name: &str,
    ) -> Result<Box<dyn PooledConnectionFactory>, DescriptorError> {
        self.registrations
            .get(type_name)
            .map(|registration| (registration.construct)())
            .ok_or_else(|| unregistered(type_name))
    }

    /// number of setters invoked
    pub(crate) fn configure(
        &self,
        type_name: &str,
        factory: &mut dyn PooledConnectionFactory,
        props: &Props,
    ) -> Result<usize, DescriptorError> {
        let registration = self
            .registrations
            .get(type_name)
            .ok_or_else(|| unregistered(type_name))?;
        (registration.configure)(factory, props)
    }

    pub(crate) fn extract(
        &self,
        factory: &dyn PooledConnectionFactory,
    ) -> Result<(String, Props), DescriptorError> {
        let type_name = self.type_name_of(factory).ok_or(DescriptorError::Unregistered)?;
        let registration = self
            .registrations
            .get(type_name)
            .ok_or(DescriptorError::Unregistered)?;
        let props = (registration.extract)(factory)?;
        Ok((type_name.to_string(), props))
    }

    pub(crate) fn decorate(
        &self,
        factory: Box<dyn PooledConnectionFactory>,
    ) -> Box<dyn PooledConnectionFactory> {
        self.decorators
            .iter()
            .fold(factory, |factory, decorator| decorator.decorate(factory))
    }
}

fn access_error<T>(type_name: &str) -> DescriptorError {
    DescriptorError::Access {
        type_name: type_name.to_string(),
        expected: std::any::type_name::<T>().to_string(),
    }
}

fn unregistered(type_name: &str) -> DescriptorError {
    DescriptorError::Instantiation {
        type_name: type_name.to_string(),
        reason: "no such type is registered".to_string(),
    }
}
