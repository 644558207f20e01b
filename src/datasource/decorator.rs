use crate::datasource::accessor::PooledConnectionFactory;

/// Post-construction hook applied to every freshly built factory.
///
/// A decorator may return the instance it was given, a modified one, or a wrapper
/// exposing the same capability.
pub trait FactoryDecorator: Send + Sync {
    fn decorate(&self, factory: Box<dyn PooledConnectionFactory>) -> Box<dyn PooledConnectionFactory>;
}

impl<F> FactoryDecorator for F
where
    F: Fn(Box<dyn PooledConnectionFactory>) -> Box<dyn PooledConnectionFactory> + Send + Sync,
{
    fn decorate(&self, factory: Box<dyn PooledConnectionFactory>) -> Box<dyn PooledConnectionFactory> {
        self(factory)
    }
}
