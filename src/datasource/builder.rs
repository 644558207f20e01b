use crate::datasource::accessor::{PooledConnectionFactory, PropertyTable};
use crate::datasource::descriptor::ConfigurationDescriptor;
use crate::datasource::error::DescriptorError;
use crate::datasource::naming;
use crate::datasource::property::PropertyValue;
use crate::datasource::registry::FactoryRegistry;
use indexmap::IndexMap;
use log::{debug, info};

/// Instantiate, configure and decorate the factory a descriptor points at.
pub(crate) fn create_data_source(
    registry: &FactoryRegistry,
    descriptor: &ConfigurationDescriptor,
) -> Result<Box<dyn PooledConnectionFactory>, DescriptorError> {
    let type_name = descriptor.target_type_name();
    let mut result = registry.instantiate(type_name)?;
    let mut all_props = descriptor.properties().clone();
    for (key, value) in descriptor.custom_pool_properties() {
        all_props.insert(key.clone(), PropertyValue::Str(value.clone()));
    }
    let applied = registry.configure(type_name, &mut *result, &all_props)?;
    info!("data source {type_name} created, {applied} of {} properties applied", all_props.len());
    Ok(registry.decorate(result))
}

/// Push every property with a matching setter into `target`, returning how many
/// setters were invoked.
pub(crate) fn configure<T>(
    table: &PropertyTable<T>,
    target: &mut T,
    props: &IndexMap<String, PropertyValue>,
) -> Result<usize, DescriptorError> {
    let mut applied = 0;
    for (property, value) in props {
        if naming::is_skipped(property) {
            debug!("skipping unsupported property {property}");
            continue;
        }
        let Some(setter) = table.find_mutator(&naming::setter_of_property(property)) else {
            debug!("no setter for property {property}, ignored");
            continue;
        };
        if value.is_null() {
            continue;
        }
        setter
            .invoke(target, value)
            .map_err(|e| DescriptorError::configuration(property, format!("{e:#}")))?;
        applied += 1;
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::accessor::Introspect;
    use crate::datasource::pool::{BasicPoolFactory, PgPoolFactory};

    fn props(entries: &[(&str, PropertyValue)]) -> IndexMap<String, PropertyValue> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_configure_coerces_by_parameter_type() {
        let mut pool = PgPoolFactory::default();
        let props = props(&[
            ("maximumPoolSize", "42".into()),
            ("readOnly", "TRUE".into()),
            ("connectionTimeout", PropertyValue::Int(1_000)),
            ("username", "app".into()),
            ("connectionInitSqls", vec!["SET search_path TO app"].into()),
        ]);
        let applied = configure(&PgPoolFactory::property_table(), &mut pool, &props).unwrap();
        assert_eq!(applied, 5);
        assert_eq!(pool.maximum_pool_size(), 42);
        assert!(pool.read_only());
        assert_eq!(pool.connection_timeout(), 1_000);
        assert_eq!(pool.username(), Some("app"));
        assert_eq!(pool.connection_init_sqls(), ["SET search_path TO app".to_string()]);
    }

    #[test]
    fn test_configure_skips_without_error() {
        let mut pool = PgPoolFactory::default();
        let props = props(&[
            ("loginTimeout", PropertyValue::Int(30)),
            ("unknownThing", "x".into()),
            ("username", PropertyValue::Null),
        ]);
        let applied = configure(&PgPoolFactory::property_table(), &mut pool, &props).unwrap();
        assert_eq!(applied, 0);
        assert_eq!(pool.login_timeout(), 0);
        assert_eq!(pool.username(), None);
    }

    #[test]
    fn test_configure_malformed_value() {
        let mut pool = PgPoolFactory::default();
        let props = props(&[("maximumPoolSize", "notanumber".into())]);
        let err = configure(&PgPoolFactory::property_table(), &mut pool, &props).unwrap_err();
        match err {
            DescriptorError::Configuration { property, reason } => {
                assert_eq!(property, "maximumPoolSize");
                assert!(reason.contains("notanumber"));
            }
            e => panic!("unexpected error {e}"),
        }
    }

    #[test]
    fn test_configure_rejected_by_setter() {
        let mut pool = PgPoolFactory::default();
        let props = props(&[("url", "host=localhost frobnicate=1".into())]);
        let err = configure(&PgPoolFactory::property_table(), &mut pool, &props).unwrap_err();
        assert!(matches!(err, DescriptorError::Configuration { ref property, .. } if property == "url"));
    }

    #[test]
    fn test_custom_pool_properties_take_precedence() {
        let registry = FactoryRegistry::with_builtin_pools();
        let mut descriptor = ConfigurationDescriptor::new(BasicPoolFactory::TYPE_NAME)
            .unwrap()
            .with_property("size", "10");
        descriptor
            .custom_pool_properties_mut()
            .insert("size".to_string(), "20".to_string());

        let factory = create_data_source(&registry, &descriptor).unwrap();
        let pool = factory.as_any().downcast_ref::<BasicPoolFactory>().unwrap();
        assert_eq!(pool.size(), 20);
    }

    #[test]
    fn test_unknown_type() {
        let registry = FactoryRegistry::with_builtin_pools();
        let descriptor = ConfigurationDescriptor::new("com.zaxxer.hikari.HikariDataSource").unwrap();
        let err = create_data_source(&registry, &descriptor).unwrap_err();
        assert!(matches!(err, DescriptorError::Instantiation { .. }));
    }
}
