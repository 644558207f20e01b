use crate::datasource::accessor::PropertyTable;
use crate::datasource::naming;
use crate::datasource::property::PropertyValue;
use indexmap::IndexMap;
use log::trace;

/// Read every general-typed getter property of `target`.
///
/// Getters returning opaque objects and skipped properties are left out.
pub(crate) fn find_all_getter_properties<T>(
    table: &PropertyTable<T>,
    target: &T,
) -> IndexMap<String, PropertyValue> {
    let mut result = IndexMap::new();
    for (method, getter) in table.accessors() {
        let Some(property) = naming::property_of_getter(method) else {
            continue;
        };
        if !getter.kind().is_general() || naming::is_skipped(&property) {
            trace!("ignoring accessor {method}");
            continue;
        }
        if let Some(value) = getter.invoke(target) {
            result.insert(property, value);
        }
    }
    result
}
