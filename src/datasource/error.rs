use derive_more::{Display, Error};

/// Errors raised while extracting or building a data source configuration
#[derive(Debug, Display, Error)]
#[non_exhaustive]
pub enum DescriptorError {
    #[display("data source class name must not be empty")]
    EmptyTypeName,
    #[display("cannot instantiate data source `{type_name}`, because {reason}")]
    Instantiation { type_name: String, reason: String },
    #[display("Incorrect configuration item: the property {property} of the dataSource, because {reason}")]
    Configuration { property: String, reason: String },
    #[display("data source registered as `{type_name}` is not an instance of `{expected}`")]
    Access { type_name: String, expected: String },
    #[display("data source instance has no registered property table")]
    Unregistered,
}

impl DescriptorError {
    pub(crate) fn configuration(property: &str, reason: impl ToString) -> Self {
        Self::Configuration {
            property: property.to_string(),
            reason: reason.to_string(),
        }
    }
}
