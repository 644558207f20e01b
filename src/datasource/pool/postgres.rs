use crate::datasource::accessor::{Getter, Introspect, PooledConnectionFactory, PropertyTable, Setter};
use crate::datasource::property::PropertyValue;
use anyhow::{bail, ensure, Context};
use indexmap::IndexMap;
use std::any::Any;
use std::time::Duration;

const DEFAULT_POOL_SIZE: i32 = 10;
const DEFAULT_CONNECTION_TIMEOUT_MILLIS: i64 = 30_000;
const DEFAULT_IDLE_TIMEOUT_MILLIS: i64 = 600_000;

/// Settings of a PostgreSQL connection pool.
///
/// Building one performs no I/O; [`PgPoolFactory::pg_config`] hands the connection
/// settings to `tokio_postgres` when the pool is actually opened.
#[derive(Debug, Clone)]
pub struct PgPoolFactory {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    maximum_pool_size: i32,
    minimum_idle: i32,
    /// milliseconds
    connection_timeout: i64,
    /// milliseconds
    idle_timeout: i64,
    read_only: bool,
    auto_commit: bool,
    /// statements run on every new connection
    connection_init_sqls: Vec<String>,
    /// seconds
    login_timeout: i32,
    /// server run-time parameters sent with every connection
    data_source_properties: IndexMap<String, String>,
}

impl Default for PgPoolFactory {
    fn default() -> Self {
        Self {
            url: None,
            username: None,
            password: None,
            maximum_pool_size: DEFAULT_POOL_SIZE,
            minimum_idle: DEFAULT_POOL_SIZE,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT_MILLIS,
            idle_timeout: DEFAULT_IDLE_TIMEOUT_MILLIS,
            read_only: false,
            auto_commit: true,
            connection_init_sqls: Vec::new(),
            login_timeout: 0,
            data_source_properties: IndexMap::new(),
        }
    }
}

impl PgPoolFactory {
    pub const TYPE_NAME: &'static str = "datasource::pool::PgPoolFactory";

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Accepts both URL and key/value connection strings.
    pub fn set_url(&mut self, url: impl Into<String>) -> anyhow::Result<()> {
        let url = url.into();
        url.parse::<tokio_postgres::Config>()
            .with_context(|| format!("invalid connection string `{url}`"))?;
        self.url = Some(url);
        Ok(())
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn maximum_pool_size(&self) -> i32 {
        self.maximum_pool_size
    }

    pub fn set_maximum_pool_size(&mut self, size: i32) -> anyhow::Result<()> {
        ensure!(size >= 1, "maximumPoolSize must be at least 1, got {size}");
        self.maximum_pool_size = size;
        Ok(())
    }

    pub fn minimum_idle(&self) -> i32 {
        self.minimum_idle
    }

    pub fn connection_timeout(&self) -> i64 {
        self.connection_timeout
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn auto_commit(&self) -> bool {
        self.auto_commit
    }

    pub fn connection_init_sqls(&self) -> &[String] {
        &self.connection_init_sqls
    }

    /// Takes a list of statements, or a single `;`-separated string.
    pub fn set_connection_init_sqls(&mut self, value: PropertyValue) -> anyhow::Result<()> {
        self.connection_init_sqls = match value {
            PropertyValue::List(items) => items.iter().map(ToString::to_string).collect(),
            PropertyValue::Str(sqls) => sqls
                .split(';')
                .map(str::trim)
                .filter(|sql| !sql.is_empty())
                .map(String::from)
                .collect(),
            other => bail!("expected SQL statements, got {other}"),
        };
        Ok(())
    }

    pub fn login_timeout(&self) -> i32 {
        self.login_timeout
    }

    pub fn set_login_timeout(&mut self, seconds: i32) {
        self.login_timeout = seconds;
    }

    pub fn data_source_properties(&self) -> &IndexMap<String, String> {
        &self.data_source_properties
    }

    /// Takes a map of server parameters, e.g. `{"statement_timeout": 5000}`.
    pub fn set_data_source_properties(&mut self, value: PropertyValue) -> anyhow::Result<()> {
        let entries = match value {
            PropertyValue::Object(entries) => entries,
            other => bail!("expected a map of server parameters, got {other}"),
        };
        self.data_source_properties = entries
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect();
        Ok(())
    }

    /// connection settings for `tokio_postgres`, credentials override the url's
    pub fn pg_config(&self) -> anyhow::Result<tokio_postgres::Config> {
        let url = self.url.as_deref().context("url is not configured")?;
        let mut config = url
            .parse::<tokio_postgres::Config>()
            .with_context(|| format!("invalid connection string `{url}`"))?;
        if let Some(username) = &self.username {
            config.user(username.as_str());
        }
        if let Some(password) = &self.password {
            config.password(password.as_str());
        }
        if self.connection_timeout > 0 {
            config.connect_timeout(Duration::from_millis(self.connection_timeout as u64));
        }
        if !self.data_source_properties.is_empty() {
            let options = self
                .data_source_properties
                .iter()
                .map(|(key, value)| format!("-c {key}={value}"))
                .collect::<Vec<_>>()
                .join(" ");
            config.options(options.as_str());
        }
        Ok(config)
    }
}

impl PooledConnectionFactory for PgPoolFactory {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Introspect for PgPoolFactory {
    fn property_table() -> PropertyTable<Self> {
        PropertyTable::<Self>::new()
            .accessor("getUrl", Getter::Str(|p| p.url.clone()))
            .accessor("getUsername", Getter::Str(|p| p.username.clone()))
            .accessor("getPassword", Getter::Str(|p| p.password.clone()))
            .accessor("getMaximumPoolSize", Getter::Int(|p| p.maximum_pool_size))
            .accessor("getMinimumIdle", Getter::Int(|p| p.minimum_idle))
            .accessor("getConnectionTimeout", Getter::Long(|p| p.connection_timeout))
            .accessor("getIdleTimeout", Getter::Long(|p| p.idle_timeout))
            .accessor("getReadOnly", Getter::Bool(|p| p.read_only))
            .accessor("isAutoCommit", Getter::Bool(|p| p.auto_commit))
            .accessor("getConnectionInitSqls", Getter::List(|p| {
                p.connection_init_sqls.iter().map(|sql| sql.as_str().into()).collect()
            }))
            .accessor("getLoginTimeout", Getter::Int(|p| p.login_timeout))
            .accessor("getHealthCheckRegistry", Getter::Opaque("HealthCheckRegistry"))
            .accessor("getDataSourceProperties", Getter::Opaque("Properties"))
            .mutator("setUrl", Setter::Str(|p, v| p.set_url(v)))
            .mutator("setUsername", Setter::Str(|p, v| {
                p.username = Some(v);
                Ok(())
            }))
            .mutator("setPassword", Setter::Str(|p, v| {
                p.password = Some(v);
                Ok(())
            }))
            .mutator("setMaximumPoolSize", Setter::Int(Self::set_maximum_pool_size))
            .mutator("setMinimumIdle", Setter::Int(|p, v| {
                ensure!(v >= 0, "minimumIdle must not be negative, got {v}");
                p.minimum_idle = v;
                Ok(())
            }))
            .mutator("setConnectionTimeout", Setter::Long(|p, v| {
                p.connection_timeout = v;
                Ok(())
            }))
            .mutator("setIdleTimeout", Setter::Long(|p, v| {
                p.idle_timeout = v;
                Ok(())
            }))
            .mutator("setReadOnly", Setter::Bool(|p, v| {
                p.read_only = v;
                Ok(())
            }))
            .mutator("setAutoCommit", Setter::Bool(|p, v| {
                p.auto_commit = v;
                Ok(())
            }))
            .mutator("setConnectionInitSqls", Setter::Value(Self::set_connection_init_sqls))
            .mutator("setDataSourceProperties", Setter::Value(Self::set_data_source_properties))
            .mutator("setLoginTimeout", Setter::Int(|p, v| {
                p.set_login_timeout(v);
                Ok(())
            }))
    }
}
