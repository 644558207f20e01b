use crate::datasource::accessor::{Getter, Introspect, PooledConnectionFactory, PropertyTable, Setter};
use anyhow::ensure;
use std::any::Any;

/// A minimal fixed-size connection pool.
#[derive(Debug, Clone)]
pub struct BasicPoolFactory {
    /// connection pool size
    size: i32,
    /// connection string
    conn_str: Option<String>,
    test_on_borrow: bool,
    /// milliseconds to wait for a free connection, negative waits forever
    max_wait: i64,
}

impl Default for BasicPoolFactory {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            conn_str: None,
            test_on_borrow: false,
            max_wait: -1,
        }
    }
}

impl BasicPoolFactory {
    pub const TYPE_NAME: &'static str = "datasource::pool::BasicPoolFactory";
    pub const DEFAULT_SIZE: i32 = 10;

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn set_size(&mut self, size: i32) -> anyhow::Result<()> {
        ensure!(size > 0, "pool size must be positive, got {size}");
        self.size = size;
        Ok(())
    }

    pub fn conn_str(&self) -> Option<&str> {
        self.conn_str.as_deref()
    }

    pub fn set_conn_str(&mut self, conn_str: impl Into<String>) {
        self.conn_str = Some(conn_str.into());
    }

    pub fn test_on_borrow(&self) -> bool {
        self.test_on_borrow
    }

    pub fn max_wait(&self) -> i64 {
        self.max_wait
    }
}

impl PooledConnectionFactory for BasicPoolFactory {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Introspect for BasicPoolFactory {
    fn property_table() -> PropertyTable<Self> {
        PropertyTable::<Self>::new()
            .accessor("getSize", Getter::Int(|p| p.size))
            .accessor("getConnStr", Getter::Str(|p| p.conn_str.clone()))
            .accessor("getTestOnBorrow", Getter::Bool(|p| p.test_on_borrow))
            .accessor("getMaxWait", Getter::Long(|p| p.max_wait))
            .mutator("setSize", Setter::Int(Self::set_size))
            .mutator("setConnStr", Setter::Str(|p, v| {
                p.set_conn_str(v);
                Ok(())
            }))
            .mutator("setTestOnBorrow", Setter::Bool(|p, v| {
                p.test_on_borrow = v;
                Ok(())
            }))
            .mutator("setMaxWait", Setter::Long(|p, v| {
                p.max_wait = v;
                Ok(())
            }))
    }
}
