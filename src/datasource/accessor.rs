//! Statically declared accessors and mutators of a pooled connection factory type.
//!
//! Every factory type describes itself once through a [`PropertyTable`]: its getter
//! methods with their declared return kinds, and its single-argument setter methods
//! with their declared parameter kinds. Extraction and build only ever go through
//! this table, so dispatch to the concrete type is checked at compile time.

use crate::datasource::property::{PropertyValue, ValueKind};
use anyhow::{anyhow, bail};
use std::any::Any;
use std::fmt::Debug;

/// The capability every pooled connection factory exposes to the descriptor.
pub trait PooledConnectionFactory: Any + Debug + Send {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A factory type that can be created by name and configured from a property map.
pub trait Introspect: PooledConnectionFactory + Default + Sized {
    fn property_table() -> PropertyTable<Self>;
}

/// zero-argument accessor, tagged by its declared return type
pub enum Getter<T> {
    Bool(fn(&T) -> bool),
    Int(fn(&T) -> i32),
    Long(fn(&T) -> i64),
    Str(fn(&T) -> Option<String>),
    List(fn(&T) -> Vec<PropertyValue>),
    /// returns a nested object; never invoked by extraction
    Opaque(&'static str),
}

/// single-argument mutator, tagged by its declared parameter type
pub enum Setter<T> {
    Bool(fn(&mut T, bool) -> anyhow::Result<()>),
    Int(fn(&mut T, i32) -> anyhow::Result<()>),
    Long(fn(&mut T, i64) -> anyhow::Result<()>),
    Str(fn(&mut T, String) -> anyhow::Result<()>),
    /// any other parameter type, receives the value as supplied
    Value(fn(&mut T, PropertyValue) -> anyhow::Result<()>),
}

impl<T> Getter<T> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Getter::Bool(_) => ValueKind::Bool,
            Getter::Int(_) => ValueKind::Int,
            Getter::Long(_) => ValueKind::Long,
            Getter::Str(_) => ValueKind::Str,
            Getter::List(_) => ValueKind::List,
            Getter::Opaque(type_name) => ValueKind::Opaque(*type_name),
        }
    }

    /// `None` for opaque accessors
    pub fn invoke(&self, target: &T) -> Option<PropertyValue> {
        match self {
            Getter::Bool(get) => Some(get(target).into()),
            Getter::Int(get) => Some(get(target).into()),
            Getter::Long(get) => Some(get(target).into()),
            Getter::Str(get) => Some(get(target).into()),
            Getter::List(get) => Some(PropertyValue::List(get(target))),
            Getter::Opaque(_) => None,
        }
    }
}

impl<T> Setter<T> {
    /// Coerce `value` to the declared parameter type and invoke the mutator.
    pub fn invoke(&self, target: &mut T, value: &PropertyValue) -> anyhow::Result<()> {
        match self {
            Setter::Bool(set) => set(target, parse_bool(&value.to_string())?),
            Setter::Int(set) => {
                let text = value.to_string();
                let parsed = text
                    .parse::<i32>()
                    .map_err(|e| anyhow!("For input string: \"{text}\" ({e})"))?;
                set(target, parsed)
            }
            Setter::Long(set) => {
                let text = value.to_string();
                let parsed = text
                    .parse::<i64>()
                    .map_err(|e| anyhow!("For input string: \"{text}\" ({e})"))?;
                set(target, parsed)
            }
            Setter::Str(set) => set(target, value.to_string()),
            Setter::Value(set) => set(target, value.clone()),
        }
    }
}

fn parse_bool(text: &str) -> anyhow::Result<bool> {
    if text.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if text.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        bail!("For input string: \"{text}\" (expected true or false)")
    }
}

/// Getter and setter methods of one factory type, keyed by method name.
pub struct PropertyTable<T> {
    accessors: Vec<(&'static str, Getter<T>)>,
    mutators: Vec<(&'static str, Setter<T>)>,
}

impl<T> Default for PropertyTable<T> {
    fn default() -> Self {
        Self {
            accessors: Vec::new(),
            mutators: Vec::new(),
        }
    }
}

impl<T> PropertyTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accessor(mut self, method: &'static str, getter: Getter<T>) -> Self {
        self.accessors.push((method, getter));
        self
    }

    pub fn mutator(mut self, method: &'static str, setter: Setter<T>) -> Self {
        self.mutators.push((method, setter));
        self
    }

    pub fn accessors(&self) -> impl Iterator<Item = (&'static str, &Getter<T>)> + '_ {
        self.accessors.iter().map(|(method, getter)| (*method, getter))
    }

    /// first mutator declared under `method`
    pub fn find_mutator(&self, method: &str) -> Option<&Setter<T>> {
        self.mutators
            .iter()
            .find(|(name, _)| *name == method)
            .map(|(_, setter)| setter)
    }
}
