//! application entry point: load a data source descriptor, build it and print what the built pool reports

use anyhow::Context;
use datasource_config::datasource::{ConfigurationDescriptor, FactoryRegistry};
use derive_more::Display;
use log::{info, warn};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const DEFAULT_DATASOURCE_CONFIG_PATH: &str = "datasource.json";

fn main() -> anyhow::Result<()> {
    // bootstrap
    // a. env
    let env = env::var("APP_ENV")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(Env::Dev); // default dev env if absent

    let dotenv = match env {
        Env::Prod | Env::Stg => Ok(()), // provided by the deployment
        Env::Dev => dotenvy::from_path(Path::new(".env.dev")),
    };

    // b. logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    if let Err(e) = dotenv {
        warn!("no env loaded from .env.dev, {}", e);
    }

    // c. run
    let path = env::var("DATASOURCE_CONFIG").unwrap_or(DEFAULT_DATASOURCE_CONFIG_PATH.to_string());
    info!("loading data source configuration from {} in env={}", path, env);
    let content = fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
    let descriptor: ConfigurationDescriptor =
        serde_json::from_str(&content).with_context(|| format!("failed to parse {path}"))?;

    let registry = FactoryRegistry::with_builtin_pools();
    let factory = descriptor.create_factory(&registry)?;
    let built = ConfigurationDescriptor::from_factory(&registry, &*factory)?;
    if built != descriptor {
        warn!("built data source does not reflect every configured property");
    }
    println!("{}", serde_json::to_string_pretty(&built)?);
    Ok(())
}

#[derive(Debug, Display)]
#[non_exhaustive]
enum Env {
    Dev,
    Stg,
    Prod,
}

impl FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "stg" => Ok(Self::Stg),
            "prod" => Ok(Self::Prod),
            s => Err(format!("Invalid Env: {s}")),
        }
    }
}
