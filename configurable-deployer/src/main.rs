/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

mod config;

use crate::config::Config;
use clap::Parser;
use messaging_deployer::{
    ConfigurationViewRegistry, ManagementRegistrationIndex, MessagingDeployer,
    ParsedDestinationSupplier, ServiceRegistry,
};
use serde_json::{json, Map, Value};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command()]
struct DeployerArgs {
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Undeploy every unit again, in reverse order, after printing the deployed state.
    #[arg(long)]
    undeploy: bool,
}

async fn views_snapshot(views: &ConfigurationViewRegistry) -> Result<Value, Box<dyn Error>> {
    let mut snapshot = Map::new();
    for (server, name) in views.keys().await {
        if let Some(config) = views.read(&server, &name).await {
            snapshot.insert(format!("{server}/{name}"), serde_json::to_value(config)?);
        }
    }
    Ok(Value::Object(snapshot))
}

async fn snapshot(deployer: &MessagingDeployer) -> Result<Value, Box<dyn Error>> {
    let resources: Vec<String> = deployer
        .resource_tree()
        .describe()
        .await
        .iter()
        .map(ToString::to_string)
        .collect();
    let services: Vec<String> = deployer
        .service_registry()
        .service_names()
        .await
        .iter()
        .map(ToString::to_string)
        .collect();

    Ok(json!({
        "deployer": deployer.name(),
        "deployments": deployer.deployed_units().await,
        "resources": resources,
        "services": services,
        "queues": views_snapshot(deployer.configuration_views().queues()).await?,
        "topics": views_snapshot(deployer.configuration_views().topics()).await?,
    }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    info!("Started configurable-deployer");

    let args = DeployerArgs::parse();
    let config = Config::load(&args.config)?;
    let base_dir = args.config.parent().unwrap_or(Path::new("."));

    let services = Arc::new(ServiceRegistry::new());
    for server in &config.servers {
        services.add_server(server).await;
    }

    let deployer = MessagingDeployer::new(
        &config.deployer_config.name,
        ManagementRegistrationIndex::messaging_deployment(),
        services,
    );
    let supplier = config.destination_supplier(base_dir);

    for deployment in &config.deployments {
        let parse_results = supplier.parsed_destinations(&deployment.name).await?;
        deployer.deploy(&deployment.name, parse_results).await?;
        info!("Deployed {}", deployment.name);
    }

    println!("{}", serde_json::to_string_pretty(&snapshot(&deployer).await?)?);

    if args.undeploy {
        for deployment in config.deployments.iter().rev() {
            deployer.undeploy(&deployment.name).await?;
            info!("Undeployed {}", deployment.name);
        }
        println!("{}", serde_json::to_string_pretty(&snapshot(&deployer).await?)?);
    }

    Ok(())
}
