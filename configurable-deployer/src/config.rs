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

use destination_static_file::DestinationStaticFile;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub(crate) deployer_config: DeployerConfig,
    pub(crate) servers: Vec<String>,
    #[serde(default)]
    pub(crate) deployments: Vec<DeploymentConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct DeployerConfig {
    pub(crate) name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct DeploymentConfig {
    pub(crate) name: String,
    pub(crate) descriptor_files: Vec<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let config_contents = std::fs::read_to_string(path)?;
        let config: Config = json5::from_str(&config_contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        let mut names: Vec<&str> = self.deployments.iter().map(|d| d.name.as_str()).collect();
        names.sort_unstable();
        if let Some(duplicate) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(format!("Duplicate deployment name found: {}", duplicate[0]));
        }
        Ok(())
    }

    /// Descriptor supplier for every configured deployment. Relative descriptor paths
    /// are resolved against `base_dir`.
    pub fn destination_supplier(&self, base_dir: &Path) -> DestinationStaticFile {
        self.deployments
            .iter()
            .fold(DestinationStaticFile::new(), |supplier, deployment| {
                supplier.with_deployment(
                    &deployment.name,
                    deployment
                        .descriptor_files
                        .iter()
                        .map(|file| base_dir.join(file)),
                )
            })
    }
}
