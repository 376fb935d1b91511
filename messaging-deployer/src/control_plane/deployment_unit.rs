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

use crate::management::resource_tree::ResourceNode;
use crate::model::destination::ParsedDestinationSet;
use crate::runtime::service_target::RuntimeServiceTarget;
use std::sync::Arc;

/// One deployable bundle of destinations together with the handles it is installed into.
///
/// `resource_root` is the unit's own node in the management tree; everything the unit
/// registers lives below it. `service_target` receives the unit's runtime services.
#[derive(Clone)]
pub struct DeploymentUnit {
    name: String,
    parse_results: Vec<ParsedDestinationSet>,
    resource_root: Arc<ResourceNode>,
    service_target: Arc<dyn RuntimeServiceTarget>,
}

impl DeploymentUnit {
    pub fn new(
        name: &str,
        parse_results: Vec<ParsedDestinationSet>,
        resource_root: Arc<ResourceNode>,
        service_target: Arc<dyn RuntimeServiceTarget>,
    ) -> Self {
        Self {
            name: name.to_string(),
            parse_results,
            resource_root,
            service_target,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parse_results(&self) -> &[ParsedDestinationSet] {
        &self.parse_results
    }

    pub fn resource_root(&self) -> &Arc<ResourceNode> {
        &self.resource_root
    }

    pub fn service_target(&self) -> &Arc<dyn RuntimeServiceTarget> {
        &self.service_target
    }
}
