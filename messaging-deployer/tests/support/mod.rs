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

use messaging_deployer::{
    subsystem_address, DestinationConfigurationViews, DestinationKind,
    DeploymentLifecycleCoordinator, ManagementRegistrationIndex, MessagingDeployer, PathAddress,
    PathElement, ServiceRegistry, HORNETQ_SERVER,
};
use std::sync::Arc;

#[allow(dead_code)]
pub(crate) fn make_coordinator() -> DeploymentLifecycleCoordinator {
    DeploymentLifecycleCoordinator::new(
        Arc::new(ManagementRegistrationIndex::messaging_deployment()),
        Arc::new(DestinationConfigurationViews::new()),
    )
}

#[allow(dead_code)]
pub(crate) async fn make_deployer(servers: &[&str]) -> MessagingDeployer {
    let services = Arc::new(ServiceRegistry::new());
    for server in servers {
        services.add_server(server).await;
    }
    MessagingDeployer::new(
        "integration-test",
        ManagementRegistrationIndex::messaging_deployment(),
        services,
    )
}

/// `(subsystem=messaging, hornetq-server=<server>, jms-queue|jms-topic=<name>)`.
#[allow(dead_code)]
pub(crate) fn destination_address(server: &str, kind: DestinationKind, name: &str) -> PathAddress {
    subsystem_address()
        .child(PathElement::new(HORNETQ_SERVER, server))
        .child(PathElement::new(kind.element_key(), name))
}

#[allow(dead_code)]
pub(crate) fn rendered(addresses: Vec<PathAddress>) -> Vec<String> {
    addresses.iter().map(ToString::to_string).collect()
}
