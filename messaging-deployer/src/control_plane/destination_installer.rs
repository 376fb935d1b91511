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

//! Per-destination installation: runtime service, management node, configuration view.

use crate::management::registration_index::ManagementRegistrationIndex;
use crate::management::resource_tree::ResourceNode;
use crate::model::destination::{Destination, DestinationKind};
use crate::model::path_address::{PathAddress, PathElement, MESSAGING_SUBSYSTEM, SUBSYSTEM};
use crate::observability::{events, fields};
use crate::runtime::configuration_view::DestinationConfigurationViews;
use crate::runtime::service_target::{
    QueueServiceRequest, RuntimeServiceTarget, ServiceInstallError, ServiceName,
    TopicServiceRequest,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tracing::{debug, error};

const COMPONENT: &str = "destination_installer";

/// Address of the messaging subsystem node below a deployment root.
pub fn subsystem_address() -> PathAddress {
    PathAddress::from(PathElement::new(SUBSYSTEM, MESSAGING_SUBSYSTEM))
}

/// Failures installing a single destination.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InstallError {
    /// A live destination already uses the same `(server, kind, name)`.
    AlreadyInstalled(PathAddress),
    /// The computed sub-model address is unknown to the registration index.
    SchemaInconsistency(PathAddress),
    ServiceInstall(ServiceInstallError),
}

impl Display for InstallError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallError::AlreadyInstalled(address) => {
                write!(f, "destination {address} is already installed")
            }
            InstallError::SchemaInconsistency(address) => {
                write!(f, "no management sub-model registered for {address}")
            }
            InstallError::ServiceInstall(err) => {
                write!(f, "failed to install destination service: {err}")
            }
        }
    }
}

impl Error for InstallError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InstallError::ServiceInstall(err) => Some(err),
            _ => None,
        }
    }
}

/// Installs destinations of one deployment unit.
pub struct DestinationInstaller<'a> {
    deployment: &'a str,
    deployment_root: &'a Arc<ResourceNode>,
    registration_index: &'a ManagementRegistrationIndex,
    configuration_views: &'a DestinationConfigurationViews,
    service_target: &'a dyn RuntimeServiceTarget,
}

impl<'a> DestinationInstaller<'a> {
    pub fn new(
        deployment: &'a str,
        deployment_root: &'a Arc<ResourceNode>,
        registration_index: &'a ManagementRegistrationIndex,
        configuration_views: &'a DestinationConfigurationViews,
        service_target: &'a dyn RuntimeServiceTarget,
    ) -> Self {
        Self {
            deployment,
            deployment_root,
            registration_index,
            configuration_views,
            service_target,
        }
    }

    /// Installs `destination`.
    ///
    /// The runtime service is installed first; only once it exists is the management
    /// node created and the configuration view registered.
    pub async fn install(&self, destination: &Destination) -> Result<(), InstallError> {
        let registration = destination.registration_address();
        let views = self.configuration_views.for_kind(destination.kind());

        debug!(
            event = events::DESTINATION_INSTALL_START,
            component = COMPONENT,
            deployment = self.deployment,
            kind = %destination.kind(),
            server = destination.server(),
            destination = destination.name(),
            "installing destination"
        );

        if let Some(owner) = views.owner(destination.server(), destination.name()).await {
            error!(
                event = events::DESTINATION_INSTALL_FAILED,
                component = COMPONENT,
                deployment = self.deployment,
                kind = %destination.kind(),
                server = destination.server(),
                destination = destination.name(),
                owner = %owner,
                reason = fields::REASON_ALREADY_DEPLOYED,
                "destination is already installed"
            );
            return Err(InstallError::AlreadyInstalled(registration));
        }

        self.install_service(destination)
            .await
            .map_err(InstallError::ServiceInstall)?;

        self.create_deployment_sub_model(&PathAddress::from(destination.server_element()))
            .await?;
        self.create_deployment_sub_model(&registration).await?;

        if !views
            .register_resource(
                self.deployment,
                destination.server(),
                destination.name(),
                destination.config().clone(),
            )
            .await
        {
            return Err(InstallError::AlreadyInstalled(registration));
        }

        debug!(
            event = events::DESTINATION_INSTALL_OK,
            component = COMPONENT,
            deployment = self.deployment,
            kind = %destination.kind(),
            server = destination.server(),
            destination = destination.name(),
            "installed destination"
        );
        Ok(())
    }

    async fn install_service(&self, destination: &Destination) -> Result<(), ServiceInstallError> {
        let server = ServiceName::messaging_server(destination.server());
        let config = destination.config();
        let bindings = config.bindings();
        let bindings_value = fields::format_bindings(&bindings);

        let result = match destination.kind() {
            DestinationKind::Queue => {
                self.service_target
                    .install_queue(QueueServiceRequest {
                        name: destination.name().to_string(),
                        server: server.clone(),
                        selector: config.selector().map(str::to_string),
                        durable: config.is_durable(),
                        bindings,
                    })
                    .await
            }
            DestinationKind::Topic => {
                self.service_target
                    .install_topic(TopicServiceRequest {
                        name: destination.name().to_string(),
                        server: server.clone(),
                        bindings,
                    })
                    .await
            }
        };

        match &result {
            Ok(()) => debug!(
                event = events::SERVICE_INSTALL_OK,
                component = COMPONENT,
                deployment = self.deployment,
                kind = %destination.kind(),
                server = destination.server(),
                destination = destination.name(),
                service = %server,
                bindings = %bindings_value,
                "installed destination service"
            ),
            Err(err) => error!(
                event = events::SERVICE_INSTALL_FAILED,
                component = COMPONENT,
                deployment = self.deployment,
                kind = %destination.kind(),
                server = destination.server(),
                destination = destination.name(),
                service = %server,
                err = %err,
                "unable to install destination service"
            ),
        }
        result
    }

    /// Ensures `address` exists below the deployment's messaging subsystem node.
    ///
    /// The schema check happens before the node is created, so an unknown address
    /// leaves no node behind.
    async fn create_deployment_sub_model(
        &self,
        address: &PathAddress,
    ) -> Result<(), InstallError> {
        let subsystem_address = subsystem_address();
        let full_address = subsystem_address.append(address);

        let Some(sub_model) = self.registration_index.lookup(&full_address) else {
            error!(
                event = events::SCHEMA_LOOKUP_MISSING,
                component = COMPONENT,
                deployment = self.deployment,
                address = %full_address,
                "management sub-model is not registered"
            );
            return Err(InstallError::SchemaInconsistency(full_address));
        };

        let subsystem = self.deployment_root.get_or_create(&subsystem_address).await;
        subsystem.get_or_create(address).await;

        debug!(
            event = events::SUB_MODEL_READY,
            component = COMPONENT,
            deployment = self.deployment,
            address = %full_address,
            description = sub_model.description(),
            "deployment sub-model ready"
        );
        Ok(())
    }
}
