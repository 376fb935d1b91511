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

//! Process-level entry point that deploys and undeploys messaging units.

use crate::control_plane::deployment_coordinator::{DeployError, DeploymentLifecycleCoordinator};
use crate::control_plane::deployment_unit::DeploymentUnit;
use crate::management::registration_index::ManagementRegistrationIndex;
use crate::management::resource_tree::{ResourceNode, ResourceTree};
use crate::model::destination::{DestinationConfig, ParsedDestinationSet};
use crate::model::path_address::{PathAddress, PathElement, DEPLOYMENT};
use crate::observability::{events, fields};
use crate::runtime::configuration_view::DestinationConfigurationViews;
use crate::runtime::service_registry::{DeploymentServiceTarget, ServiceRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

const COMPONENT: &str = "messaging_deployer";

/// Address of a deployment unit's root in the process-wide resource tree.
pub fn deployment_address(deployment: &str) -> PathAddress {
    PathAddress::from(PathElement::new(DEPLOYMENT, deployment))
}

struct DeployedUnit {
    unit: DeploymentUnit,
    services: Arc<DeploymentServiceTarget>,
}

enum UnitState {
    /// Deploy or undeploy in progress; the unit is neither listed nor available.
    InTransition,
    Deployed(DeployedUnit),
}

struct DeployerState {
    name: String,
    resource_tree: ResourceTree,
    coordinator: DeploymentLifecycleCoordinator,
    service_registry: Arc<ServiceRegistry>,
    units: Mutex<HashMap<String, UnitState>>,
}

/// Owns the management tree, schema index, configuration views and service registry
/// of one running system and moves deployment units in and out of it.
///
/// Distinct units can be deployed and undeployed concurrently from different tasks.
/// A unit whose deploy fails is rolled back before the error is returned, so it leaves
/// no views, services or tree nodes behind.
///
/// Each transition runs on its own tokio task. A caller that stops waiting (timeout,
/// `select!`, aborted task) does not cancel it: the unit still ends up deployed,
/// rolled back or removed.
pub struct MessagingDeployer {
    state: Arc<DeployerState>,
}

impl MessagingDeployer {
    pub fn new(
        name: &str,
        registration_index: ManagementRegistrationIndex,
        service_registry: Arc<ServiceRegistry>,
    ) -> Self {
        Self {
            state: Arc::new(DeployerState {
                name: name.to_string(),
                resource_tree: ResourceTree::new(),
                coordinator: DeploymentLifecycleCoordinator::new(
                    Arc::new(registration_index),
                    Arc::new(DestinationConfigurationViews::new()),
                ),
                service_registry,
                units: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    /// Deploys `parse_results` as the unit `deployment`.
    pub async fn deploy(
        &self,
        deployment: &str,
        parse_results: Vec<ParsedDestinationSet>,
    ) -> Result<(), DeployError> {
        {
            let mut units = self.state.units.lock().await;
            if units.contains_key(deployment) {
                warn!(
                    event = events::DEPLOY_FAILED,
                    component = COMPONENT,
                    deployer = %self.state.name,
                    deployment,
                    reason = fields::REASON_ALREADY_DEPLOYED,
                    "deployment rejected"
                );
                return Err(DeployError::AlreadyDeployed(deployment.to_string()));
            }
            units.insert(deployment.to_string(), UnitState::InTransition);
        }

        let state = self.state.clone();
        let name = deployment.to_string();
        let transition = tokio::spawn(async move { state.deploy_unit(name, parse_results).await });
        self.state.join_transition(deployment, transition).await
    }

    /// Undeploys the unit `deployment`, releasing its services and removing its
    /// management sub-tree.
    pub async fn undeploy(&self, deployment: &str) -> Result<(), DeployError> {
        let deployed = {
            let mut units = self.state.units.lock().await;
            match units.remove(deployment) {
                Some(UnitState::Deployed(deployed)) => {
                    units.insert(deployment.to_string(), UnitState::InTransition);
                    deployed
                }
                other => {
                    if let Some(state) = other {
                        units.insert(deployment.to_string(), state);
                    }
                    warn!(
                        event = events::UNDEPLOY_FAILED,
                        component = COMPONENT,
                        deployer = %self.state.name,
                        deployment,
                        reason = fields::REASON_NOT_DEPLOYED,
                        "nothing to undeploy"
                    );
                    return Err(DeployError::NotDeployed(deployment.to_string()));
                }
            }
        };

        let state = self.state.clone();
        let transition = tokio::spawn(async move { state.undeploy_unit(deployed).await });
        self.state.join_transition(deployment, transition).await
    }

    /// Names of fully deployed units, sorted.
    pub async fn deployed_units(&self) -> Vec<String> {
        let mut deployed: Vec<String> = self
            .state
            .units
            .lock()
            .await
            .iter()
            .filter(|(_, state)| matches!(state, UnitState::Deployed(_)))
            .map(|(name, _)| name.clone())
            .collect();
        deployed.sort();
        deployed
    }

    pub fn resource_tree(&self) -> &ResourceTree {
        &self.state.resource_tree
    }

    pub async fn read_resource(&self, address: &PathAddress) -> Option<Arc<ResourceNode>> {
        self.state.resource_tree.read(address).await
    }

    pub async fn queue_configuration(&self, server: &str, name: &str) -> Option<DestinationConfig> {
        self.configuration_views().queues().read(server, name).await
    }

    pub async fn topic_configuration(&self, server: &str, name: &str) -> Option<DestinationConfig> {
        self.configuration_views().topics().read(server, name).await
    }

    pub fn configuration_views(&self) -> &DestinationConfigurationViews {
        self.state.coordinator.configuration_views()
    }

    pub fn registration_index(&self) -> &ManagementRegistrationIndex {
        self.state.coordinator.registration_index()
    }

    pub fn service_registry(&self) -> &Arc<ServiceRegistry> {
        &self.state.service_registry
    }
}

impl DeployerState {
    async fn deploy_unit(
        &self,
        deployment: String,
        parse_results: Vec<ParsedDestinationSet>,
    ) -> Result<(), DeployError> {
        let resource_root = self
            .resource_tree
            .get_or_create(&deployment_address(&deployment))
            .await;
        let services = Arc::new(DeploymentServiceTarget::new(
            &deployment,
            self.service_registry.clone(),
        ));
        let unit = DeploymentUnit::new(&deployment, parse_results, resource_root, services.clone());

        if let Err(err) = self.coordinator.deploy(&unit).await {
            warn!(
                event = events::DEPLOY_ROLLBACK,
                component = COMPONENT,
                deployer = %self.name,
                deployment = %deployment,
                reason = fields::REASON_ROLLBACK_AFTER_FAILURE,
                err = %err,
                "rolling back failed deployment"
            );
            self.tear_down(&unit, &services).await;
            self.units.lock().await.remove(&deployment);
            return Err(err);
        }

        self.units.lock().await.insert(
            deployment.clone(),
            UnitState::Deployed(DeployedUnit { unit, services }),
        );
        info!(
            event = events::DEPLOY_OK,
            component = COMPONENT,
            deployer = %self.name,
            deployment = %deployment,
            "deployment available"
        );
        Ok(())
    }

    async fn undeploy_unit(&self, deployed: DeployedUnit) -> Result<(), DeployError> {
        let deployment = deployed.unit.name();
        self.tear_down(&deployed.unit, &deployed.services).await;
        self.units.lock().await.remove(deployment);

        info!(
            event = events::UNDEPLOY_OK,
            component = COMPONENT,
            deployer = %self.name,
            deployment,
            "deployment removed"
        );
        Ok(())
    }

    async fn tear_down(&self, unit: &DeploymentUnit, services: &DeploymentServiceTarget) {
        self.coordinator.undeploy(unit).await;
        services.release().await;
        self.resource_tree
            .remove(&deployment_address(unit.name()))
            .await;
    }

    /// Waits for a spawned transition. A task that panicked or was cancelled releases
    /// the name so the unit can be deployed again.
    async fn join_transition(
        &self,
        deployment: &str,
        transition: JoinHandle<Result<(), DeployError>>,
    ) -> Result<(), DeployError> {
        match transition.await {
            Ok(outcome) => outcome,
            Err(join_err) => {
                error!(
                    event = events::DEPLOY_FAILED,
                    component = COMPONENT,
                    deployer = %self.name,
                    deployment,
                    reason = fields::REASON_TRANSITION_INTERRUPTED,
                    err = %join_err,
                    "deployment transition did not complete"
                );
                self.units.lock().await.remove(deployment);
                Err(DeployError::Interrupted(deployment.to_string()))
            }
        }
    }
}
