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

//! Deploy/undeploy orchestration for the destinations of one deployment unit.

use crate::control_plane::deployment_unit::DeploymentUnit;
use crate::control_plane::destination_installer::{DestinationInstaller, InstallError};
use crate::management::registration_index::ManagementRegistrationIndex;
use crate::model::destination::DestinationKind;
use crate::observability::events;
use crate::runtime::configuration_view::DestinationConfigurationViews;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tracing::{error, info};

const COMPONENT: &str = "deployment_coordinator";

/// Failures of deployment-unit transitions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DeployError {
    AlreadyDeployed(String),
    NotDeployed(String),
    /// The task driving the transition ended without reporting an outcome.
    Interrupted(String),
    Destination {
        deployment: String,
        kind: DestinationKind,
        server: String,
        name: String,
        source: InstallError,
    },
}

impl Display for DeployError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DeployError::AlreadyDeployed(deployment) => {
                write!(f, "deployment {deployment} is already deployed")
            }
            DeployError::NotDeployed(deployment) => {
                write!(f, "deployment {deployment} is not deployed")
            }
            DeployError::Interrupted(deployment) => {
                write!(f, "transition of deployment {deployment} was interrupted")
            }
            DeployError::Destination {
                deployment,
                kind,
                server,
                name,
                source,
            } => write!(
                f,
                "deployment {deployment} failed to install {kind} {name} on server {server}: {source}"
            ),
        }
    }
}

impl Error for DeployError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DeployError::Destination { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Installs and removes the destinations of deployment units.
///
/// Within each parsed set topics are installed before queues, each in declared order.
/// `deploy` stops at the first failing destination; cleaning up what was installed
/// before it is left to the caller, which can always run `undeploy`.
pub struct DeploymentLifecycleCoordinator {
    registration_index: Arc<ManagementRegistrationIndex>,
    configuration_views: Arc<DestinationConfigurationViews>,
}

impl DeploymentLifecycleCoordinator {
    pub fn new(
        registration_index: Arc<ManagementRegistrationIndex>,
        configuration_views: Arc<DestinationConfigurationViews>,
    ) -> Self {
        Self {
            registration_index,
            configuration_views,
        }
    }

    pub fn registration_index(&self) -> &Arc<ManagementRegistrationIndex> {
        &self.registration_index
    }

    pub fn configuration_views(&self) -> &Arc<DestinationConfigurationViews> {
        &self.configuration_views
    }

    pub async fn deploy(&self, unit: &DeploymentUnit) -> Result<(), DeployError> {
        info!(
            event = events::DEPLOY_START,
            component = COMPONENT,
            deployment = unit.name(),
            "deploying messaging destinations"
        );

        let installer = DestinationInstaller::new(
            unit.name(),
            unit.resource_root(),
            &self.registration_index,
            &self.configuration_views,
            unit.service_target().as_ref(),
        );

        let mut installed = 0usize;
        for parse_result in unit.parse_results() {
            for destination in parse_result.iter() {
                if let Err(source) = installer.install(destination).await {
                    error!(
                        event = events::DEPLOY_FAILED,
                        component = COMPONENT,
                        deployment = unit.name(),
                        kind = %destination.kind(),
                        server = destination.server(),
                        destination = destination.name(),
                        count = installed,
                        err = %source,
                        "deployment aborted"
                    );
                    return Err(DeployError::Destination {
                        deployment: unit.name().to_string(),
                        kind: destination.kind(),
                        server: destination.server().to_string(),
                        name: destination.name().to_string(),
                        source,
                    });
                }
                installed += 1;
            }
        }

        info!(
            event = events::DEPLOY_OK,
            component = COMPONENT,
            deployment = unit.name(),
            count = installed,
            "deployed messaging destinations"
        );
        Ok(())
    }

    /// Unregisters the configuration view of every destination the unit declares.
    ///
    /// Never fails: views that were never registered, or belong to another unit, are
    /// skipped, so this is safe after a partial deploy and safe to repeat.
    pub async fn undeploy(&self, unit: &DeploymentUnit) {
        info!(
            event = events::UNDEPLOY_START,
            component = COMPONENT,
            deployment = unit.name(),
            "undeploying messaging destinations"
        );

        let mut removed = 0usize;
        for parse_result in unit.parse_results() {
            for destination in parse_result.iter() {
                if self
                    .configuration_views
                    .for_kind(destination.kind())
                    .unregister_resource(unit.name(), destination.server(), destination.name())
                    .await
                {
                    removed += 1;
                }
            }
        }

        info!(
            event = events::UNDEPLOY_OK,
            component = COMPONENT,
            deployment = unit.name(),
            count = removed,
            "undeployed messaging destinations"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{DeployError, DeploymentLifecycleCoordinator};
    use crate::control_plane::deployment_unit::DeploymentUnit;
    use crate::control_plane::destination_installer::InstallError;
    use crate::management::registration_index::ManagementRegistrationIndex;
    use crate::management::resource_tree::ResourceNode;
    use crate::model::destination::{Destination, DestinationConfig, DestinationKind, ParsedDestinationSet};
    use crate::runtime::configuration_view::DestinationConfigurationViews;
    use crate::runtime::service_target::{
        QueueServiceRequest, RuntimeServiceTarget, ServiceInstallError, TopicServiceRequest,
    };
    use async_trait::async_trait;
    use std::error::Error;
    use std::sync::{Arc, Mutex as StdMutex};

    /// Records install order and fails every call after `fail_after` successes.
    struct OrderedTarget {
        calls: StdMutex<Vec<(DestinationKind, String)>>,
        fail_after: Option<usize>,
    }

    impl OrderedTarget {
        fn new(fail_after: Option<usize>) -> Self {
            Self {
                calls: StdMutex::new(Vec::new()),
                fail_after,
            }
        }

        fn record(&self, kind: DestinationKind, name: &str) -> Result<(), ServiceInstallError> {
            let mut calls = self.calls.lock().expect("lock calls");
            if self.fail_after.is_some_and(|limit| calls.len() >= limit) {
                return Err(ServiceInstallError::Rejected(format!("{name} rejected")));
            }
            calls.push((kind, name.to_string()));
            Ok(())
        }

        fn calls(&self) -> Vec<(DestinationKind, String)> {
            self.calls.lock().expect("lock calls").clone()
        }
    }

    #[async_trait]
    impl RuntimeServiceTarget for OrderedTarget {
        async fn install_queue(
            &self,
            request: QueueServiceRequest,
        ) -> Result<(), ServiceInstallError> {
            self.record(DestinationKind::Queue, &request.name)
        }

        async fn install_topic(
            &self,
            request: TopicServiceRequest,
        ) -> Result<(), ServiceInstallError> {
            self.record(DestinationKind::Topic, &request.name)
        }
    }

    fn coordinator() -> DeploymentLifecycleCoordinator {
        DeploymentLifecycleCoordinator::new(
            Arc::new(ManagementRegistrationIndex::messaging_deployment()),
            Arc::new(DestinationConfigurationViews::new()),
        )
    }

    fn unit(name: &str, sets: Vec<ParsedDestinationSet>, target: Arc<OrderedTarget>) -> DeploymentUnit {
        DeploymentUnit::new(name, sets, ResourceNode::create(), target)
    }

    fn example_set() -> ParsedDestinationSet {
        ParsedDestinationSet::new()
            .with(Destination::queue(
                "Q1",
                "default",
                DestinationConfig::default()
                    .with_entries(["jms/Q1"])
                    .with_durable(true)
                    .with_selector("priority>5"),
            ))
            .with(Destination::topic(
                "T1",
                "default",
                DestinationConfig::default().with_entries(["jms/T1"]),
            ))
    }

    #[tokio::test]
    async fn deploy_installs_topics_before_queues_in_declared_order() {
        let coordinator = coordinator();
        let target = Arc::new(OrderedTarget::new(None));
        let first = ParsedDestinationSet::new()
            .with(Destination::queue("Q2", "default", DestinationConfig::default()))
            .with(Destination::topic("T2", "default", DestinationConfig::default()))
            .with(Destination::queue("Q1", "default", DestinationConfig::default()))
            .with(Destination::topic("T1", "default", DestinationConfig::default()));
        let second = ParsedDestinationSet::new()
            .with(Destination::queue("Q3", "default", DestinationConfig::default()));
        let unit = unit("app.war", vec![first, second], target.clone());

        coordinator.deploy(&unit).await.expect("deploy should succeed");

        let order: Vec<String> = target
            .calls()
            .into_iter()
            .map(|(kind, name)| format!("{kind}:{name}"))
            .collect();
        assert_eq!(
            order,
            vec!["topic:T2", "topic:T1", "queue:Q2", "queue:Q1", "queue:Q3"]
        );
    }

    #[tokio::test]
    async fn deploy_then_undeploy_restores_empty_views() {
        let coordinator = coordinator();
        let target = Arc::new(OrderedTarget::new(None));
        let unit = unit("app.war", vec![example_set()], target);

        coordinator.deploy(&unit).await.unwrap();
        let views = coordinator.configuration_views();
        assert_eq!(
            views.topics().keys().await,
            vec![("default".to_string(), "T1".to_string())]
        );
        assert_eq!(
            views.queues().keys().await,
            vec![("default".to_string(), "Q1".to_string())]
        );

        coordinator.undeploy(&unit).await;

        assert!(views.is_empty().await);
        // Tree nodes are not removed by undeploy.
        assert_eq!(unit.resource_root().describe().await.len(), 4);
    }

    #[tokio::test]
    async fn failed_deploy_reports_destination_and_undeploy_removes_only_installed_views() {
        let coordinator = coordinator();
        let target = Arc::new(OrderedTarget::new(Some(2)));
        let set = ParsedDestinationSet::new()
            .with(Destination::topic("T1", "default", DestinationConfig::default()))
            .with(Destination::queue("Q1", "default", DestinationConfig::default()))
            .with(Destination::queue("Q2", "default", DestinationConfig::default()));
        let unit = unit("app.war", vec![set], target);

        let error = coordinator.deploy(&unit).await.expect_err("third install fails");

        assert!(matches!(
            &error,
            DeployError::Destination { kind: DestinationKind::Queue, name, source: InstallError::ServiceInstall(_), .. }
                if name == "Q2"
        ));
        assert!(error.source().is_some());
        let views = coordinator.configuration_views();
        assert_eq!(views.topics().len().await + views.queues().len().await, 2);

        coordinator.undeploy(&unit).await;
        assert!(views.is_empty().await);

        coordinator.undeploy(&unit).await;
        assert!(views.is_empty().await);
    }

    #[tokio::test]
    async fn undeploy_leaves_views_of_other_units_in_place() {
        let coordinator = coordinator();
        let owner = unit("a.war", vec![example_set()], Arc::new(OrderedTarget::new(None)));
        let intruder = unit("b.war", vec![example_set()], Arc::new(OrderedTarget::new(None)));

        coordinator.deploy(&owner).await.unwrap();
        let error = coordinator
            .deploy(&intruder)
            .await
            .expect_err("same destinations cannot be deployed twice");
        assert!(matches!(
            error,
            DeployError::Destination { source: InstallError::AlreadyInstalled(_), .. }
        ));

        coordinator.undeploy(&intruder).await;

        let views = coordinator.configuration_views();
        assert_eq!(views.topics().owner("default", "T1").await.as_deref(), Some("a.war"));
        assert_eq!(views.queues().owner("default", "Q1").await.as_deref(), Some("a.war"));
    }

    #[tokio::test]
    async fn empty_unit_deploys_and_undeploys_trivially() {
        let coordinator = coordinator();
        let target = Arc::new(OrderedTarget::new(Some(0)));
        let unit = unit("empty.war", vec![ParsedDestinationSet::new()], target.clone());

        assert!(coordinator.deploy(&unit).await.is_ok());
        coordinator.undeploy(&unit).await;

        assert!(target.calls().is_empty());
        assert!(unit.resource_root().describe().await.is_empty());
    }
}
