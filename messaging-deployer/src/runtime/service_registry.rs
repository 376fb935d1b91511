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

//! In-process runtime-service layer and deployment-scoped service targets.

use crate::observability::events;
use crate::runtime::service_target::{
    QueueServiceRequest, RuntimeServiceTarget, ServiceInstallError, ServiceName,
    TopicServiceRequest,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

const COMPONENT: &str = "service_registry";

/// A destination service currently installed in the runtime.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InstalledService {
    Queue(QueueServiceRequest),
    Topic(TopicServiceRequest),
}

/// Process-wide record of running messaging servers and the destination services
/// installed on them.
#[derive(Default)]
pub struct ServiceRegistry {
    servers: Mutex<HashSet<ServiceName>>,
    services: Mutex<BTreeMap<ServiceName, InstalledService>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the messaging server named `server` available for destination services.
    pub async fn add_server(&self, server: &str) -> ServiceName {
        let server_name = ServiceName::messaging_server(server);
        if self.servers.lock().await.insert(server_name.clone()) {
            debug!(
                event = events::SERVICE_SERVER_ADD,
                component = COMPONENT,
                server,
                service = %server_name,
                "messaging server available"
            );
        }
        server_name
    }

    pub async fn has_server(&self, server: &ServiceName) -> bool {
        self.servers.lock().await.contains(server)
    }

    pub async fn service(&self, name: &ServiceName) -> Option<InstalledService> {
        self.services.lock().await.get(name).cloned()
    }

    pub async fn service_names(&self) -> Vec<ServiceName> {
        self.services.lock().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.services.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.services.lock().await.is_empty()
    }

    async fn install(
        &self,
        server: &ServiceName,
        name: ServiceName,
        service: InstalledService,
    ) -> Result<(), ServiceInstallError> {
        if !self.has_server(server).await {
            return Err(ServiceInstallError::UnknownServer(server.clone()));
        }

        let mut services = self.services.lock().await;
        if services.contains_key(&name) {
            return Err(ServiceInstallError::AlreadyInstalled(name));
        }
        services.insert(name, service);
        Ok(())
    }

    async fn remove(&self, name: &ServiceName) -> bool {
        self.services.lock().await.remove(name).is_some()
    }
}

/// Service target scoped to one deployment unit.
///
/// Every service installed through the target is remembered so that [`release`]
/// removes exactly what this deployment contributed.
///
/// [`release`]: DeploymentServiceTarget::release
pub struct DeploymentServiceTarget {
    deployment: String,
    registry: Arc<ServiceRegistry>,
    installed: Mutex<Vec<ServiceName>>,
}

impl DeploymentServiceTarget {
    pub fn new(deployment: &str, registry: Arc<ServiceRegistry>) -> Self {
        Self {
            deployment: deployment.to_string(),
            registry,
            installed: Mutex::new(Vec::new()),
        }
    }

    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    pub async fn installed(&self) -> Vec<ServiceName> {
        self.installed.lock().await.clone()
    }

    /// Uninstalls every service installed through this target, newest first.
    /// Returns how many services were removed.
    pub async fn release(&self) -> usize {
        let installed = std::mem::take(&mut *self.installed.lock().await);

        let mut released = 0;
        for name in installed.iter().rev() {
            if self.registry.remove(name).await {
                released += 1;
            } else {
                warn!(
                    event = events::SERVICE_RELEASE,
                    component = COMPONENT,
                    deployment = %self.deployment,
                    service = %name,
                    "service already gone on release"
                );
            }
        }

        debug!(
            event = events::SERVICE_RELEASE,
            component = COMPONENT,
            deployment = %self.deployment,
            count = released,
            "released deployment services"
        );
        released
    }

    async fn track(
        &self,
        server: &ServiceName,
        name: ServiceName,
        service: InstalledService,
    ) -> Result<(), ServiceInstallError> {
        self.registry.install(server, name.clone(), service).await?;
        self.installed.lock().await.push(name);
        Ok(())
    }
}

#[async_trait]
impl RuntimeServiceTarget for DeploymentServiceTarget {
    async fn install_queue(&self, request: QueueServiceRequest) -> Result<(), ServiceInstallError> {
        let server = request.server.clone();
        let name = request.service_name();
        self.track(&server, name, InstalledService::Queue(request))
            .await
    }

    async fn install_topic(&self, request: TopicServiceRequest) -> Result<(), ServiceInstallError> {
        let server = request.server.clone();
        let name = request.service_name();
        self.track(&server, name, InstalledService::Topic(request))
            .await
    }
}
