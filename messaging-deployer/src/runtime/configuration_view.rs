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

//! Live configuration views of deployed destinations, readable by management callers.

use crate::model::destination::{DestinationConfig, DestinationKind};
use crate::observability::{events, fields};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

const COMPONENT: &str = "configuration_view";

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct ViewKey {
    server: String,
    name: String,
}

impl ViewKey {
    fn new(server: &str, name: &str) -> Self {
        Self {
            server: server.to_string(),
            name: name.to_string(),
        }
    }
}

struct ConfigurationView {
    deployment: String,
    config: DestinationConfig,
}

/// Registered configurations of one destination kind keyed by `(server, name)`.
///
/// Registering and unregistering never fail. Each view remembers the deployment that
/// registered it and only that deployment can unregister it.
pub struct ConfigurationViewRegistry {
    kind: DestinationKind,
    views: Mutex<HashMap<ViewKey, ConfigurationView>>,
}

impl ConfigurationViewRegistry {
    pub fn new(kind: DestinationKind) -> Self {
        Self {
            kind,
            views: Mutex::new(HashMap::new()),
        }
    }

    pub fn kind(&self) -> DestinationKind {
        self.kind
    }

    /// Registers the view for `(server, name)` on behalf of `deployment`.
    ///
    /// Returns `false`, leaving the registry untouched, when another deployment
    /// already owns the key. Re-registering from the owning deployment replaces the
    /// stored configuration.
    pub async fn register_resource(
        &self,
        deployment: &str,
        server: &str,
        name: &str,
        config: DestinationConfig,
    ) -> bool {
        let mut views = self.views.lock().await;
        let key = ViewKey::new(server, name);

        if let Some(existing) = views.get(&key) {
            if existing.deployment != deployment {
                warn!(
                    event = events::CONFIGURATION_VIEW_CONFLICT,
                    component = COMPONENT,
                    kind = %self.kind,
                    deployment,
                    server,
                    destination = name,
                    reason = fields::REASON_OWNED_ELSEWHERE,
                    "configuration view already registered"
                );
                return false;
            }
        }

        views.insert(
            key,
            ConfigurationView {
                deployment: deployment.to_string(),
                config,
            },
        );
        debug!(
            event = events::CONFIGURATION_VIEW_REGISTER,
            component = COMPONENT,
            kind = %self.kind,
            deployment,
            server,
            destination = name,
            "registered configuration view"
        );
        true
    }

    /// Removes the view for `(server, name)` if `deployment` owns it.
    ///
    /// Missing or foreign views are a no-op. Returns whether a view was removed.
    pub async fn unregister_resource(&self, deployment: &str, server: &str, name: &str) -> bool {
        let mut views = self.views.lock().await;
        let key = ViewKey::new(server, name);

        let reason = match views.get(&key) {
            Some(view) if view.deployment == deployment => None,
            Some(_) => Some(fields::REASON_OWNED_ELSEWHERE),
            None => Some(fields::REASON_NOT_REGISTERED),
        };

        if let Some(reason) = reason {
            debug!(
                event = events::CONFIGURATION_VIEW_UNREGISTER_SKIPPED,
                component = COMPONENT,
                kind = %self.kind,
                deployment,
                server,
                destination = name,
                reason,
                "nothing to unregister"
            );
            return false;
        }

        views.remove(&key);
        debug!(
            event = events::CONFIGURATION_VIEW_UNREGISTER,
            component = COMPONENT,
            kind = %self.kind,
            deployment,
            server,
            destination = name,
            "unregistered configuration view"
        );
        true
    }

    pub async fn read(&self, server: &str, name: &str) -> Option<DestinationConfig> {
        self.views
            .lock()
            .await
            .get(&ViewKey::new(server, name))
            .map(|view| view.config.clone())
    }

    /// Deployment currently owning the view for `(server, name)`.
    pub async fn owner(&self, server: &str, name: &str) -> Option<String> {
        self.views
            .lock()
            .await
            .get(&ViewKey::new(server, name))
            .map(|view| view.deployment.clone())
    }

    /// Registered `(server, name)` keys in sorted order.
    pub async fn keys(&self) -> Vec<(String, String)> {
        let mut keys: Vec<(String, String)> = self
            .views
            .lock()
            .await
            .keys()
            .map(|key| (key.server.clone(), key.name.clone()))
            .collect();
        keys.sort();
        keys
    }

    pub async fn len(&self) -> usize {
        self.views.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.views.lock().await.is_empty()
    }
}

/// The queue and topic view registries of one running system.
pub struct DestinationConfigurationViews {
    queues: ConfigurationViewRegistry,
    topics: ConfigurationViewRegistry,
}

impl Default for DestinationConfigurationViews {
    fn default() -> Self {
        Self::new()
    }
}

impl DestinationConfigurationViews {
    pub fn new() -> Self {
        Self {
            queues: ConfigurationViewRegistry::new(DestinationKind::Queue),
            topics: ConfigurationViewRegistry::new(DestinationKind::Topic),
        }
    }

    pub fn for_kind(&self, kind: DestinationKind) -> &ConfigurationViewRegistry {
        match kind {
            DestinationKind::Queue => &self.queues,
            DestinationKind::Topic => &self.topics,
        }
    }

    pub fn queues(&self) -> &ConfigurationViewRegistry {
        &self.queues
    }

    pub fn topics(&self) -> &ConfigurationViewRegistry {
        &self.topics
    }

    pub async fn is_empty(&self) -> bool {
        self.queues.is_empty().await && self.topics.is_empty().await
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigurationViewRegistry, DestinationConfigurationViews};
    use crate::model::destination::{DestinationConfig, DestinationKind};

    #[tokio::test]
    async fn register_then_unregister_round_trip() {
        let registry = ConfigurationViewRegistry::new(DestinationKind::Queue);
        let config = DestinationConfig::default()
            .with_entries(["jms/Q1"])
            .with_durable(true);

        assert!(
            registry
                .register_resource("app.war", "default", "Q1", config.clone())
                .await
        );
        assert_eq!(registry.read("default", "Q1").await, Some(config));
        assert_eq!(registry.owner("default", "Q1").await.as_deref(), Some("app.war"));

        assert!(registry.unregister_resource("app.war", "default", "Q1").await);
        assert!(registry.read("default", "Q1").await.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn unregistering_missing_view_is_a_no_op() {
        let registry = ConfigurationViewRegistry::new(DestinationKind::Topic);

        assert!(!registry.unregister_resource("app.war", "default", "T1").await);
        assert!(!registry.unregister_resource("app.war", "default", "T1").await);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn views_owned_by_another_deployment_are_left_alone() {
        let registry = ConfigurationViewRegistry::new(DestinationKind::Queue);
        let original = DestinationConfig::default().with_selector("color='red'");
        registry
            .register_resource("a.war", "default", "Q1", original.clone())
            .await;

        assert!(
            !registry
                .register_resource("b.war", "default", "Q1", DestinationConfig::default())
                .await
        );
        assert!(!registry.unregister_resource("b.war", "default", "Q1").await);
        assert_eq!(registry.read("default", "Q1").await, Some(original));
    }

    #[tokio::test]
    async fn views_are_split_by_kind() {
        let views = DestinationConfigurationViews::new();
        views
            .for_kind(DestinationKind::Topic)
            .register_resource("app.war", "default", "X", DestinationConfig::default())
            .await;

        assert_eq!(views.topics().keys().await, vec![("default".to_string(), "X".to_string())]);
        assert!(views.queues().read("default", "X").await.is_none());
        assert!(!views.is_empty().await);
    }
}
