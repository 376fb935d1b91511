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

//! Read-only schema of the management tree: which addresses are legal and what they expose.

use crate::model::path_address::{
    PathAddress, PathElement, HORNETQ_SERVER, JMS_QUEUE, JMS_TOPIC, MESSAGING_SUBSYSTEM,
    SUBSYSTEM,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Schema definition for one registered sub-model.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubModelDescriptor {
    description: String,
    attributes: Vec<String>,
}

impl SubModelDescriptor {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: &[&str]) -> Self {
        self.attributes = attributes.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }
}

#[derive(Default)]
struct RegistrationNode {
    descriptor: Option<Arc<SubModelDescriptor>>,
    children: BTreeMap<PathElement, RegistrationNode>,
}

impl RegistrationNode {
    /// Exact element first, then the wildcard registration for the same type-name.
    fn sub_registration(&self, element: &PathElement) -> Option<&RegistrationNode> {
        self.children
            .get(element)
            .or_else(|| self.children.get(&element.to_wildcard()))
    }
}

/// Index of registered sub-models keyed by (possibly wildcarded) path.
///
/// ```
/// use messaging_deployer::{ManagementRegistrationIndex, PathAddress, PathElement};
///
/// let index = ManagementRegistrationIndex::messaging_deployment();
/// let queue = PathAddress::new(vec![
///     PathElement::new("subsystem", "messaging"),
///     PathElement::new("hornetq-server", "default"),
///     PathElement::new("jms-queue", "Q1"),
/// ]);
///
/// assert!(index.lookup(&queue).is_some());
/// assert!(index
///     .lookup(&PathAddress::from(PathElement::new("subsystem", "web")))
///     .is_none());
/// ```
pub struct ManagementRegistrationIndex {
    root: RegistrationNode,
}

impl ManagementRegistrationIndex {
    pub fn builder() -> RegistrationIndexBuilder {
        RegistrationIndexBuilder::default()
    }

    /// Schema for the deployment-scoped messaging sub-model.
    pub fn messaging_deployment() -> Self {
        let subsystem = PathAddress::from(PathElement::new(SUBSYSTEM, MESSAGING_SUBSYSTEM));
        let server = subsystem.child(PathElement::wildcard(HORNETQ_SERVER));

        Self::builder()
            .register(
                &subsystem,
                SubModelDescriptor::new("Messaging resources contributed by a deployment"),
            )
            .register(
                &server,
                SubModelDescriptor::new("A messaging server referenced by a deployment"),
            )
            .register(
                &server.child(PathElement::wildcard(JMS_QUEUE)),
                SubModelDescriptor::new("A JMS queue defined by a deployment")
                    .with_attributes(&["entries", "durable", "selector"]),
            )
            .register(
                &server.child(PathElement::wildcard(JMS_TOPIC)),
                SubModelDescriptor::new("A JMS topic defined by a deployment")
                    .with_attributes(&["entries"]),
            )
            .build()
    }

    /// Returns the sub-model registered for `address`, or `None` when the schema does
    /// not know it. The empty address never has a descriptor.
    pub fn lookup(&self, address: &PathAddress) -> Option<Arc<SubModelDescriptor>> {
        let mut current = &self.root;
        for element in address {
            current = current.sub_registration(element)?;
        }
        current.descriptor.clone()
    }
}

#[derive(Default)]
pub struct RegistrationIndexBuilder {
    root: RegistrationNode,
}

impl RegistrationIndexBuilder {
    /// Registers `descriptor` at `address`, replacing any earlier registration there.
    /// Intermediate steps without their own registration stay unknown to [`lookup`].
    ///
    /// [`lookup`]: ManagementRegistrationIndex::lookup
    pub fn register(mut self, address: &PathAddress, descriptor: SubModelDescriptor) -> Self {
        let mut current = &mut self.root;
        for element in address {
            current = current.children.entry(element.clone()).or_default();
        }
        current.descriptor = Some(Arc::new(descriptor));
        self
    }

    pub fn build(self) -> ManagementRegistrationIndex {
        ManagementRegistrationIndex { root: self.root }
    }
}

#[cfg(test)]
mod tests {
    use super::{ManagementRegistrationIndex, SubModelDescriptor};
    use crate::model::path_address::{PathAddress, PathElement};

    fn address(elements: &[(&str, &str)]) -> PathAddress {
        elements
            .iter()
            .map(|(key, value)| PathElement::new(key, value))
            .collect()
    }

    #[test]
    fn messaging_schema_accepts_queues_and_topics_under_any_server() {
        let index = ManagementRegistrationIndex::messaging_deployment();

        let queue = index
            .lookup(&address(&[
                ("subsystem", "messaging"),
                ("hornetq-server", "live"),
                ("jms-queue", "orders"),
            ]))
            .expect("queue sub-model should be registered");
        let topic = index
            .lookup(&address(&[
                ("subsystem", "messaging"),
                ("hornetq-server", "backup"),
                ("jms-topic", "prices"),
            ]))
            .expect("topic sub-model should be registered");

        assert_eq!(queue.attributes(), ["entries", "durable", "selector"]);
        assert_eq!(topic.attributes(), ["entries"]);
    }

    #[test]
    fn messaging_schema_rejects_unknown_kinds_and_subsystems() {
        let index = ManagementRegistrationIndex::messaging_deployment();

        assert!(index
            .lookup(&address(&[
                ("subsystem", "messaging"),
                ("hornetq-server", "default"),
                ("connection-factory", "cf"),
            ]))
            .is_none());
        assert!(index
            .lookup(&address(&[
                ("hornetq-server", "default"),
                ("jms-queue", "Q1"),
            ]))
            .is_none());
        assert!(index.lookup(&PathAddress::empty()).is_none());
    }

    #[test]
    fn exact_registration_wins_over_wildcard() {
        let server = address(&[("hornetq-server", "*")]);
        let special = address(&[("hornetq-server", "special")]);
        let index = ManagementRegistrationIndex::builder()
            .register(&server, SubModelDescriptor::new("any server"))
            .register(&special, SubModelDescriptor::new("special server"))
            .build();

        let resolved = index.lookup(&special).expect("exact registration");
        let fallback = index
            .lookup(&address(&[("hornetq-server", "other")]))
            .expect("wildcard registration");

        assert_eq!(resolved.description(), "special server");
        assert_eq!(fallback.description(), "any server");
    }

    #[test]
    fn unregistered_intermediate_steps_are_unknown() {
        let index = ManagementRegistrationIndex::builder()
            .register(
                &address(&[("subsystem", "messaging"), ("hornetq-server", "*")]),
                SubModelDescriptor::new("server"),
            )
            .build();

        assert!(index.lookup(&address(&[("subsystem", "messaging")])).is_none());
        assert!(index
            .lookup(&address(&[("subsystem", "messaging"), ("hornetq-server", "x")]))
            .is_some());
    }
}
