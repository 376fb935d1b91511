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

//! Queue/topic descriptors as handed over by the descriptor parser.

use crate::model::path_address::{PathAddress, PathElement, HORNETQ_SERVER, JMS_QUEUE, JMS_TOPIC};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationKind {
    Queue,
    Topic,
}

impl DestinationKind {
    /// Type-name of the management path element for this kind.
    pub fn element_key(&self) -> &'static str {
        match self {
            DestinationKind::Queue => JMS_QUEUE,
            DestinationKind::Topic => JMS_TOPIC,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationKind::Queue => "queue",
            DestinationKind::Topic => "topic",
        }
    }
}

impl Display for DestinationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved destination configuration.
///
/// `durable` and `selector` are only meaningful for queues.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DestinationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
}

impl DestinationConfig {
    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries = Some(entries.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_durable(mut self, durable: bool) -> Self {
        self.durable = Some(durable);
        self
    }

    pub fn with_selector(mut self, selector: &str) -> Self {
        self.selector = Some(selector.to_string());
        self
    }

    /// External binding names. An absent `entries` attribute means no bindings.
    pub fn bindings(&self) -> Vec<String> {
        self.entries.clone().unwrap_or_default()
    }

    pub fn is_durable(&self) -> bool {
        self.durable.unwrap_or(false)
    }

    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }
}

/// A queue or topic owned by one messaging server.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Destination {
    name: String,
    server: String,
    kind: DestinationKind,
    config: DestinationConfig,
}

impl Destination {
    pub fn new(kind: DestinationKind, name: &str, server: &str, config: DestinationConfig) -> Self {
        Self {
            name: name.to_string(),
            server: server.to_string(),
            kind,
            config,
        }
    }

    pub fn queue(name: &str, server: &str, config: DestinationConfig) -> Self {
        Self::new(DestinationKind::Queue, name, server, config)
    }

    pub fn topic(name: &str, server: &str, config: DestinationConfig) -> Self {
        Self::new(DestinationKind::Topic, name, server, config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn kind(&self) -> DestinationKind {
        self.kind
    }

    pub fn config(&self) -> &DestinationConfig {
        &self.config
    }

    pub fn server_element(&self) -> PathElement {
        PathElement::new(HORNETQ_SERVER, &self.server)
    }

    pub fn destination_element(&self) -> PathElement {
        PathElement::new(self.kind.element_key(), &self.name)
    }

    /// `(hornetq-server=<server>, jms-queue|jms-topic=<name>)`, relative to the subsystem node.
    pub fn registration_address(&self) -> PathAddress {
        PathAddress::new(vec![self.server_element(), self.destination_element()])
    }
}

/// Destinations parsed from one deployment descriptor, in declaration order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParsedDestinationSet {
    topics: Vec<Destination>,
    queues: Vec<Destination>,
}

impl ParsedDestinationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a destination to the list matching its kind.
    pub fn push(&mut self, destination: Destination) {
        match destination.kind() {
            DestinationKind::Queue => self.queues.push(destination),
            DestinationKind::Topic => self.topics.push(destination),
        }
    }

    pub fn with(mut self, destination: Destination) -> Self {
        self.push(destination);
        self
    }

    pub fn topics(&self) -> &[Destination] {
        &self.topics
    }

    pub fn queues(&self) -> &[Destination] {
        &self.queues
    }

    /// Topics first, then queues, each in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.topics.iter().chain(self.queues.iter())
    }

    pub fn len(&self) -> usize {
        self.topics.len() + self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty() && self.queues.is_empty()
    }
}
