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

//! Contract of the runtime-service layer that materializes queue and topic services.

use crate::model::destination::DestinationKind;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MESSAGING_SERVICE_PREFIX: &str = "jboss.messaging.hornetq";

/// Dotted name identifying one runtime service.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Service name of the messaging server owning destinations, e.g.
    /// `jboss.messaging.hornetq.default`.
    pub fn messaging_server(server: &str) -> Self {
        Self(format!("{MESSAGING_SERVICE_PREFIX}.{server}"))
    }

    /// Service name of one destination below its server, e.g.
    /// `jboss.messaging.hornetq.default.jms.queue.Q1`.
    pub fn destination(server: &ServiceName, kind: DestinationKind, name: &str) -> Self {
        server.append(&["jms", kind.as_str(), name])
    }

    pub fn append(&self, parts: &[&str]) -> Self {
        let mut name = self.0.clone();
        for part in parts {
            name.push('.');
            name.push_str(part);
        }
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ServiceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueueServiceRequest {
    pub name: String,
    pub server: ServiceName,
    pub selector: Option<String>,
    pub durable: bool,
    pub bindings: Vec<String>,
}

impl QueueServiceRequest {
    pub fn service_name(&self) -> ServiceName {
        ServiceName::destination(&self.server, DestinationKind::Queue, &self.name)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TopicServiceRequest {
    pub name: String,
    pub server: ServiceName,
    pub bindings: Vec<String>,
}

impl TopicServiceRequest {
    pub fn service_name(&self) -> ServiceName {
        ServiceName::destination(&self.server, DestinationKind::Topic, &self.name)
    }
}

/// Failures reported by the runtime-service layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ServiceInstallError {
    AlreadyInstalled(ServiceName),
    UnknownServer(ServiceName),
    Rejected(String),
}

impl Display for ServiceInstallError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceInstallError::AlreadyInstalled(name) => {
                write!(f, "service {name} is already installed")
            }
            ServiceInstallError::UnknownServer(name) => {
                write!(f, "messaging server {name} is not available")
            }
            ServiceInstallError::Rejected(reason) => {
                write!(f, "service installation rejected: {reason}")
            }
        }
    }
}

impl Error for ServiceInstallError {}

/// Handle through which destinations are materialized as runtime services.
///
/// Calls complete once the service is installed or has failed; no retry is expected
/// from callers.
#[async_trait]
pub trait RuntimeServiceTarget: Send + Sync {
    async fn install_queue(&self, request: QueueServiceRequest) -> Result<(), ServiceInstallError>;

    async fn install_topic(&self, request: TopicServiceRequest) -> Result<(), ServiceInstallError>;
}
