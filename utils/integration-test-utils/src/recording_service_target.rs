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

use async_trait::async_trait;
use messaging_deployer::{
    DestinationKind, QueueServiceRequest, RuntimeServiceTarget, ServiceInstallError,
    TopicServiceRequest,
};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// One accepted install call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstallRecord {
    pub kind: DestinationKind,
    pub server: String,
    pub name: String,
    pub bindings: Vec<String>,
}

/// Accepts every install and remembers the calls in arrival order.
#[derive(Default)]
pub struct RecordingServiceTarget {
    records: Mutex<Vec<InstallRecord>>,
    queue_requests: Mutex<Vec<QueueServiceRequest>>,
    install_delay: Option<Duration>,
}

impl RecordingServiceTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleeps for `delay` inside every install call, letting other tasks interleave.
    pub fn with_install_delay(delay: Duration) -> Self {
        Self {
            install_delay: Some(delay),
            ..Self::default()
        }
    }

    pub async fn records(&self) -> Vec<InstallRecord> {
        self.records.lock().await.clone()
    }

    pub async fn queue_requests(&self) -> Vec<QueueServiceRequest> {
        self.queue_requests.lock().await.clone()
    }

    /// `"<kind>:<name>"` for every install, in arrival order.
    pub async fn install_order(&self) -> Vec<String> {
        self.records
            .lock()
            .await
            .iter()
            .map(|record| format!("{}:{}", record.kind, record.name))
            .collect()
    }

    async fn record(&self, record: InstallRecord) {
        if let Some(delay) = self.install_delay {
            tokio::time::sleep(delay).await;
        }
        debug!("recording {} install: {}", record.kind, record.name);
        self.records.lock().await.push(record);
    }
}

#[async_trait]
impl RuntimeServiceTarget for RecordingServiceTarget {
    async fn install_queue(&self, request: QueueServiceRequest) -> Result<(), ServiceInstallError> {
        self.record(InstallRecord {
            kind: DestinationKind::Queue,
            server: request.server.to_string(),
            name: request.name.clone(),
            bindings: request.bindings.clone(),
        })
        .await;
        self.queue_requests.lock().await.push(request);
        Ok(())
    }

    async fn install_topic(&self, request: TopicServiceRequest) -> Result<(), ServiceInstallError> {
        self.record(InstallRecord {
            kind: DestinationKind::Topic,
            server: request.server.to_string(),
            name: request.name,
            bindings: request.bindings,
        })
        .await;
        Ok(())
    }
}
