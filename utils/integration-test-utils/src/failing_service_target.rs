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

use crate::recording_service_target::{InstallRecord, RecordingServiceTarget};
use async_trait::async_trait;
use messaging_deployer::{
    QueueServiceRequest, RuntimeServiceTarget, ServiceInstallError, TopicServiceRequest,
};
use tracing::debug;

/// Rejects installs of one named destination and records every other install.
pub struct FailingServiceTarget {
    failing_destination: String,
    accepted: RecordingServiceTarget,
}

impl FailingServiceTarget {
    pub fn failing_on(destination: &str) -> Self {
        Self {
            failing_destination: destination.to_string(),
            accepted: RecordingServiceTarget::new(),
        }
    }

    pub async fn accepted(&self) -> Vec<InstallRecord> {
        self.accepted.records().await
    }

    fn check(&self, name: &str) -> Result<(), ServiceInstallError> {
        if name == self.failing_destination {
            debug!("failing install of {name}");
            return Err(ServiceInstallError::Rejected(format!(
                "installation of {name} refused"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RuntimeServiceTarget for FailingServiceTarget {
    async fn install_queue(&self, request: QueueServiceRequest) -> Result<(), ServiceInstallError> {
        self.check(&request.name)?;
        self.accepted.install_queue(request).await
    }

    async fn install_topic(&self, request: TopicServiceRequest) -> Result<(), ServiceInstallError> {
        self.check(&request.name)?;
        self.accepted.install_topic(request).await
    }
}
