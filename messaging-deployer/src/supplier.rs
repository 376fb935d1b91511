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

//! Source of already-parsed destination descriptors for a deployment unit.

use crate::model::destination::ParsedDestinationSet;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SupplierError {
    /// No descriptors are known for the deployment.
    NotFound(String),
    Read { path: String, reason: String },
    Parse { path: String, reason: String },
}

impl Display for SupplierError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SupplierError::NotFound(deployment) => {
                write!(f, "no destination descriptors for deployment {deployment}")
            }
            SupplierError::Read { path, reason } => {
                write!(f, "unable to read descriptor {path}: {reason}")
            }
            SupplierError::Parse { path, reason } => {
                write!(f, "unable to parse descriptor {path}: {reason}")
            }
        }
    }
}

impl Error for SupplierError {}

/// Yields the parse results a deployment unit carries, one set per descriptor.
#[async_trait]
pub trait ParsedDestinationSupplier: Send + Sync {
    async fn parsed_destinations(
        &self,
        deployment: &str,
    ) -> Result<Vec<ParsedDestinationSet>, SupplierError>;
}
