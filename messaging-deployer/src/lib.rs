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

//! # messaging-deployer
//!
//! `messaging-deployer` keeps a path-addressed management tree and installs the JMS
//! queues and topics carried by deployment units into it.
//!
//! Typical usage goes through [`MessagingDeployer`]: register the messaging servers in a
//! [`ServiceRegistry`], then deploy and undeploy units by name.
//!
//! ```
//! use std::sync::Arc;
//! use messaging_deployer::{
//!     Destination, DestinationConfig, ManagementRegistrationIndex, MessagingDeployer,
//!     ParsedDestinationSet, PathAddress, PathElement, ServiceRegistry,
//! };
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let services = Arc::new(ServiceRegistry::new());
//! services.add_server("default").await;
//!
//! let deployer = MessagingDeployer::new(
//!     "quick-start",
//!     ManagementRegistrationIndex::messaging_deployment(),
//!     services,
//! );
//!
//! let destinations = ParsedDestinationSet::new()
//!     .with(Destination::queue(
//!         "Q1",
//!         "default",
//!         DestinationConfig::default().with_entries(["jms/Q1"]).with_durable(true),
//!     ))
//!     .with(Destination::topic(
//!         "T1",
//!         "default",
//!         DestinationConfig::default().with_entries(["jms/T1"]),
//!     ));
//!
//! deployer.deploy("app.war", vec![destinations]).await.unwrap();
//!
//! let queue = PathAddress::new(vec![
//!     PathElement::new("deployment", "app.war"),
//!     PathElement::new("subsystem", "messaging"),
//!     PathElement::new("hornetq-server", "default"),
//!     PathElement::new("jms-queue", "Q1"),
//! ]);
//! assert!(deployer.read_resource(&queue).await.is_some());
//! assert!(deployer.queue_configuration("default", "Q1").await.is_some());
//!
//! // Deploying the same unit twice fails; undeploying removes everything again.
//! assert!(deployer.deploy("app.war", Vec::new()).await.is_err());
//! deployer.undeploy("app.war").await.unwrap();
//! assert!(deployer.read_resource(&queue).await.is_none());
//! assert!(deployer.undeploy("app.war").await.is_err());
//! # });
//! ```
//!
//! ## Internal architecture map
//!
//! - Model: path elements/addresses and destination descriptors
//! - Management: the shared resource tree and the read-only registration index
//! - Runtime: service-target contract, in-process service registry, configuration views
//! - Control plane: per-destination installation and deployment-unit lifecycle
//! - API facade: [`MessagingDeployer`]
//!
//! ## Concurrency model
//!
//! Every [`ResourceNode`] guards its own child map with a `tokio::sync::Mutex`.
//! `get_or_create` walks the path one node at a time, so creating a child is atomic
//! per parent and work on disjoint branches never contends.
//!
//! [`MessagingDeployer`] runs each deploy and undeploy on a spawned tokio task, so the
//! facade must be driven from inside a tokio runtime. Dropping the caller's future does
//! not stop a transition that has already started.
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events.
//! Library code emits events and does not initialize a global subscriber. Binaries and
//! tests are responsible for one-time `tracing_subscriber` initialization.

mod control_plane;
pub use control_plane::deployment_coordinator::{DeployError, DeploymentLifecycleCoordinator};
pub use control_plane::deployment_unit::DeploymentUnit;
pub use control_plane::destination_installer::{
    subsystem_address, DestinationInstaller, InstallError,
};

mod deployer;
pub use deployer::{deployment_address, MessagingDeployer};

mod management;
pub use management::registration_index::{
    ManagementRegistrationIndex, RegistrationIndexBuilder, SubModelDescriptor,
};
pub use management::resource_tree::{ResourceNode, ResourceTree};

mod model;
pub use model::destination::{Destination, DestinationConfig, DestinationKind, ParsedDestinationSet};
pub use model::path_address::{
    PathAddress, PathElement, DEPLOYMENT, HORNETQ_SERVER, JMS_QUEUE, JMS_TOPIC,
    MESSAGING_SUBSYSTEM, SUBSYSTEM, WILDCARD_VALUE,
};

#[doc(hidden)]
pub mod observability;

mod runtime;
pub use runtime::configuration_view::{ConfigurationViewRegistry, DestinationConfigurationViews};
pub use runtime::service_registry::{DeploymentServiceTarget, InstalledService, ServiceRegistry};
pub use runtime::service_target::{
    QueueServiceRequest, RuntimeServiceTarget, ServiceInstallError, ServiceName,
    TopicServiceRequest,
};

mod supplier;
pub use supplier::{ParsedDestinationSupplier, SupplierError};
