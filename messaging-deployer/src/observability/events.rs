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

//! Canonical structured event names used across `messaging-deployer`.

// Resource tree events.
pub const RESOURCE_NODE_CREATE: &str = "resource_node_create";
pub const RESOURCE_NODE_REMOVE: &str = "resource_node_remove";

// Destination installer events.
pub const DESTINATION_INSTALL_START: &str = "destination_install_start";
pub const DESTINATION_INSTALL_OK: &str = "destination_install_ok";
pub const DESTINATION_INSTALL_FAILED: &str = "destination_install_failed";
pub const SERVICE_INSTALL_OK: &str = "service_install_ok";
pub const SERVICE_INSTALL_FAILED: &str = "service_install_failed";
pub const SCHEMA_LOOKUP_MISSING: &str = "schema_lookup_missing";
pub const SUB_MODEL_READY: &str = "sub_model_ready";

// Configuration-view events.
pub const CONFIGURATION_VIEW_REGISTER: &str = "configuration_view_register";
pub const CONFIGURATION_VIEW_CONFLICT: &str = "configuration_view_conflict";
pub const CONFIGURATION_VIEW_UNREGISTER: &str = "configuration_view_unregister";
pub const CONFIGURATION_VIEW_UNREGISTER_SKIPPED: &str = "configuration_view_unregister_skipped";

// Runtime-service registry events.
pub const SERVICE_SERVER_ADD: &str = "service_server_add";
pub const SERVICE_RELEASE: &str = "service_release";

// Deployment lifecycle events.
pub const DEPLOY_START: &str = "deploy_start";
pub const DEPLOY_OK: &str = "deploy_ok";
pub const DEPLOY_FAILED: &str = "deploy_failed";
pub const DEPLOY_ROLLBACK: &str = "deploy_rollback";
pub const UNDEPLOY_START: &str = "undeploy_start";
pub const UNDEPLOY_OK: &str = "undeploy_ok";
pub const UNDEPLOY_FAILED: &str = "undeploy_failed";

// Descriptor supplier events.
pub const DESCRIPTOR_LOAD_OK: &str = "descriptor_load_ok";
pub const DESCRIPTOR_LOAD_FAILED: &str = "descriptor_load_failed";
