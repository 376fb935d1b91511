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

//! Canonical structured field keys and value-format helpers.

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const DEPLOYER: &str = "deployer";
pub const DEPLOYMENT: &str = "deployment";
pub const OWNER: &str = "owner";
pub const SERVER: &str = "server";
pub const DESTINATION: &str = "destination";
pub const KIND: &str = "kind";
pub const ADDRESS: &str = "address";
pub const SERVICE: &str = "service";
pub const BINDINGS: &str = "bindings";
pub const COUNT: &str = "count";
pub const REASON: &str = "reason";
pub const ERR: &str = "err";

pub const NONE: &str = "none";
pub const REASON_ALREADY_DEPLOYED: &str = "already_deployed";
pub const REASON_NOT_DEPLOYED: &str = "not_deployed";
pub const REASON_NOT_REGISTERED: &str = "not_registered";
pub const REASON_OWNED_ELSEWHERE: &str = "owned_by_other_deployment";
pub const REASON_ROLLBACK_AFTER_FAILURE: &str = "rollback_after_deploy_failure";
pub const REASON_TRANSITION_INTERRUPTED: &str = "transition_interrupted";

/// Renders binding names as a comma separated list, or [`NONE`] when empty.
pub fn format_bindings(bindings: &[String]) -> String {
    if bindings.is_empty() {
        NONE.to_string()
    } else {
        bindings.join(",")
    }
}
