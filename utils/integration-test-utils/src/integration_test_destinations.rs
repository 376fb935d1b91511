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

use messaging_deployer::{Destination, DestinationConfig, ParsedDestinationSet};

pub const DEFAULT_SERVER: &str = "default";

/// Durable queue bound to `jms/<name>`.
pub fn queue_on(server: &str, name: &str) -> Destination {
    Destination::queue(
        name,
        server,
        DestinationConfig::default()
            .with_entries([format!("jms/{name}")])
            .with_durable(true),
    )
}

/// Topic bound to `jms/<name>`.
pub fn topic_on(server: &str, name: &str) -> Destination {
    Destination::topic(
        name,
        server,
        DestinationConfig::default().with_entries([format!("jms/{name}")]),
    )
}

pub fn destination_set(server: &str, topics: &[&str], queues: &[&str]) -> ParsedDestinationSet {
    let mut set = ParsedDestinationSet::new();
    for topic in topics {
        set.push(topic_on(server, topic));
    }
    for queue in queues {
        set.push(queue_on(server, queue));
    }
    set
}
