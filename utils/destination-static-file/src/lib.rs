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

//! File-backed [`ParsedDestinationSupplier`]: one JSON5 descriptor file per parsed
//! destination set.
//!
//! ```json5
//! {
//!   topics: [ { name: "T1", entries: ["jms/T1"] } ],
//!   queues: [ { name: "Q1", server: "default", durable: true, selector: "priority>5" } ],
//! }
//! ```
//!
//! `server` defaults to `"default"`; `durable` and `selector` are accepted on queues only.

use async_trait::async_trait;
use messaging_deployer::observability::events;
use messaging_deployer::{
    Destination, DestinationConfig, ParsedDestinationSet, ParsedDestinationSupplier,
    SupplierError,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::{self, canonicalize};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

const COMPONENT: &str = "destination_static_file";

pub const DEFAULT_SERVER: &str = "default";

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DescriptorFile {
    #[serde(default)]
    topics: Vec<TopicEntry>,
    #[serde(default)]
    queues: Vec<QueueEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TopicEntry {
    name: String,
    #[serde(default = "default_server")]
    server: String,
    #[serde(default)]
    entries: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QueueEntry {
    name: String,
    #[serde(default = "default_server")]
    server: String,
    #[serde(default)]
    entries: Option<Vec<String>>,
    #[serde(default)]
    durable: Option<bool>,
    #[serde(default)]
    selector: Option<String>,
}

impl DescriptorFile {
    fn into_destination_set(self, path: &str) -> Result<ParsedDestinationSet, SupplierError> {
        let mut set = ParsedDestinationSet::new();

        for topic in self.topics {
            check_name(path, &topic.name, &topic.server)?;
            set.push(Destination::topic(
                &topic.name,
                &topic.server,
                DestinationConfig {
                    entries: topic.entries,
                    durable: None,
                    selector: None,
                },
            ));
        }
        for queue in self.queues {
            check_name(path, &queue.name, &queue.server)?;
            set.push(Destination::queue(
                &queue.name,
                &queue.server,
                DestinationConfig {
                    entries: queue.entries,
                    durable: queue.durable,
                    selector: queue.selector,
                },
            ));
        }
        Ok(set)
    }
}

fn check_name(path: &str, name: &str, server: &str) -> Result<(), SupplierError> {
    if name.trim().is_empty() || server.trim().is_empty() {
        return Err(SupplierError::Parse {
            path: path.to_string(),
            reason: "destination name and server must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Reads and parses one descriptor file.
pub fn load_descriptor(path: &Path) -> Result<ParsedDestinationSet, SupplierError> {
    let display_path = path.display().to_string();

    let canonical = canonicalize(path).map_err(|e| SupplierError::Read {
        path: display_path.clone(),
        reason: format!("descriptor file not found: {e}"),
    })?;
    debug!("reading descriptor file: {canonical:?}");

    let data = fs::read_to_string(&canonical).map_err(|e| SupplierError::Read {
        path: display_path.clone(),
        reason: e.to_string(),
    })?;

    let descriptor: DescriptorFile =
        json5::from_str(&data).map_err(|e| SupplierError::Parse {
            path: display_path.clone(),
            reason: e.to_string(),
        })?;

    descriptor.into_destination_set(&display_path)
}

/// Supplies each registered deployment with the destination sets parsed from its files.
#[derive(Clone, Debug, Default)]
pub struct DestinationStaticFile {
    descriptor_files: HashMap<String, Vec<PathBuf>>,
}

impl DestinationStaticFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the descriptor files of `deployment`, replacing earlier ones.
    pub fn with_deployment<I, P>(mut self, deployment: &str, descriptor_files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.descriptor_files.insert(
            deployment.to_string(),
            descriptor_files.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn deployments(&self) -> Vec<String> {
        let mut deployments: Vec<String> = self.descriptor_files.keys().cloned().collect();
        deployments.sort();
        deployments
    }
}

#[async_trait]
impl ParsedDestinationSupplier for DestinationStaticFile {
    async fn parsed_destinations(
        &self,
        deployment: &str,
    ) -> Result<Vec<ParsedDestinationSet>, SupplierError> {
        let Some(files) = self.descriptor_files.get(deployment) else {
            return Err(SupplierError::NotFound(deployment.to_string()));
        };

        let mut parse_results = Vec::with_capacity(files.len());
        for file in files {
            match load_descriptor(file) {
                Ok(set) => {
                    debug!(
                        event = events::DESCRIPTOR_LOAD_OK,
                        component = COMPONENT,
                        deployment,
                        path = %file.display(),
                        count = set.len(),
                        "loaded destination descriptor"
                    );
                    parse_results.push(set);
                }
                Err(err) => {
                    error!(
                        event = events::DESCRIPTOR_LOAD_FAILED,
                        component = COMPONENT,
                        deployment,
                        path = %file.display(),
                        err = %err,
                        "unable to load destination descriptor"
                    );
                    return Err(err);
                }
            }
        }
        Ok(parse_results)
    }
}

#[cfg(test)]
mod tests {
    use super::{load_descriptor, DestinationStaticFile};
    use messaging_deployer::{DestinationKind, ParsedDestinationSupplier, SupplierError};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn descriptor(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp descriptor");
        file.write_all(contents.as_bytes())
            .expect("write temp descriptor");
        file
    }

    #[test]
    fn descriptor_defaults_server_and_keeps_declared_order() {
        let file = descriptor(
            r#"{
                // comments and trailing commas are fine
                queues: [
                    { name: "Q2", durable: true, selector: "priority>5", entries: ["jms/Q2"] },
                    { name: "Q1", server: "backup" },
                ],
                topics: [ { name: "T1", entries: ["jms/T1", "java:/T1"] } ],
            }"#,
        );

        let set = load_descriptor(file.path()).expect("descriptor should parse");

        let order: Vec<(DestinationKind, &str, &str)> = set
            .iter()
            .map(|d| (d.kind(), d.server(), d.name()))
            .collect();
        assert_eq!(
            order,
            vec![
                (DestinationKind::Topic, "default", "T1"),
                (DestinationKind::Queue, "default", "Q2"),
                (DestinationKind::Queue, "backup", "Q1"),
            ]
        );
        let q2 = &set.queues()[0];
        assert!(q2.config().is_durable());
        assert_eq!(q2.config().selector(), Some("priority>5"));
        assert!(set.queues()[1].config().bindings().is_empty());
        assert_eq!(set.topics()[0].config().bindings(), vec!["jms/T1", "java:/T1"]);
    }

    #[test]
    fn topic_with_queue_only_attribute_is_a_parse_error() {
        let file = descriptor(r#"{ topics: [ { name: "T1", durable: true } ] }"#);

        assert!(matches!(
            load_descriptor(file.path()),
            Err(SupplierError::Parse { .. })
        ));
    }

    #[test]
    fn empty_destination_name_is_a_parse_error() {
        let file = descriptor(r#"{ queues: [ { name: " " } ] }"#);

        assert!(matches!(
            load_descriptor(file.path()),
            Err(SupplierError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let missing = PathBuf::from("/definitely/not/here/descriptor.json5");

        assert!(matches!(
            load_descriptor(&missing),
            Err(SupplierError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn supplier_yields_one_set_per_file_and_rejects_unknown_units() {
        let first = descriptor(r#"{ topics: [ { name: "T1" } ] }"#);
        let second = descriptor(r#"{ queues: [ { name: "Q1" }, { name: "Q2" } ] }"#);
        let supplier = DestinationStaticFile::new()
            .with_deployment("app.war", [first.path(), second.path()]);

        let sets = supplier.parsed_destinations("app.war").await.unwrap();
        assert_eq!(sets.iter().map(|set| set.len()).collect::<Vec<_>>(), vec![1, 2]);

        assert_eq!(
            supplier.parsed_destinations("other.war").await,
            Err(SupplierError::NotFound("other.war".to_string()))
        );
    }

    #[tokio::test]
    async fn bundled_sample_descriptor_parses() {
        let supplier = DestinationStaticFile::new().with_deployment(
            "app.war",
            [concat!(env!("CARGO_MANIFEST_DIR"), "/static-configs/app-jms.json5")],
        );

        let sets = supplier.parsed_destinations("app.war").await.unwrap();

        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].topics()[0].name(), "T1");
        assert_eq!(sets[0].queues()[0].name(), "Q1");
    }
}
