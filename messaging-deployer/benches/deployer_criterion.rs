use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use integration_test_utils::{destination_set, DEFAULT_SERVER};
use messaging_deployer::{
    ManagementRegistrationIndex, MessagingDeployer, PathAddress, PathElement, ResourceTree,
    ServiceRegistry, HORNETQ_SERVER, JMS_QUEUE, MESSAGING_SUBSYSTEM, SUBSYSTEM,
};
use std::sync::Arc;
use tokio::runtime::Builder;

const TREE_ROWS: usize = 256;
const UNIT_DESTINATIONS: usize = 32;

fn queue_address(server: &str, queue: &str) -> PathAddress {
    PathAddress::new(vec![
        PathElement::new(SUBSYSTEM, MESSAGING_SUBSYSTEM),
        PathElement::new(HORNETQ_SERVER, server),
        PathElement::new(JMS_QUEUE, queue),
    ])
}

fn deployer_criterion(c: &mut Criterion) {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("benchmark runtime should build");

    let shared_addresses: Vec<PathAddress> = (0..TREE_ROWS)
        .map(|i| queue_address(DEFAULT_SERVER, &format!("Q{i}")))
        .collect();
    let disjoint_addresses: Vec<PathAddress> = (0..TREE_ROWS)
        .map(|i| queue_address(&format!("server-{i}"), "Q0"))
        .collect();

    let mut tree_group = c.benchmark_group("resource_tree");
    tree_group.bench_function("get_or_create_shared_server", |b| {
        b.iter_batched(
            ResourceTree::new,
            |tree| {
                for address in &shared_addresses {
                    black_box(runtime.block_on(tree.get_or_create(address)));
                }
            },
            BatchSize::SmallInput,
        );
    });
    tree_group.bench_function("get_or_create_disjoint_servers", |b| {
        b.iter_batched(
            ResourceTree::new,
            |tree| {
                for address in &disjoint_addresses {
                    black_box(runtime.block_on(tree.get_or_create(address)));
                }
            },
            BatchSize::SmallInput,
        );
    });
    let populated = ResourceTree::new();
    for address in &shared_addresses {
        runtime.block_on(populated.get_or_create(address));
    }
    tree_group.bench_function("get_or_create_existing", |b| {
        b.iter(|| {
            for address in &shared_addresses {
                black_box(runtime.block_on(populated.get_or_create(address)));
            }
        });
    });
    tree_group.finish();

    let topics: Vec<String> = (0..UNIT_DESTINATIONS / 2).map(|i| format!("T{i}")).collect();
    let queues: Vec<String> = (0..UNIT_DESTINATIONS / 2).map(|i| format!("Q{i}")).collect();
    let topic_refs: Vec<&str> = topics.iter().map(String::as_str).collect();
    let queue_refs: Vec<&str> = queues.iter().map(String::as_str).collect();

    let services = Arc::new(ServiceRegistry::new());
    runtime.block_on(services.add_server(DEFAULT_SERVER));
    let deployer = MessagingDeployer::new(
        "bench",
        ManagementRegistrationIndex::messaging_deployment(),
        services,
    );

    let mut lifecycle_group = c.benchmark_group("deployment_lifecycle");
    lifecycle_group.bench_function("deploy_undeploy_cycle", |b| {
        b.iter_batched(
            || vec![destination_set(DEFAULT_SERVER, &topic_refs, &queue_refs)],
            |parse_results| {
                runtime
                    .block_on(deployer.deploy("bench.war", parse_results))
                    .expect("deploy benchmark iteration should succeed");
                runtime
                    .block_on(deployer.undeploy("bench.war"))
                    .expect("undeploy benchmark iteration should succeed");
            },
            BatchSize::SmallInput,
        );
    });
    lifecycle_group.finish();
}

criterion_group!(benches, deployer_criterion);
criterion_main!(benches);
