//! Built-in default catalog.
//!
//! Materialized and persisted when no catalog document exists yet.

use super::Catalog;
use crate::models::{metric, metric_values, pattern, scaling_metric, MetricRecord, Pattern, ScalingComparison};
use indexmap::IndexMap;

const REQ_PER_SEC: &str = "req/sec";
const SCALE_1_5: &str = "1-5 scale";

/// Standard (unit, description) for each performance metric
fn standard_metric_info(name: &str) -> (&'static str, &'static str) {
    match name {
        metric::THROUGHPUT => (REQ_PER_SEC, "Request processing rate under standard load"),
        metric::LATENCY => ("ms", "Average response time per request"),
        metric::AVAILABILITY => ("%", "System uptime percentage"),
        metric::RESOURCE_UTILIZATION => ("%", "Average CPU and memory utilization"),
        metric::FAULT_TOLERANCE => (SCALE_1_5, "Ability to handle component failures"),
        metric::ELASTICITY => (SCALE_1_5, "Ease of scaling to handle increased load"),
        metric::COST_EFFICIENCY => (SCALE_1_5, "Operating cost relative to performance"),
        metric::DATA_CONSISTENCY => (SCALE_1_5, "Maintaining data integrity across the system"),
        _ => ("", ""),
    }
}

/// Metrics map in `metric::ALL` order with standard units/descriptions
fn metrics(values: [f64; 8]) -> IndexMap<String, MetricRecord> {
    metric::ALL
        .iter()
        .zip(values)
        .map(|(name, value)| {
            let (unit, description) = standard_metric_info(name);
            (name.to_string(), MetricRecord::new(value, unit, description))
        })
        .collect()
}

/// Scaling before/after in `scaling_metric::ALL` order
fn scaling(before: [f64; 5], after: [f64; 5]) -> ScalingComparison {
    ScalingComparison {
        before: metric_values(scaling_metric::ALL.iter().copied().zip(before)),
        after: metric_values(scaling_metric::ALL.iter().copied().zip(after)),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The six research-based default patterns, in display order.
pub fn default_catalog() -> Catalog {
    let mut catalog = Catalog::new();

    catalog.insert(
        pattern::MONOLITHIC,
        Pattern {
            description: "A single-tiered software application where all components are interconnected and interdependent.".to_string(),
            characteristics: strings(&[
                "Single deployment unit",
                "Shared database",
                "Tightly coupled components",
                "Straightforward development",
            ]),
            metrics: metrics([750.0, 120.0, 99.5, 75.0, 3.0, 2.0, 4.0, 5.0]),
            scaling_comparison: scaling(
                [120.0, 750.0, 75.0, 6.0, 2.5],
                [180.0, 1200.0, 90.0, 12.0, 5.0],
            ),
            sources: strings(&[
                "Martin Fowler - 'Patterns of Enterprise Application Architecture'",
                "IEEE Software Architecture Standards",
                "Industry benchmarks from large-scale monolithic systems",
            ]),
        },
    );

    catalog.insert(
        pattern::MICROSERVICES,
        Pattern {
            description: "An architectural style that structures an application as a collection of loosely coupled services.".to_string(),
            characteristics: strings(&[
                "Independent, specialized services",
                "Distributed database architecture",
                "Independent deployment cycles",
                "Service-specific scaling",
            ]),
            metrics: metrics([1800.0, 150.0, 99.95, 60.0, 4.5, 4.8, 3.5, 3.2]),
            scaling_comparison: scaling(
                [150.0, 1800.0, 60.0, 8.0, 1.0],
                [165.0, 6500.0, 65.0, 12.0, 0.8],
            ),
            sources: strings(&[
                "Sam Newman - 'Building Microservices'",
                "Netflix Technology Blog - Microservices Architecture",
                "Martin Fowler - 'Microservices Resource Guide'",
            ]),
        },
    );

    let mut serverless_metrics = metrics([2500.0, 250.0, 99.99, 20.0, 4.7, 5.0, 4.5, 3.0]);
    if let Some(latency) = serverless_metrics.get_mut(metric::LATENCY) {
        latency.description = "Average response time per request (including cold starts)".to_string();
    }
    if let Some(cost) = serverless_metrics.get_mut(metric::COST_EFFICIENCY) {
        cost.description = "Operating cost relative to performance (pay per use)".to_string();
    }
    catalog.insert(
        pattern::SERVERLESS,
        Pattern {
            description: "A cloud computing execution model where the cloud provider runs the server, dynamically managing the allocation of machine resources.".to_string(),
            characteristics: strings(&[
                "No server management needed",
                "Auto-scaling built-in",
                "Pay-per-execution pricing",
                "Stateless functions",
            ]),
            metrics: serverless_metrics,
            scaling_comparison: scaling(
                [250.0, 2500.0, 20.0, 1.5, 0.8],
                [270.0, 8500.0, 22.0, 2.1, 0.6],
            ),
            sources: strings(&[
                "AWS Lambda Documentation",
                "Serverless Framework Best Practices",
                "Yan Cui - 'Production-Ready Serverless'",
                "Jeremy Daly - Serverless Architecture Patterns",
            ]),
        },
    );

    catalog.insert(
        pattern::EVENT_DRIVEN,
        Pattern {
            description: "A software architecture paradigm promoting the production, detection, consumption of, and reaction to events.".to_string(),
            characteristics: strings(&[
                "Asynchronous communication",
                "Loose coupling between components",
                "Event producers and consumers",
                "Event broker/message queue",
            ]),
            metrics: metrics([3200.0, 180.0, 99.9, 55.0, 4.5, 4.3, 3.8, 3.5]),
            scaling_comparison: scaling(
                [180.0, 3200.0, 55.0, 7.5, 1.2],
                [195.0, 7800.0, 60.0, 9.0, 0.9],
            ),
            sources: strings(&[
                "Gregor Hohpe - 'Enterprise Integration Patterns'",
                "Kafka Documentation - Event-Driven Design",
                "Martin Fowler - 'Event Sourcing Pattern'",
            ]),
        },
    );

    catalog.insert(
        pattern::PEER_TO_PEER,
        Pattern {
            description: "A distributed application architecture that partitions tasks or workloads between peers without central coordination.".to_string(),
            characteristics: strings(&[
                "Decentralized system design",
                "No single point of failure",
                "Shared resources among peers",
                "Direct communication between nodes",
            ]),
            metrics: metrics([900.0, 220.0, 99.8, 70.0, 4.8, 3.5, 4.2, 2.8]),
            scaling_comparison: scaling(
                [220.0, 900.0, 70.0, 9.0, 2.0],
                [195.0, 5500.0, 85.0, 14.0, 1.8],
            ),
            sources: strings(&[
                "Ian Foster - 'Designing and Building Parallel Programs'",
                "IPFS Documentation - Peer-to-Peer File System",
                "Bitcoin Whitepaper - Peer-to-Peer Electronic Cash System",
            ]),
        },
    );

    catalog.insert(
        pattern::SOA,
        Pattern {
            description: "A style of software design where services are provided to other components through communication protocols over a network.".to_string(),
            characteristics: strings(&[
                "Service contracts define interfaces",
                "Reusable services across applications",
                "Enterprise service bus for communication",
                "Business-oriented architectural approach",
            ]),
            metrics: metrics([1200.0, 190.0, 99.7, 65.0, 4.0, 3.5, 3.5, 4.0]),
            scaling_comparison: scaling(
                [190.0, 1200.0, 65.0, 8.0, 1.5],
                [210.0, 4800.0, 75.0, 11.0, 1.2],
            ),
            sources: strings(&[
                "Thomas Erl - 'SOA Principles of Service Design'",
                "Microsoft Documentation - Service-Oriented Architecture",
                "OASIS - SOA Reference Model",
            ]),
        },
    );

    catalog
}
