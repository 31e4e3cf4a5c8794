use ru_aggregate::prelude::*;
use ru_aggregate::{aggregate_groups, get_parallel_info, Number};
use std::io::Write;
use std::process::Command;
use std::sync::Arc;
use std::thread;
use tempfile::NamedTempFile;

fn ints(values: &[i64]) -> Vec<Number> {
    values.iter().copied().map(Number::from).collect()
}

fn registry() -> AggregatorRegistry {
    AggregatorRegistry::with_builtins().expect("built-in names are distinct")
}

/// Collections used for the property checks below
fn samples() -> Vec<Vec<Number>> {
    vec![
        ints(&[5, 3, 9, 3]),
        ints(&[42]),
        vec![Number::Integer(3), Number::Float(3.0), Number::Float(2.5)],
        vec![Number::Float(-1.25), Number::Integer(-7), Number::Float(1e9), Number::Integer(0)],
        (1..=101).map(Number::from).collect(),
    ]
}

/// Aggregator that always returns the first element
struct First;

impl Aggregator for First {
    fn name(&self) -> &str {
        "FIRST"
    }

    fn description(&self) -> &str {
        "First value as supplied"
    }

    fn compute(&self, values: Option<&[Number]>) -> Result<Number> {
        let values = ru_aggregate::aggregation::require_values(self.name(), values)?;
        Ok(values[0])
    }
}

#[test]
fn test_builtin_registry_contents() {
    let registry = registry();
    assert_eq!(
        registry.names(),
        vec!["AVG", "COUNT", "MAX", "MEDIAN", "MIN", "STDDEV", "SUM", "VARIANCE"]
    );
    assert_eq!(registry.len(), 8);
    assert!(!registry.is_empty());
    assert!(registry.contains("MIN"));
    assert!(!registry.contains("min"));
}

#[test]
fn test_resolve_and_aggregate() {
    let registry = registry();
    let values = ints(&[5, 3, 9, 3]);

    let min = registry.resolve("MIN").unwrap();
    assert_eq!(min.name(), "MIN");
    assert_eq!(min.compute(Some(values.as_slice())).unwrap(), Number::Integer(3));
    assert_eq!(registry.aggregate("MAX", Some(values.as_slice())).unwrap(), Number::Integer(9));
    assert_eq!(registry.aggregate("COUNT", Some(values.as_slice())).unwrap(), Number::Integer(4));
}

#[test]
fn test_resolve_unknown_name() {
    let registry = registry();
    match registry.resolve("BOGUS") {
        Err(AggregateError::NotFound { name, known }) => {
            assert_eq!(name, "BOGUS");
            assert_eq!(known, registry.names());
        }
        Err(other) => panic!("expected NotFound, got {other:?}"),
        Ok(_) => panic!("BOGUS must not resolve"),
    }

    // Lookup is case sensitive
    assert!(matches!(registry.resolve("min"), Err(AggregateError::NotFound { .. })));
}

#[test]
fn test_aggregate_propagates_errors_unchanged() {
    let registry = registry();

    assert!(matches!(
        registry.aggregate("MIN", Some(&[][..])),
        Err(AggregateError::InvalidInput { ref aggregator, .. }) if aggregator == "MIN"
    ));
    assert!(matches!(
        registry.aggregate("MIN", None),
        Err(AggregateError::InvalidInput { .. })
    ));
    assert_eq!(registry.aggregate("COUNT", Some(&[][..])).unwrap(), Number::Integer(0));
    assert!(matches!(
        registry.aggregate("BOGUS", Some(&[][..])),
        Err(AggregateError::NotFound { ref name, .. }) if name == "BOGUS"
    ));
}

#[test]
fn test_custom_aggregator_registration() {
    let registry = AggregatorRegistry::builder()
        .register_builtins()
        .unwrap()
        .register(Arc::new(First))
        .unwrap()
        .build();

    let values = ints(&[8, 1, 4]);
    assert_eq!(registry.aggregate("FIRST", Some(values.as_slice())).unwrap(), Number::Integer(8));
    assert_eq!(registry.len(), 9);
}

#[test]
fn test_duplicate_registration_is_configuration_error() {
    let result = RegistryBuilder::new()
        .register(Arc::new(First))
        .and_then(|builder| builder.register(Arc::new(First)));
    match result {
        Err(AggregateError::Configuration(message)) => assert!(message.contains("FIRST")),
        Err(other) => panic!("expected Configuration, got {other:?}"),
        Ok(_) => panic!("duplicate registration must fail"),
    }

    let twice = RegistryBuilder::new()
        .register_builtins()
        .and_then(RegistryBuilder::register_builtins);
    assert!(matches!(twice, Err(AggregateError::Configuration(_))));
}

#[test]
fn test_empty_registry() {
    let registry = RegistryBuilder::new().build();
    assert!(registry.is_empty());
    match registry.resolve("MIN") {
        Err(AggregateError::NotFound { known, .. }) => assert!(known.is_empty()),
        _ => panic!("empty registry must not resolve anything"),
    }
}

#[test]
fn test_min_max_bound_every_element() {
    let registry = registry();
    for values in samples() {
        let min = registry.aggregate("MIN", Some(values.as_slice())).unwrap();
        let max = registry.aggregate("MAX", Some(values.as_slice())).unwrap();
        for x in &values {
            assert!(min <= *x && *x <= max, "{min} <= {x} <= {max}");
        }
    }
}

#[test]
fn test_count_matches_size() {
    let registry = registry();
    for values in samples() {
        assert_eq!(
            registry.aggregate("COUNT", Some(values.as_slice())).unwrap(),
            Number::from(values.len())
        );
    }
}

#[test]
fn test_sum_equals_average_times_count() {
    let registry = registry();
    for values in samples() {
        let sum = registry.aggregate("SUM", Some(values.as_slice())).unwrap().to_f64();
        let avg = registry.aggregate("AVG", Some(values.as_slice())).unwrap().to_f64();
        let count = registry.aggregate("COUNT", Some(values.as_slice())).unwrap().to_f64();
        assert!((sum - avg * count).abs() <= 1e-9 * sum.abs().max(1.0));
    }
}

#[test]
fn test_idempotent_and_order_independent() {
    let registry = registry();
    for values in samples() {
        let mut permuted = values.clone();
        permuted.reverse();
        permuted.rotate_left(values.len() / 2);

        for name in registry.names() {
            let first = registry.aggregate(&name, Some(values.as_slice())).unwrap();
            let again = registry.aggregate(&name, Some(values.as_slice())).unwrap();
            let shuffled = registry.aggregate(&name, Some(permuted.as_slice())).unwrap();
            assert_eq!(first, again, "{name} drifted between runs");
            if name == "STDDEV" || name == "VARIANCE" || name == "AVG" {
                assert!((first.to_f64() - shuffled.to_f64()).abs() <= 1e-9 * first.to_f64().abs().max(1.0));
            } else {
                assert_eq!(first, shuffled, "{name} depends on input order");
            }
        }
    }
}

#[test]
fn test_input_not_mutated() {
    let registry = registry();
    let values = ints(&[5, 3, 9, 3]);
    let before = values.clone();
    for name in registry.names() {
        registry.aggregate(&name, Some(values.as_slice())).unwrap();
    }
    assert_eq!(values, before);
    assert!(values.iter().zip(&before).all(|(a, b)| a.is_integer() == b.is_integer()));
}

#[test]
fn test_summarize() {
    let registry = registry();
    let summary = registry.summarize(Some(ints(&[1, 2, 3]).as_slice()));
    assert_eq!(summary.len(), registry.len());
    let (name, result) = &summary[0];
    assert_eq!(name, "AVG");
    assert_eq!(*result.as_ref().unwrap(), Number::Float(2.0));

    let empty = registry.summarize(Some(&[][..]));
    for (name, result) in empty {
        if name == "COUNT" {
            assert_eq!(result.unwrap(), Number::Integer(0));
        } else {
            assert!(matches!(result, Err(AggregateError::InvalidInput { .. })));
        }
    }
}

#[test]
fn test_concurrent_dispatch() {
    let registry = Arc::new(registry());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let values: Vec<Number> = (0..=(t * 10)).map(Number::from).collect();
                for _ in 0..100 {
                    let max = registry.aggregate("MAX", Some(values.as_slice())).unwrap();
                    assert_eq!(max, Number::from(t * 10));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
}

#[test]
fn test_aggregate_groups() {
    let registry = registry();
    let groups = vec![ints(&[5, 3, 9]), Vec::new(), ints(&[7]), ints(&[-1, -2])];

    let results = aggregate_groups(&registry, "MIN", &groups).unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(*results[0].as_ref().unwrap(), Number::Integer(3));
    assert!(matches!(results[1], Err(AggregateError::InvalidInput { .. })));
    assert_eq!(*results[2].as_ref().unwrap(), Number::Integer(7));
    assert_eq!(*results[3].as_ref().unwrap(), Number::Integer(-2));

    let counts = aggregate_groups(&registry, "COUNT", &groups).unwrap();
    assert_eq!(*counts[1].as_ref().unwrap(), Number::Integer(0));

    assert!(matches!(
        aggregate_groups(&registry, "BOGUS", &groups),
        Err(AggregateError::NotFound { .. })
    ));
}

#[test]
fn test_aggregate_groups_on_dedicated_pool() {
    let registry = registry();
    let groups: Vec<Vec<Number>> = (1..=50).map(|n| (1..=n).map(Number::from).collect()).collect();

    let pool = ParallelConfig::with_threads(2).build_pool().unwrap();
    let sums = pool.install(|| aggregate_groups(&registry, "SUM", &groups)).unwrap();
    for (i, sum) in sums.into_iter().enumerate() {
        let n = (i + 1) as i64;
        assert_eq!(sum.unwrap(), Number::Integer(n * (n + 1) / 2));
    }
}

#[test]
fn test_parallel_config() {
    let default_config = ParallelConfig::new_default();
    assert!(default_config.num_threads.is_none());
    assert!(default_config.current_threads() > 0);

    let config_4 = ParallelConfig::with_threads(4);
    assert_eq!(config_4.num_threads, Some(4));

    let all_cores_config = ParallelConfig::all_cores();
    assert!(all_cores_config.num_threads.unwrap() > 0);

    assert!(matches!(
        ParallelConfig::with_threads(0).build_pool(),
        Err(AggregateError::ThreadPool(_))
    ));
    assert!(ParallelConfig::new(None).setup_global_pool().is_ok());
}

#[test]
fn test_parallel_info() {
    let info = get_parallel_info();
    assert!(info.current_threads > 0);
    assert!(info.available_cores > 0);
    assert!(info.available_parallelism > 0);

    // Logging without a subscriber is a no-op
    info.log_info();
}

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ru-aggregate"))
}

#[test]
fn test_cli_aggregate_inline_values() {
    let output = cli().args(["--aggregate", "MIN", "--values", "5,3,9,3"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "MIN: 3");
}

#[test]
fn test_cli_aggregate_from_file_as_json() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "1\n2\n3\n4").unwrap();

    let output = cli()
        .args(["--aggregate", "MEDIAN", "--json", "--file"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["aggregator"], "MEDIAN");
    assert_eq!(parsed["result"], 2.5);
}

#[test]
fn test_cli_failures() {
    let unknown = cli().args(["--aggregate", "BOGUS", "--values", "1"]).output().unwrap();
    assert!(!unknown.status.success());
    assert!(String::from_utf8_lossy(&unknown.stderr).contains("BOGUS"));

    let bad_value = cli().args(["--aggregate", "SUM", "--values", "1,two"]).output().unwrap();
    assert!(!bad_value.status.success());
    assert!(String::from_utf8_lossy(&bad_value.stderr).contains("two"));

    let missing = cli().args(["--aggregate", "MIN"]).output().unwrap();
    assert!(!missing.status.success());
}

#[test]
fn test_cli_list_and_summary() {
    let list = cli().arg("--list").output().unwrap();
    assert!(list.status.success());
    let stdout = String::from_utf8_lossy(&list.stdout);
    for name in ["MIN", "MAX", "SUM", "AVG", "COUNT", "MEDIAN", "STDDEV", "VARIANCE"] {
        assert!(stdout.contains(name), "missing {name} in --list output");
    }

    let summary = cli().args(["--summary", "--json", "--values", "1,2,3"]).output().unwrap();
    assert!(summary.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&summary.stdout).unwrap();
    assert_eq!(parsed["SUM"], 6);
    assert_eq!(parsed["AVG"], 2.0);
    assert_eq!(parsed["COUNT"], 3);
}
