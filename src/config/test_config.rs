use super::{Cache, Config, ConfigBox, Logs, Table, Workload};

/// Creates a new test configuration.
pub fn new_test_config() -> Config {
    Config {
        openhash: ConfigBox {
            env: super::TEST.to_string(),
            logs: Some(Logs {
                level: Some("debug".to_string()),
            }),
            table: Some(Table {
                initial_capacity: Some(64),
            }),
            cache: Some(Cache { max_size: 128 }),
            workload: Some(Workload {
                operations: 5_000,
                key_space: 500,
                seed: 7,
                threads: 2,
            }),
        },
    }
}
