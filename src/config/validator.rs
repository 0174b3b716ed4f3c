//! Configuration validation

use super::*;
use anyhow::Result;

/// Validate complete configuration
pub fn validate_config(config: &AnalysisConfig) -> Result<()> {
    if config.logs.is_empty() {
        anyhow::bail!("at least one log file is required");
    }

    validate_window(config)?;

    if config.workers == 0 {
        anyhow::bail!("workers must be at least 1, got 0");
    }

    validate_tracked_types(&config.tracked_types)?;

    Ok(())
}

/// Validate duration and warmup
fn validate_window(config: &AnalysisConfig) -> Result<()> {
    // Microbenchmark summaries carry their own throughput, no divisor needed
    if config.input_kind == InputKind::Transactions
        && !(config.duration_sec.is_finite() && config.duration_sec > 0.0)
    {
        anyhow::bail!(
            "duration must be a positive number of seconds (pass --duration), got {}",
            config.duration_sec
        );
    }

    if !(config.warmup_sec.is_finite() && config.warmup_sec >= 0.0) {
        anyhow::bail!("warmup must be zero or more seconds, got {}", config.warmup_sec);
    }

    if config.window && config.input_kind == InputKind::Microbench {
        anyhow::bail!("--window only applies to per-transaction logs");
    }

    Ok(())
}

/// Validate tracked workload codes
fn validate_tracked_types(types: &TrackedTypes) -> Result<()> {
    if types.follow == types.tweet {
        anyhow::bail!(
            "follow and tweet transaction types must differ, both are {}",
            types.follow
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AnalysisConfig {
        AnalysisConfig {
            logs: vec![PathBuf::from("client.log")],
            duration_sec: 60.0,
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_requires_logs() {
        let config = AnalysisConfig {
            logs: vec![],
            ..valid()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        for duration_sec in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = AnalysisConfig {
                duration_sec,
                ..valid()
            };
            assert!(validate_config(&config).is_err(), "{}", duration_sec);
        }
    }

    #[test]
    fn test_microbench_needs_no_duration() {
        let config = AnalysisConfig {
            duration_sec: 0.0,
            input_kind: InputKind::Microbench,
            ..valid()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_negative_warmup() {
        let config = AnalysisConfig {
            warmup_sec: -5.0,
            ..valid()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_workers() {
        let config = AnalysisConfig {
            workers: 0,
            ..valid()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_equal_tracked_types() {
        let config = AnalysisConfig {
            tracked_types: TrackedTypes { follow: 2, tweet: 2 },
            ..valid()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_window_for_microbench() {
        let config = AnalysisConfig {
            window: true,
            input_kind: InputKind::Microbench,
            ..valid()
        };
        assert!(validate_config(&config).is_err());
    }
}
