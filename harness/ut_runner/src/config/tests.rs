use super::*;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use ut_report::{RunSummary, TestInfo};

fn config_from(vars: &[(&str, &str)]) -> Result<RunConfig, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    RunConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    assert_eq!(config_from(&[]).unwrap(), RunConfig::default());
    assert_eq!(RunConfig::default().format, OutputFormat::Human);
    assert_eq!(RunConfig::default().color, ColorMode::Auto);
}

#[test]
fn test_explicit_values() {
    let config = config_from(&[
        ("UT_OUTPUT", "teamcity"),
        ("UT_VERBOSE", "1"),
        ("UT_COLOR", "Never"),
    ])
    .unwrap();
    assert_eq!(
        config,
        RunConfig {
            format: OutputFormat::TeamCity,
            verbose: true,
            color: ColorMode::Never,
        }
    );
}

#[test]
fn test_teamcity_detected_from_agent() {
    let config = config_from(&[("TEAMCITY_VERSION", "2024.1")]).unwrap();
    assert_eq!(config.format, OutputFormat::TeamCity);

    let forced = config_from(&[("TEAMCITY_VERSION", "2024.1"), ("UT_OUTPUT", "human")]).unwrap();
    assert_eq!(forced.format, OutputFormat::Human);
}

#[test]
fn test_invalid_values() {
    assert_eq!(
        config_from(&[("UT_OUTPUT", "xml")]),
        Err(ConfigError::UnknownFormat("xml".to_string()))
    );
    assert_eq!(
        config_from(&[("UT_COLOR", "sometimes")]),
        Err(ConfigError::UnknownColorMode("sometimes".to_string()))
    );
    assert_eq!(
        config_from(&[("UT_VERBOSE", "yes please")]),
        Err(ConfigError::InvalidFlag {
            key: "UT_VERBOSE",
            value: "yes please".to_string(),
        })
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ConfigError::UnknownFormat("xml".to_string()).to_string(),
        "unknown output format `xml` (expected `human` or `teamcity`)"
    );
}

#[test]
fn test_format_aliases() {
    assert_eq!("normal".parse::<OutputFormat>(), Ok(OutputFormat::Human));
    assert_eq!(" TeamCity ".parse::<OutputFormat>(), Ok(OutputFormat::TeamCity));
}

#[test]
fn test_formatter_matches_format() {
    let summary = RunSummary {
        tests: 1,
        ..RunSummary::default()
    };
    let test = TestInfo::new("group", "test", "file", 1);

    let mut out = Vec::new();
    {
        let mut formatter = RunConfig::default().formatter(&mut out, false);
        formatter.test_started(&test);
        formatter.test_ended(&test, 0);
        formatter.run_ended(&summary);
    }
    assert_eq!(String::from_utf8(out).unwrap(), ".\nOK (1 tests, 0 ignored, 0 ms)\n");

    let teamcity = RunConfig {
        format: OutputFormat::TeamCity,
        ..RunConfig::default()
    };
    let mut out = Vec::new();
    {
        let mut formatter = teamcity.formatter(&mut out, false);
        formatter.test_started(&test);
    }
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "##teamcity[testStarted name='test']\n"
    );
}
