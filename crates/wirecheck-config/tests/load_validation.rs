//! Config load validation tests for wirecheck-config.
// crates/wirecheck-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding, syntax).
// Purpose: Ensure config input handling is strict.
// =============================================================================

mod common;

use std::io::Write;
use std::path::Path;

use common::TestResult;
use common::assert_invalid;
use tempfile::NamedTempFile;
use wirecheck_config::WirecheckConfig;

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    assert_invalid(WirecheckConfig::load(Some(path)), "config path exceeds max length")?;
    Ok(())
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_invalid(WirecheckConfig::load(Some(path)), "config path component too long")?;
    Ok(())
}

#[test]
fn load_rejects_missing_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    assert_invalid(WirecheckConfig::load(Some(&path)), "config io error")?;
    Ok(())
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'a'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(WirecheckConfig::load(Some(file.path())), "config file exceeds size limit")?;
    Ok(())
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(WirecheckConfig::load(Some(file.path())), "config file must be utf-8")?;
    Ok(())
}

#[test]
fn load_rejects_unknown_keys() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[checks]\nstrict_mode = true\n").map_err(|err| err.to_string())?;
    assert_invalid(WirecheckConfig::load(Some(file.path())), "config parse error")?;
    Ok(())
}

#[test]
fn load_reads_checks_section() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[checks]\naccept_undefined_query = true\nignore_x_headers = true\n")
        .map_err(|err| err.to_string())?;
    let config = WirecheckConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    let options = config.check_options();
    if !options.accept_undefined_query || !options.ignore_x_headers {
        return Err(format!("unexpected options: {options:?}"));
    }
    if !options.check_bodies {
        return Err("check_bodies should default to true".to_string());
    }
    Ok(())
}
