mod common;

use std::fs;
use std::process::Command;
use std::str::FromStr;
use assert_cmd::prelude::OutputAssertExt;
use eda::kicad::symbol_lib::SymbolLib;
use indoc::indoc;
use predicates::prelude::*;
use tempfile::tempdir;
use util::test::{build_temp_csv_file, build_temp_file, print, write_temp_file};
use crate::common::{write_parts, TestPartRecord, BASE_LIBRARY};

#[test]
fn generate() -> Result<(), anyhow::Error> {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_partgen"));

    // and
    let temp_dir = tempdir()?;

    let (test_parts_path, test_parts_file_name) = build_temp_csv_file(&temp_dir, "parts");
    write_parts(&test_parts_path, &[
        TestPartRecord::new("R0603", "R0603_10k").with_value("10k").with_footprint("Resistor_SMD:R_0603").with_brand("Yageo"),
        TestPartRecord::new("L0603", "L0603_1u"),
        TestPartRecord::new("C0603", "").with_value("1u"),
        TestPartRecord::new("C0603", "C0603_100n").with_value("100n"),
    ])?;

    let (_test_library_path, test_library_file_name) = write_temp_file(&temp_dir, "base_symbols", "kicad_sym", BASE_LIBRARY)?;
    let (test_settings_path, test_settings_file_name) = build_temp_file(&temp_dir, "settings", "txt");

    let output_dir = temp_dir.path().join("out");
    fs::create_dir(&output_dir)?;

    // and
    let settings_arg = format!("--settings={}", test_settings_file_name.to_str().unwrap());
    let parts_arg = format!("--parts={}", test_parts_file_name.to_str().unwrap());
    let library_arg = format!("--library={}", test_library_file_name.to_str().unwrap());
    let output_dir_arg = format!("--output-dir={}", output_dir.to_str().unwrap());

    let expected_output_path = output_dir.join("parts.kicad_sym");

    // when
    cmd.args([
        settings_arg.as_str(),
        "generate",
        parts_arg.as_str(),
        library_arg.as_str(),
        output_dir_arg.as_str(),
    ])
        // then
        .assert()
        .success()
        .stdout(print("stdout")
            .and(predicate::str::contains("Loaded 4 rows\n"))
            .and(predicate::str::contains("Loaded 2 symbols\n"))
            .and(predicate::str::contains("Row 1: R0603_10k (from R0603)\n"))
            .and(predicate::str::contains("Footprint: 'Resistor_SMD:R_0603' (hidden)\n"))
            .and(predicate::str::contains("Row 2: ERROR: Skipped - Template not found. symbol: 'L0603'.\n"))
            .and(predicate::str::contains("Row 3: ERROR: Skipped - Missing required field. field: 'Part'.\n"))
            .and(predicate::str::contains("Row 4: C0603_100n (from C0603)\n"))
            .and(predicate::str::contains(format!("Created symbol library. symbols: 2, path: {}\n", expected_output_path.display())))
        );

    // and
    let library = SymbolLib::from_str(&fs::read_to_string(&expected_output_path)?)?;
    assert_eq!(library.version, "20231120");

    let names: Vec<_> = library.symbols.iter().map(|symbol| symbol.entry_name()).collect();
    assert_eq!(names, vec!["R0603_10k", "C0603_100n"]);

    let resistor = &library.symbols[0];
    assert_eq!(resistor.find_property("Value").unwrap().value(), "10k");
    assert_eq!(resistor.find_property("Brand").unwrap().value(), "Yageo");
    assert!(resistor.find_property("Brand").unwrap().is_hidden());
    assert_eq!(resistor.units().map(|unit| unit.name()).collect::<Vec<_>>(), vec!["R0603_10k_0_1"]);

    // and the output directory is remembered
    assert_eq!(fs::read_to_string(test_settings_path)?, output_dir.to_str().unwrap());

    Ok(())
}

#[test]
fn generate_with_remembered_output_directory() -> Result<(), anyhow::Error> {
    // given
    let temp_dir = tempdir()?;

    let (test_parts_path, test_parts_file_name) = build_temp_csv_file(&temp_dir, "resistors");
    write_parts(&test_parts_path, &[
        TestPartRecord::new("R0603", "R0603_1k").with_value("1k"),
    ])?;

    let (_test_library_path, test_library_file_name) = write_temp_file(&temp_dir, "base_symbols", "kicad_sym", BASE_LIBRARY)?;
    let (_test_settings_path, test_settings_file_name) = build_temp_file(&temp_dir, "settings", "txt");

    let output_dir = temp_dir.path().join("remembered");
    fs::create_dir(&output_dir)?;

    let settings_arg = format!("--settings={}", test_settings_file_name.to_str().unwrap());
    let output_dir_arg = format!("--path={}", output_dir.to_str().unwrap());

    // and
    Command::new(env!("CARGO_BIN_EXE_partgen"))
        .args([settings_arg.as_str(), "set-output-dir", output_dir_arg.as_str()])
        .assert()
        .success();

    // and
    let parts_arg = format!("--parts={}", test_parts_file_name.to_str().unwrap());
    let library_arg = format!("--library={}", test_library_file_name.to_str().unwrap());

    // when
    Command::new(env!("CARGO_BIN_EXE_partgen"))
        .args([settings_arg.as_str(), "generate", parts_arg.as_str(), library_arg.as_str()])
        // then
        .assert()
        .success()
        .stdout(print("stdout")
            .and(predicate::str::contains("Created symbol library. symbols: 1"))
        );

    // and
    assert!(output_dir.join("resistors.kicad_sym").exists());

    Ok(())
}

#[test]
fn generate_without_usable_rows() -> Result<(), anyhow::Error> {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_partgen"));

    // and
    let temp_dir = tempdir()?;

    let (test_parts_path, test_parts_file_name) = build_temp_csv_file(&temp_dir, "parts");
    write_parts(&test_parts_path, &[
        TestPartRecord::new("", "X_1"),
        TestPartRecord::new("X", "X_2"),
    ])?;

    let (_test_library_path, test_library_file_name) = write_temp_file(&temp_dir, "base_symbols", "kicad_sym", BASE_LIBRARY)?;
    let (_test_settings_path, test_settings_file_name) = build_temp_file(&temp_dir, "settings", "txt");

    let settings_arg = format!("--settings={}", test_settings_file_name.to_str().unwrap());
    let parts_arg = format!("--parts={}", test_parts_file_name.to_str().unwrap());
    let library_arg = format!("--library={}", test_library_file_name.to_str().unwrap());
    let output_dir_arg = format!("--output-dir={}", temp_dir.path().to_str().unwrap());

    // when
    cmd.args([settings_arg.as_str(), "generate", parts_arg.as_str(), library_arg.as_str(), output_dir_arg.as_str()])
        // then
        .assert()
        .success()
        .stdout(print("stdout")
            .and(predicate::str::contains("Row 1: ERROR: Skipped - Missing required field. field: 'Symbol'.\n"))
            .and(predicate::str::contains("Row 2: ERROR: Skipped - Template not found. symbol: 'X'.\n"))
            .and(predicate::str::contains("No symbols were copied or created.\n"))
        );

    // and
    assert!(!temp_dir.path().join("parts.kicad_sym").exists());

    Ok(())
}

#[test]
fn generate_without_output_directory() -> Result<(), anyhow::Error> {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_partgen"));

    // and
    let temp_dir = tempdir()?;

    let (test_parts_path, test_parts_file_name) = build_temp_csv_file(&temp_dir, "parts");
    write_parts(&test_parts_path, &[TestPartRecord::new("R0603", "R0603_1k")])?;

    let (_test_settings_path, test_settings_file_name) = build_temp_file(&temp_dir, "settings", "txt");

    let settings_arg = format!("--settings={}", test_settings_file_name.to_str().unwrap());
    let parts_arg = format!("--parts={}", test_parts_file_name.to_str().unwrap());

    // when
    cmd.args([settings_arg.as_str(), "generate", parts_arg.as_str()])
        // then
        .assert()
        .failure()
        .stderr(print("stderr")
            .and(predicate::str::contains("No output directory selected"))
        );

    Ok(())
}

#[test]
fn generate_with_missing_library() -> Result<(), anyhow::Error> {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_partgen"));

    // and
    let temp_dir = tempdir()?;

    let (test_parts_path, test_parts_file_name) = build_temp_csv_file(&temp_dir, "parts");
    write_parts(&test_parts_path, &[TestPartRecord::new("R0603", "R0603_1k")])?;

    let (_test_settings_path, test_settings_file_name) = build_temp_file(&temp_dir, "settings", "txt");
    let (_test_library_path, test_library_file_name) = build_temp_file(&temp_dir, "missing", "kicad_sym");

    let settings_arg = format!("--settings={}", test_settings_file_name.to_str().unwrap());
    let parts_arg = format!("--parts={}", test_parts_file_name.to_str().unwrap());
    let library_arg = format!("--library={}", test_library_file_name.to_str().unwrap());
    let output_dir_arg = format!("--output-dir={}", temp_dir.path().to_str().unwrap());

    // when
    cmd.args([settings_arg.as_str(), "generate", parts_arg.as_str(), library_arg.as_str(), output_dir_arg.as_str()])
        // then
        .assert()
        .failure()
        .stderr(print("stderr")
            .and(predicate::str::contains("Unable to load symbol library."))
        );

    Ok(())
}

#[test]
fn show_output_dir() -> Result<(), anyhow::Error> {
    // given
    let temp_dir = tempdir()?;
    let (_test_settings_path, test_settings_file_name) = write_temp_file(&temp_dir, "settings", "txt", "/tmp/symbols\n")?;

    let settings_arg = format!("--settings={}", test_settings_file_name.to_str().unwrap());

    // when
    Command::new(env!("CARGO_BIN_EXE_partgen"))
        .args([settings_arg.as_str(), "show-output-dir"])
        // then
        .assert()
        .success()
        .stdout(predicate::str::contains("Output directory: /tmp/symbols\n"));

    Ok(())
}

#[test]
fn arguments_from_file() -> Result<(), anyhow::Error> {
    // given
    let temp_dir = tempdir()?;
    let (_test_settings_path, test_settings_file_name) = build_temp_file(&temp_dir, "settings", "txt");

    let args_content = format!("--settings={}\nshow-output-dir\n", test_settings_file_name.to_str().unwrap());
    let (_test_args_path, test_args_file_name) = write_temp_file(&temp_dir, "args", "txt", &args_content)?;

    let args_arg = format!("@{}", test_args_file_name.to_str().unwrap());

    // when
    Command::new(env!("CARGO_BIN_EXE_partgen"))
        .args([args_arg.as_str()])
        // then
        .assert()
        .success()
        .stdout(predicate::str::contains("No output directory selected\n"));

    Ok(())
}

#[test]
fn version() {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_partgen"));

    // when
    cmd.args(["-V"])
        // then
        .assert()
        .success()
        .stdout(predicate::str::diff("partgen 0.1.0\n"));
}

#[test]
fn no_args() {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_partgen"));

    // when
    cmd
        // then
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: partgen [OPTIONS] <COMMAND>"));
}

#[test]
fn help_for_generate_subcommand() {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_partgen"));

    // and
    let expected_output = indoc! {"
        Generate a symbol library from a parts file

        Usage: partgen generate [OPTIONS] --parts <FILE>

        Options:
              --parts <FILE>      Parts file
              --library <FILE>    Symbol library containing the template symbols [default: BaseSymbols.kicad_sym]
              --output-dir <DIR>  Output directory, remembered for later runs
          -v, --verbose...        Increase logging verbosity
          -q, --quiet...          Decrease logging verbosity
          -h, --help              Print help
    "};

    // when
    cmd.args(["generate", "--help"])
        // then
        .assert()
        .success()
        .stdout(predicate::str::diff(expected_output));
}
