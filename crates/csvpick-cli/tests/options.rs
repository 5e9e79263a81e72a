use std::fs;

use clap::Parser;

use csvpick_cli::cli::Cli;
use csvpick_cli::commands::{build_options, run_select};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("csvpick").chain(args.iter().copied()))
        .expect("parse CLI args")
}

#[test]
fn trailing_specs_land_in_columns() {
    let cli = parse(&["-n", "input.csv", "--", "1", "3-5", "7-"]);
    let options = build_options(&cli).expect("build options");
    assert!(options.use_indexes);
    assert_eq!(options.columns, vec!["1", "3-5", "7-"]);
}

#[test]
fn cleaning_flags_map_to_clean_options() {
    let cli = parse(&[
        "-u",
        "?",
        "--whitespace-clean",
        "-W",
        "-e",
        ";",
        "input.csv",
    ]);
    let options = build_options(&cli).expect("build options");
    let clean = &options.clean;
    assert!(clean.no_trim);
    assert!(clean.whitespace.is_some());
    assert_eq!(clean.embedded_lineend, Some(b';'));
    assert!(clean.malformed_utf8.is_some());
}

#[test]
fn empty_utf8_replacement_means_remove() {
    let cli = parse(&["-u", "", "input.csv"]);
    let options = build_options(&cli).expect("build options");
    assert_eq!(
        options.clean.malformed_utf8,
        Some(csvpick_core::Utf8Repair::Remove)
    );
}

#[test]
fn multibyte_utf8_replacement_is_rejected() {
    let cli = parse(&["-u", "é", "input.csv"]);
    assert!(build_options(&cli).is_err());
}

#[test]
fn tab_flag_sets_delimiter() {
    let cli = parse(&["-T", "input.csv"]);
    let options = build_options(&cli).expect("build options");
    assert_eq!(options.delimiter, b'\t');
}

#[test]
fn other_delim_rejects_double_quote() {
    let cli = parse(&["-O", "\"", "input.csv"]);
    assert!(build_options(&cli).is_err());
}

#[test]
fn sample_pct_must_be_between_0_and_100() {
    assert!(build_options(&parse(&["--sample-pct", "0", "f.csv"])).is_err());
    assert!(build_options(&parse(&["--sample-pct", "100", "f.csv"])).is_err());
    assert!(build_options(&parse(&["--sample-pct", "2.5", "f.csv"])).is_ok());
}

#[test]
fn header_row_span_range_is_enforced() {
    assert!(build_options(&parse(&["-d", "0", "f.csv"])).is_err());
    assert!(build_options(&parse(&["-d", "256", "f.csv"])).is_err());
    assert!(build_options(&parse(&["-d", "2", "f.csv"])).is_ok());
}

#[test]
fn skip_head_is_capped_below_256() {
    assert!(build_options(&parse(&["-R", "256", "f.csv"])).is_err());
    assert!(build_options(&parse(&["-R", "255", "f.csv"])).is_ok());
}

#[test]
fn max_columns_must_exceed_nine() {
    assert!(build_options(&parse(&["-C", "9", "f.csv"])).is_err());
    assert!(build_options(&parse(&["-C", "10", "f.csv"])).is_ok());
}

#[test]
fn empty_search_value_is_rejected() {
    assert!(build_options(&parse(&["-s", "", "f.csv"])).is_err());
}

#[test]
fn select_runs_end_to_end_over_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("input.csv");
    let output = dir.path().join("output.csv");
    fs::write(&input, "a,b,c\n1,2,3\n4,5,6\n").expect("write input");

    let cli = parse(&[
        input.to_str().expect("utf8 path"),
        "-o",
        output.to_str().expect("utf8 path"),
        "--",
        "c",
        "a",
    ]);
    run_select(&cli).expect("run select");

    let written = fs::read_to_string(&output).expect("read output");
    assert_eq!(written, "c,a\n3,1\n6,4\n");
}

#[test]
fn missing_input_file_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope.csv");
    let cli = parse(&[missing.to_str().expect("utf8 path")]);
    assert!(run_select(&cli).is_err());
}
