use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["placemark-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn extract_defaults_to_stdin_and_tsv() {
    let cli = Cli::try_parse_from(["placemark-cli", "extract"]).unwrap();
    match cli.command {
        Some(Commands::Extract { input, output }) => {
            assert_eq!(input, "-");
            assert_eq!(output.format, Format::Tsv);
            assert!(output.output.is_none());
            assert!(!output.save);
            assert!(!output.summary);
        }
        other => panic!("expected extract, got: {other:?}"),
    }
}

#[test]
fn extract_with_input_format_and_summary() {
    let cli = Cli::try_parse_from([
        "placemark-cli",
        "extract",
        "--input",
        "listings.json",
        "--format",
        "json",
        "--summary",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Extract {
            ref input,
            output: OutputArgs {
                format: Format::Json,
                summary: true,
                ..
            },
        }) if input == "listings.json"
    ));
}

#[test]
fn search_takes_keyword_and_limit() {
    let cli =
        Cli::try_parse_from(["placemark-cli", "search", "강남 맛집", "--limit", "20"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Search {
            ref keywords,
            limit: Some(20),
            ..
        }) if keywords == &["강남 맛집"]
    ));
}

#[test]
fn search_takes_several_keywords() {
    let cli = Cli::try_parse_from(["placemark-cli", "search", "강남 맛집", "홍대 카페", "--save"])
        .unwrap();
    match cli.command {
        Some(Commands::Search {
            keywords, output, ..
        }) => {
            assert_eq!(keywords, vec!["강남 맛집", "홍대 카페"]);
            assert!(output.save);
        }
        other => panic!("expected search, got: {other:?}"),
    }
}

#[test]
fn repeated_keywords_run_once() {
    let keywords = vec![
        "카페".to_owned(),
        " 국밥 ".to_owned(),
        "카페 ".to_owned(),
        "국밥".to_owned(),
    ];
    assert_eq!(unique_keywords(&keywords), vec!["카페", "국밥"]);
}

#[test]
fn search_requires_keyword() {
    assert!(Cli::try_parse_from(["placemark-cli", "search"]).is_err());
}

#[test]
fn search_limit_is_bounded() {
    assert!(Cli::try_parse_from(["placemark-cli", "search", "카페", "--limit", "0"]).is_err());
    assert!(Cli::try_parse_from(["placemark-cli", "search", "카페", "--limit", "101"]).is_err());
}

#[test]
fn unknown_format_is_rejected() {
    assert!(Cli::try_parse_from(["placemark-cli", "extract", "--format", "xlsx"]).is_err());
}

#[test]
fn output_conflicts_with_save() {
    assert!(
        Cli::try_parse_from(["placemark-cli", "extract", "--output", "a.tsv", "--save"]).is_err()
    );
}

fn output_args(output: Option<&str>, save: bool, output_dir: Option<&str>) -> OutputArgs {
    OutputArgs {
        format: Format::Csv,
        output: output.map(PathBuf::from),
        save,
        output_dir: output_dir.map(PathBuf::from),
        summary: false,
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        env: placemark_core::Environment::Test,
        log_level: "info".to_owned(),
        output_dir: PathBuf::from("exports"),
    }
}

fn test_metadata() -> RunMetadata {
    use chrono::TimeZone;
    let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
    RunMetadata::for_results(&[KeywordResults::new("카페", Vec::new())], at)
}

#[test]
fn destination_defaults_to_stdout() {
    let args = output_args(None, false, None);
    assert_eq!(destination(&args, &test_config(), &test_metadata()), None);
}

#[test]
fn destination_prefers_explicit_path() {
    let args = output_args(Some("out/result.csv"), false, None);
    assert_eq!(
        destination(&args, &test_config(), &test_metadata()),
        Some(PathBuf::from("out/result.csv"))
    );
}

#[test]
fn save_uses_configured_output_dir() {
    let args = output_args(None, true, None);
    assert_eq!(
        destination(&args, &test_config(), &test_metadata()),
        Some(PathBuf::from("exports/placemark_카페_20240309_140507.csv"))
    );
}

#[test]
fn output_dir_overrides_configured_dir() {
    let args = output_args(None, false, Some("/tmp/runs"));
    assert_eq!(
        destination(&args, &test_config(), &test_metadata()),
        Some(PathBuf::from("/tmp/runs/placemark_카페_20240309_140507.csv"))
    );
}
