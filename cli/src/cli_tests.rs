//! Tests for CLI parsing.

use super::*;
use rstest::rstest;

#[test]
fn cli_parses_territory_with_type() {
    let cli = Cli::parse_from(["mercator", "territory", "DEU", "--type", "ISO_3166_A3"]);

    match cli.command {
        Command::Territory(args) => {
            assert_eq!(args.code, "DEU");
            assert_eq!(args.code_type.as_deref(), Some("ISO_3166_A3"));
            assert!(args.locale.is_none());
        }
        other => panic!("expected territory command, got {other:?}"),
    }
}

#[test]
fn cli_parses_global_options_after_the_subcommand() {
    let cli = Cli::parse_from(["mercator", "locale", "ru", "--data-root", "/srv/cldr"]);

    assert_eq!(cli.data_root, Some(Utf8PathBuf::from("/srv/cldr")));
    assert!(cli.config.is_none());
}

#[rstest]
#[case::parents(&["mercator", "parents", "DE", "--expand"], true)]
#[case::children(&["mercator", "children", "150"], false)]
fn cli_parses_hierarchy_commands(#[case] argv: &[&str], #[case] expand: bool) {
    let cli = Cli::parse_from(argv);

    match cli.command {
        Command::Parents(args) | Command::Children(args) => assert_eq!(args.expand, expand),
        other => panic!("expected a hierarchy command, got {other:?}"),
    }
}

#[test]
fn cli_requires_a_subcommand() {
    assert!(Cli::try_parse_from(["mercator"]).is_err());
}
