use aswa::cli::BrowseCommand;

#[test]
fn test_parse_next() {
    for input in ["", "  ", "n", "next", "N", "Next\n"] {
        assert_eq!(BrowseCommand::parse(input), Some(BrowseCommand::Next), "{:?}", input);
    }
}

#[test]
fn test_parse_other_commands() {
    assert_eq!(BrowseCommand::parse("p"), Some(BrowseCommand::Previous));
    assert_eq!(BrowseCommand::parse("prev"), Some(BrowseCommand::Previous));
    assert_eq!(BrowseCommand::parse("previous"), Some(BrowseCommand::Previous));
    assert_eq!(BrowseCommand::parse("r"), Some(BrowseCommand::Random));
    assert_eq!(BrowseCommand::parse("l"), Some(BrowseCommand::List));
    assert_eq!(BrowseCommand::parse("q"), Some(BrowseCommand::Quit));
    assert_eq!(BrowseCommand::parse("exit"), Some(BrowseCommand::Quit));
}

#[test]
fn test_parse_unknown() {
    assert_eq!(BrowseCommand::parse("skip"), None);
    assert_eq!(BrowseCommand::parse("nn"), None);
}
