use argot_core::{MutualKind, MutualRule, OptionSpec, SettingsRule, ValueKind, Verb};
use argot_parser::{ErrorKind, FromArgs, ParseError, ParsedArgs, Parser, ParserConfig};
use argot_suggest::AutoCorrector;

fn argv(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

fn add_verb() -> Verb {
    Verb::builder("add")
        .option(
            OptionSpec::builder("read", ValueKind::String)
                .short('r')
                .alias("input")
                .build()
                .unwrap(),
        )
        .option(
            OptionSpec::builder("verbose", ValueKind::Bool)
                .short('v')
                .default_value(false)
                .build()
                .unwrap(),
        )
        .option(
            OptionSpec::builder("count", ValueKind::Integer)
                .short('c')
                .settings(SettingsRule::range(Some(0), Some(20)).unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

#[derive(Debug, PartialEq)]
struct AddArgs {
    read: String,
    verbose: bool,
    count: Option<i64>,
}

impl FromArgs for AddArgs {
    fn from_args(args: &ParsedArgs) -> Result<Self, ParseError> {
        Ok(Self {
            read: args.get_str("read").unwrap_or_default().to_string(),
            verbose: args.get_bool("verbose").unwrap_or(false),
            count: args.get_integer("count"),
        })
    }
}

fn parse(tokens: &[&str]) -> Result<AddArgs, ParseError> {
    Parser::default()
        .parse::<AddArgs>(&add_verb(), &argv(tokens))
        .into_result()
}

#[test]
fn standard_syntax_binds_typed_struct() {
    let args = parse(&[
        "add", "--read", "notes.txt", "--verbose", "true", "--count", "10",
    ])
    .unwrap();
    assert_eq!(
        args,
        AddArgs {
            read: "notes.txt".to_string(),
            verbose: true,
            count: Some(10),
        }
    );
}

#[test]
fn natural_syntax_resolves_same_values() {
    let standard = parse(&["add", "--read", "notes.txt", "--verbose", "true"]).unwrap();
    let natural = parse(&[
        "add", "where", "read", "is", "notes.txt", "verbose", "is", "true",
    ])
    .unwrap();
    assert_eq!(natural, standard);
}

#[test]
fn natural_syntax_accepts_and_between_pairs() {
    let args = parse(&[
        "add", "where", "read", "is", "notes.txt", "and", "count", "is", "3",
    ])
    .unwrap();
    assert_eq!(args.read, "notes.txt");
    assert_eq!(args.count, Some(3));
}

#[test]
fn misspelled_verb_fails_and_corrector_suggests_it() {
    let verb = add_verb();
    let result = Parser::default().parse::<ParsedArgs>(&verb, &argv(&["ad", "--verbose", "true"]));
    assert!(!result.is_success());
    assert_eq!(result.error().map(ParseError::kind), Some(ErrorKind::BadFormat));

    let mut corrector = AutoCorrector::default();
    let verbs = [verb];
    let correction = corrector.try_correct_verb("ad", &verbs).unwrap();
    assert_eq!(correction.suggestion, "add");
    assert_eq!(correction.target.long_name(), "add");
}

#[test]
fn aliases_and_short_names_resolve_to_long_name() {
    let args = parse(&["add", "--input", "a.txt", "-c", "2"]).unwrap();
    assert_eq!(args.read, "a.txt");
    assert_eq!(args.count, Some(2));
}

#[test]
fn default_applies_when_option_absent() {
    let verb = add_verb();
    let args = Parser::default()
        .parse::<ParsedArgs>(&verb, &argv(&["add", "--read", "x"]))
        .into_instance()
        .unwrap();
    assert_eq!(args.get_bool("verbose"), Some(false));
    assert!(!args.contains("count"));
}

#[test]
fn range_enforced_on_integer_option() {
    assert!(parse(&["add", "--count", "10"]).is_ok());

    let too_big = parse(&["add", "--count", "25"]).unwrap_err();
    assert_eq!(too_big.kind(), ErrorKind::SettingsViolation);

    let not_a_number = parse(&["add", "--count", "lots"]).unwrap_err();
    assert_eq!(not_a_number.kind(), ErrorKind::SettingsViolation);
}

#[test]
fn single_bound_does_not_restrict_integer_option() {
    let verb = Verb::builder("take")
        .option(
            OptionSpec::builder("count", ValueKind::Integer)
                .settings(SettingsRule::range(Some(5), None).unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let args = login(&verb, &["take", "--count", "4"]).unwrap();
    assert_eq!(args.get_integer("count"), Some(4));
}

#[test]
fn invalid_bool_is_invalid_value() {
    let err = parse(&["add", "--verbose", "maybe"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(
        err.to_string(),
        "'maybe' is not a valid bool for option 'verbose'"
    );
}

#[test]
fn flag_without_value_is_invalid_value() {
    let err = parse(&["add", "--verbose"]).unwrap_err();
    assert_eq!(err.to_string(), "option 'verbose' requires a value");
}

#[test]
fn keyword_outside_natural_position_is_bad_format() {
    let err = parse(&["add", "--read", "salt", "and", "pepper"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadFormat);
}

fn login_verb(kind: MutualKind) -> Verb {
    Verb::builder("login")
        .option(
            OptionSpec::builder("user", ValueKind::String)
                .mutual(MutualRule::new(kind, ["token"]))
                .build()
                .unwrap(),
        )
        .option(OptionSpec::builder("token", ValueKind::String).build().unwrap())
        .build()
        .unwrap()
}

fn login(verb: &Verb, tokens: &[&str]) -> Result<ParsedArgs, ParseError> {
    Parser::default()
        .parse::<ParsedArgs>(verb, &argv(tokens))
        .into_result()
}

#[test]
fn mutual_inclusive() {
    let verb = login_verb(MutualKind::Inclusive);
    assert!(login(&verb, &["login"]).is_ok());
    assert!(login(&verb, &["login", "--user", "me", "--token", "t"]).is_ok());
    // The rule is declared on 'user' and only fires when 'user' is given.
    assert!(login(&verb, &["login", "--token", "t"]).is_ok());

    let err = login(&verb, &["login", "--user", "me"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MutualViolation);
    assert!(err.to_string().contains("'user' and 'token'"));
}

#[test]
fn mutual_exclusive() {
    let verb = login_verb(MutualKind::Exclusive);
    assert!(login(&verb, &["login"]).is_ok());
    assert!(login(&verb, &["login", "--user", "me"]).is_ok());
    assert!(login(&verb, &["login", "--token", "t"]).is_ok());

    let err = login(&verb, &["login", "--user", "me", "--token", "t"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MutualViolation);
}

#[test]
fn allowed_values_are_case_insensitive() {
    let verb = Verb::builder("export")
        .option(
            OptionSpec::builder("format", ValueKind::String)
                .settings(SettingsRule::default().with_allowed_values(["json", "yaml"]))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    assert!(login(&verb, &["export", "--format", "YAML"]).is_ok());
    let err = login(&verb, &["export", "--format", "xml"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SettingsViolation);
}

#[test]
fn custom_prefixes_from_config() {
    let config: ParserConfig = serde_yaml::from_str("long_prefix: '++'\nshort_prefix: '+'\n").unwrap();
    let verb = add_verb();
    let args = Parser::new(config)
        .unwrap()
        .parse::<ParsedArgs>(&verb, &argv(&["add", "++read", "a", "+c", "1"]))
        .into_instance()
        .unwrap();
    assert_eq!(args.get_str("read"), Some("a"));
    assert_eq!(args.get_integer("count"), Some(1));
}

#[test]
fn groups_parse_independently() {
    let verbs = vec![add_verb(), Verb::builder("list").build().unwrap()];
    let results = Parser::default().parse_groups(
        &verbs,
        &argv(&["add", "--count", "99", "&", "list", "&", "lsit"]),
    );
    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].error().map(ParseError::kind),
        Some(ErrorKind::SettingsViolation)
    );
    assert!(results[1].is_success());
    assert_eq!(
        results[2].error_message().as_deref(),
        Some("unknown verb 'lsit'. Did you mean 'list'?")
    );
}
