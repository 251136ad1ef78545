use optspec::{prelude::*, CompileError, InterpretError, Lookup, OptionKind, Specification};
use rstest::rstest;

const EXAMPLE: &str = r#"
    usage: example-tool
    A short description of the command
    --
    flag        --flag,-f,FLAG           A description for this flag
    option=     --option=,-o=,OPTION=    A description for this option
                                         the description continues here
    !required=  --required,-r=,REQUIRED= A required option
    --
    env_var=    ENV_VAR=                 An environment variable
    --
    help        help,h                   Show this help message
    run         run                      Run some function
    --
    More freestyle text
    "#;

const DEFAULTS: &str = r#"
    usage: haraway <flags>... <command> <args>...
    --
    root=XYZ  -r,--root=,HARAWAY_ROOT     Path to the haraway data root
    num=2     -n=                         Number of things
    --
    --
    exec      c,exec                      Execute a command within the haraway sandbox
    shell     sh,shell                    Open a shell within the haraway sandbox
    --
    "#;

fn no_environment() -> &'static [&'static str] {
    &[]
}

#[test]
fn end_to_end() {
    let spec = Specification::compile(EXAMPLE).unwrap();
    let options = spec
        .interpret(&["example-tool", "--required", "hello world"], no_environment())
        .unwrap();

    assert_eq!(options.get("required"), Some("hello world"));
    assert_eq!(options.command(), None);
}

#[test]
fn required_from_environment() {
    let spec = Specification::compile(EXAMPLE).unwrap();

    assert_eq!(
        spec.interpret(&["example-tool"], no_environment())
            .unwrap_err(),
        InterpretError::MissingOption {
            name: "required".to_string()
        }
    );

    let options = spec
        .interpret(&["example-tool", "run", "x"], &["REQUIRED=from env"])
        .unwrap();
    assert_eq!(options.get("required"), Some("from env"));
    assert_eq!(options.command(), Some("run"));
    assert_eq!(options.args(), &["run", "x"]);
}

#[test]
fn defaults() {
    let spec: Specification = DEFAULTS.parse().unwrap();
    let options = spec.interpret(&["haraway"], no_environment()).unwrap();

    assert_eq!(options.get("root"), Some("XYZ"));
    assert_eq!(options.get_int("num"), Some(2));
    assert!(!options.is_set("root"));

    let options = spec
        .interpret(&["haraway", "-r", "hello", "-n=5"], no_environment())
        .unwrap();

    assert_eq!(options.get("root"), Some("hello"));
    assert_eq!(options.get_int("num"), Some(5));
    assert!(options.is_set("root"));
}

#[rstest]
#[case(vec![], vec![], "XYZ")]
#[case(vec!["HARAWAY_ROOT=/env"], vec![], "/env")]
#[case(vec!["HARAWAY_ROOT=/env"], vec!["--root", "/cli"], "/cli")]
fn environment_precedence(
    #[case] environ: Vec<&str>,
    #[case] tokens: Vec<&str>,
    #[case] expected: &str,
) {
    let spec = Specification::compile(DEFAULTS).unwrap();
    let mut args = vec!["haraway"];
    args.extend(tokens);

    assert_eq!(
        spec.interpret(&args, environ).unwrap().get("root"),
        Some(expected)
    );
}

#[rstest]
#[case("0x1F", Lookup::Found(31))]
#[case("017", Lookup::Found(15))]
#[case("42", Lookup::Found(42))]
#[case("4two", Lookup::Malformed("'4two' cannot convert to i64.".to_string()))]
fn integers(#[case] value: &str, #[case] expected: Lookup<i64>) {
    let spec = Specification::compile(DEFAULTS).unwrap();
    let options = spec
        .interpret(&["haraway", "-n", value], no_environment())
        .unwrap();

    assert_eq!(options.get_int("num"), expected.clone().found());
    assert_eq!(options.lookup_int("num"), expected);
}

#[test]
fn multi() {
    let spec =
        Specification::compile("usage\n--\ninc= -I,--include= Include\n--\n--\n--\n").unwrap();
    let options = spec
        .interpret(&["multi", "-I", "a", "--include=b", "-I=c"], no_environment())
        .unwrap();

    assert_eq!(options.get("inc"), Some("a"));
    assert_eq!(options.get_multi("inc"), Some(vec!["a", "b", "c"]));
}

#[test]
fn unknown_policy() {
    let strict = Specification::compile(DEFAULTS).unwrap();
    assert_eq!(
        strict
            .interpret(&["haraway", "foo"], no_environment())
            .unwrap_err()
            .to_string(),
        "Invalid argument: foo was not recognized"
    );

    let lenient =
        Specification::compile("usage\n--\nverbose -v\n--\n--\n*\n--\n").unwrap();
    let options = lenient
        .interpret(&["prog", "foo", "-v", "bar"], no_environment())
        .unwrap();
    assert_eq!(options.args(), &["foo", "bar"]);
    assert!(options.get_bool("verbose"));
}

#[test]
fn compile_errors() {
    assert_eq!(
        Specification::compile("usage\n--\nbroken\n--\n").unwrap_err(),
        CompileError::InvalidOption("broken".to_string())
    );
    assert_eq!(
        Specification::compile("usage\n--\n--\n--\nbroken\n--\n").unwrap_err(),
        CompileError::InvalidCommand("broken".to_string())
    );
}

#[test]
fn tables() {
    let spec = Specification::compile(EXAMPLE).unwrap();

    assert_eq!(spec.kind("flag"), Some(OptionKind::Flag));
    assert_eq!(spec.kind("env_var"), Some(OptionKind::Value));
    assert_eq!(spec.option_alias("-o=").unwrap().as_str(), "option");
    assert_eq!(spec.environment_alias("OPTION").unwrap().as_str(), "option");
    assert_eq!(spec.command_alias("h"), Some("help"));
}

struct Collect(std::cell::RefCell<Vec<String>>);

impl UserInterface for Collect {
    fn print(&self, message: String) {
        self.0.borrow_mut().push(message);
    }

    fn print_error(&self, message: String) {
        self.0.borrow_mut().push(message);
    }

    fn print_error_context(&self, error_context: optspec::ErrorContext) {
        self.0.borrow_mut().push(error_context.to_string());
    }
}

#[test]
fn custom_interface() {
    let spec = Specification::compile(DEFAULTS).unwrap();
    let args = ["haraway", "-n"];
    let error = spec.interpret(&args, no_environment()).unwrap_err();
    let collect = Collect(std::cell::RefCell::new(Vec::default()));
    spec.print_interpret_error(&collect, &error, &args);

    assert_eq!(
        collect.0.into_inner(),
        vec![
            "error: Invalid option: -n was not recognized (requires a value)".to_string(),
            "haraway -n\n        ^".to_string(),
            spec.usage().to_string(),
        ]
    );
}
