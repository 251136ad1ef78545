use optspec::Specification;

const SPEC: &str = r#"
    usage: haraway <flags>... <command> <args>...
    Run commands within the haraway sandbox.
    --
    #         Options
    root=/var/haraway  -r,--root=,HARAWAY_ROOT     Path to the haraway data root
    jobs=1             -j,--jobs=                  Number of parallel jobs
    verbose            -v,--verbose                Show more info
    help               -h,--help                   Show this help message
    --
    --
    #         Commands
    exec               c,exec                      Execute a command within the sandbox
    shell              sh,shell                    Open a shell within the sandbox
    --
    Values for --root are also read from HARAWAY_ROOT.
"#;

fn main() {
    let spec = Specification::compile_or_exit(SPEC);
    let options = spec.interpret_process();

    if options.get_bool("help") {
        spec.print_usage(&optspec::Console::default());
        return;
    }

    // Let child processes see the resolved root.
    spec.environment_exports(&options).apply();

    let jobs = match options.get_uint("jobs") {
        Some(jobs) if jobs > 0 => jobs,
        _ => spec.exit_with_error(&DemoError("--jobs must be a positive integer")),
    };

    println!("root: {}", options.get("root").unwrap_or_default());
    println!("jobs: {jobs}");
    println!("verbose: {}", options.get_bool("verbose"));

    match options.command() {
        Some(command) => println!("command: {command} {:?}", &options.args()[1..]),
        None => spec.print_usage_and_exit(),
    }
}

#[derive(Debug)]
struct DemoError(&'static str);

impl std::fmt::Display for DemoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for DemoError {}
