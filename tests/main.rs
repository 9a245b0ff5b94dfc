use argtree::{
    Argument, Bindings, Command, Dispatcher, Flags, Help, UserInterface, EXIT_MALFORMED,
    EXIT_SUCCESS, EXIT_USAGE,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Capture {
    lines: Rc<RefCell<Vec<String>>>,
}

impl UserInterface for Capture {
    fn print(&self, message: String) {
        self.lines.borrow_mut().push(message);
    }
}

impl Capture {
    fn message(&self) -> String {
        self.lines.borrow().join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    Start,
    Stop { force: bool },
    Halt { service: String, wait: i64 },
}

fn tree(seen: Arc<Mutex<Vec<Seen>>>) -> Command {
    let start = seen.clone();
    let stop = seen.clone();
    let halt = seen;

    Command::new()
        .about("Example App")
        .command(
            "daemon",
            Command::new()
                .about("Daemon manager")
                .command(
                    "start",
                    Command::new()
                        .about("Starts Daemon")
                        .callback(move |_| start.lock().unwrap().push(Seen::Start)),
                )
                .command(
                    "stop",
                    Command::new()
                        .about("Stops Daemon")
                        .add(Argument::option("force").short("f").help("force shutdown"))
                        .callback(move |bindings: &Bindings| {
                            stop.lock().unwrap().push(Seen::Stop {
                                force: bindings.flag("force"),
                            })
                        }),
                ),
        )
        .command(
            "service",
            Command::new().about("Daemon service manager").command(
                "halt",
                Command::new()
                    .about("Stops Service and halts it")
                    .add(
                        Argument::new("service", Flags::UNNAMED | Flags::REQUIRED)
                            .help("name of service"),
                    )
                    .add(
                        Argument::new("wait", Flags::VALUE)
                            .short("w")
                            .example("seconds")
                            .help("time to wait for service to be shutdown")
                            .default(0i64)
                            .parse::<i64>(),
                    )
                    .callback(move |bindings: &Bindings| {
                        halt.lock().unwrap().push(Seen::Halt {
                            service: bindings.text("service").unwrap_or_default().to_string(),
                            wait: *bindings.get::<i64>("wait").unwrap_or(&-1),
                        })
                    }),
            ),
        )
}

fn run(argv: &[&str]) -> (i32, Vec<Seen>, String) {
    let seen = Arc::new(Mutex::new(Vec::default()));
    let root = tree(seen.clone());
    let capture = Capture::default();
    let dispatcher =
        Dispatcher::with_interface("simple_args_example", &root, Box::new(capture.clone()));

    let code = dispatcher.dispatch(argv);
    let seen = seen.lock().unwrap().clone();
    (code, seen, capture.message())
}

#[test]
fn tree_is_valid() {
    let seen = Arc::new(Mutex::new(Vec::default()));
    tree(seen).validate().unwrap();
}

#[test]
fn service_halt_with_wait() {
    let (code, seen, message) = run(&["prog", "service", "halt", "myservice", "--wait=5"]);

    assert_eq!(code, EXIT_SUCCESS);
    assert_eq!(
        seen,
        vec![Seen::Halt {
            service: "myservice".to_string(),
            wait: 5
        }]
    );
    assert_eq!(message, "");
}

#[test]
fn service_halt_defaults_wait() {
    let (code, seen, _) = run(&["prog", "service", "halt", "myservice"]);

    assert_eq!(code, EXIT_SUCCESS);
    assert_eq!(
        seen,
        vec![Seen::Halt {
            service: "myservice".to_string(),
            wait: 0
        }]
    );
}

#[test]
fn service_halt_short_and_long_bind_identically() {
    let (_, long, _) = run(&["prog", "service", "halt", "--wait=9", "svc"]);
    let (_, short, _) = run(&["prog", "service", "halt", "-w=9", "svc"]);
    let (_, quoted, _) = run(&["prog", "service", "halt", "-w='9'", "'svc'"]);

    assert_eq!(long, short);
    assert_eq!(long, quoted);
}

#[test]
fn service_halt_missing_service() {
    let (code, seen, message) = run(&["prog", "service", "halt"]);

    assert_eq!(code, EXIT_USAGE);
    assert!(seen.is_empty());
    assert!(message.contains("Error: Argument 'service': Required Argument not set!"));
    assert!(message.contains("  Example: simple_args_example service halt <service>"));
}

#[test]
fn service_halt_bad_wait() {
    let (code, seen, message) = run(&["prog", "service", "halt", "svc", "--wait=soon"]);

    assert_eq!(code, EXIT_USAGE);
    assert!(seen.is_empty());
    assert!(message.contains("Error: Argument 'wait': Value not expected type!"));
    assert!(message.contains("  Example: simple_args_example service halt --wait=<seconds>"));
}

#[test]
fn daemon_stop_force() {
    let (code, seen, _) = run(&["prog", "daemon", "stop", "-f"]);

    assert_eq!(code, EXIT_SUCCESS);
    assert_eq!(seen, vec![Seen::Stop { force: true }]);
}

#[test]
fn daemon_stop_without_force() {
    let (code, seen, _) = run(&["prog", "daemon", "stop"]);

    assert_eq!(code, EXIT_SUCCESS);
    assert_eq!(seen, vec![Seen::Stop { force: false }]);
}

#[test]
fn daemon_start_ignores_extra_tokens() {
    let (code, seen, _) = run(&["prog", "daemon", "start", "now"]);

    assert_eq!(code, EXIT_SUCCESS);
    assert_eq!(seen, vec![Seen::Start]);
}

#[test]
fn daemon_stop_unknown_argument() {
    let (code, seen, message) = run(&["prog", "daemon", "stop", "--now"]);

    assert_eq!(code, EXIT_USAGE);
    assert!(seen.is_empty());
    assert!(message.contains("Error: Argument '--now': Unknown Argument!"));
}

#[test]
fn bogus_command() {
    let (code, seen, message) = run(&["prog", "bogus"]);

    assert_eq!(code, EXIT_USAGE);
    assert!(seen.is_empty());
    assert!(message.contains("Error: Command 'bogus': Not a valid command!"));
    assert!(message.starts_with("Usage:"));
}

#[test]
fn no_tokens() {
    let (code, seen, message) = run(&["prog"]);

    assert_eq!(code, EXIT_USAGE);
    assert!(seen.is_empty());
    assert!(message.starts_with("Usage:"));
    assert!(message.ends_with("Error: Please specify Command!\n"));
}

#[test]
fn help_request() {
    let (code, seen, message) = run(&["prog", "--help"]);

    assert_eq!(code, EXIT_SUCCESS);
    assert!(seen.is_empty());

    let seen = Arc::new(Mutex::new(Vec::default()));
    let expected = Help::collect(&tree(seen), &["simple_args_example"]).to_string();
    assert_eq!(message, expected);
}

#[test]
fn help_output() {
    let (_, _, message) = run(&["prog", "daemon", "?"]);
    let lines: Vec<&str> = message.lines().map(str::trim_end).collect();

    assert_eq!(
        lines,
        vec![
            "Usage:",
            "   simple_args_example daemon <Command> : Daemon manager",
            "",
            "Commands:",
            "   start                                : Starts Daemon",
            "   stop  [Options]                      : Stops Daemon",
            "         --force (-f)                   : force shutdown (optional)",
            "",
        ]
    );
}

#[test]
fn malformed_node() {
    let root = Command::new().command("broken", Command::new().about("no callback"));
    let capture = Capture::default();
    let dispatcher = Dispatcher::with_interface("prog", &root, Box::new(capture.clone()));

    assert_eq!(dispatcher.dispatch_tokens(&["broken", "x"]), EXIT_MALFORMED);
    assert_eq!(capture.message(), "");
    assert!(Dispatcher::validated("prog", &root).is_err());
}

#[test]
fn free_functions() {
    let root = Command::new().callback(|bindings: &Bindings| bindings.len() as i32 + 4);

    assert_eq!(argtree::dispatch(&root, "prog", &["prog"]), 4);
}
