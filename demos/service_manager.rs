use argtree::{Argument, Bindings, Command, Dispatcher};

fn daemon_start(_bindings: &Bindings) {
    println!("Starting daemon.");
}

fn daemon_stop(bindings: &Bindings) {
    if bindings.flag("force") {
        println!("Stopping daemon (forced).");
    } else {
        println!("Stopping daemon.");
    }
}

fn service_halt(bindings: &Bindings) -> i32 {
    let (Some(service), Some(seconds)) = (bindings.text("service"), bindings.get::<i64>("wait"))
    else {
        return 1;
    };
    println!("Halting '{service}' within {seconds} seconds.");
    0
}

fn main() {
    let daemon = Command::new()
        .about("Daemon manager")
        .command(
            "start",
            Command::new().about("Starts Daemon").callback(daemon_start),
        )
        .command(
            "stop",
            Command::new()
                .about("Stops Daemon")
                .add(Argument::option("force").short("f").help("force shutdown"))
                .callback(daemon_stop),
        );
    let service = Command::new().about("Daemon service manager").command(
        "halt",
        Command::new()
            .about("Stops Service and halts it")
            .add(
                Argument::unnamed("service")
                    .required()
                    .help("name of service"),
            )
            .add(
                Argument::value("wait")
                    .short("w")
                    .example("seconds")
                    .help("time to wait for service to be shutdown")
                    .default(0i64)
                    .parse::<i64>(),
            )
            .callback(service_halt),
    );
    let root = Command::new()
        .about("Example App")
        .command("daemon", daemon)
        .command("service", service);

    Dispatcher::validated("service_manager", &root)
        .expect("Invalid command tree")
        .run();
}
