use ms15034_checker::commands::command_argument_builder;
use ms15034_checker::handlers::{handle_check, init_logging};

#[tokio::main]
async fn main() {
    let mut cmd = command_argument_builder();
    let matches = cmd.clone().get_matches();

    let Some(argument) = matches.get_one::<String>("TARGET") else {
        // Nothing to check, show usage
        let _ = cmd.print_help();
        println!();
        std::process::exit(0);
    };

    init_logging(matches.get_flag("verbose"));

    if let Err(e) = handle_check(&matches, argument).await {
        eprintln!("[Error] - {:#}", e);
        std::process::exit(1);
    }
}
