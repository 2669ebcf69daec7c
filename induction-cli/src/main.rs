//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = induction_cli::run() {
        report(&err);
        std::process::exit(1);
    }
}

#[expect(clippy::print_stderr, reason = "the binary reports fatal errors on stderr")]
fn report(err: &induction_cli::CliError) {
    eprintln!("induction: {err}");
}
