use std::process::ExitCode;

fn main() -> ExitCode {
    wallet_client::util::logging::init();
    wallet_client::cli::main(std::env::args_os())
}
