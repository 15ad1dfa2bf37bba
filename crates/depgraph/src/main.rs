use std::process::ExitCode;

fn main() -> ExitCode {
    match depgraph_lib::main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}
