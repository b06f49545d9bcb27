//! sepctl CLI binary
//!
//! Minimal entrypoint: all logic lives in the library, and `cli::run()`
//! handles its own output including errors. `main` only maps the result to
//! a process exit code.

fn main() {
    if let Err(code) = sepctl::cli::run() {
        std::process::exit(code.as_i32());
    }
}
