//! `calc`: reads `A+B` from stdin and exits quietly, unless the sum
//! exceeds the threshold, in which case the sanitizer reports a
//! divide-by-zero and the process exits with status 1.

use calc_target::prelude::*;
use covfuzz_rt::{cover, guard_division};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    cover!();
    let line = match read_line(io::stdin().lock()) {
        Ok(line) => line,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let eval = Evaluator::new();
    let value = match eval.evaluate_bytes(&line) {
        Ok(sum) => {
            cover!();
            sum
        }
        Err(_) => {
            cover!();
            CalcError::SENTINEL
        }
    };

    if eval.exceeds_threshold(value) {
        cover!();
        let divisor = 0;
        guard_division(divisor, line!() as i32, column!() as i32);
    }

    cover!();
    ExitCode::SUCCESS
}
