//! `mapgl-inspect`: classify bridge wire messages.
//!
//! Usage:
//!   mapgl-inspect < messages.txt
//!
//! Reads one message per line from stdin and prints how the bridge would
//! treat it: a command, a routed event, or a dropped message.

use mapgl_bridge::cli::{init_logging, inspect_line};
use std::io::{self, BufRead, Write};

fn main() {
    init_logging();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Err(e) = writeln!(stdout, "{}", inspect_line(line)) {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
