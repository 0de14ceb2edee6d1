/*!
# Terminal Module

The command-line front-end: loads a `.a` program, reports lexical
diagnostics, and drives the machine with a console backed by the real
terminal.

*/

extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;

use crate::error;
use crate::lang::Error;
use crate::mach::{Console, Program, Runtime};
use ansi_term::Style;
use linefeed::{DefaultTerminal, Interface, ReadResult};
use std::sync::atomic::Ordering;

pub fn main() {
    let mut args = std::env::args();
    let name = args.next().unwrap_or_else(|| "alpha".to_string());
    let path = match (args.next(), args.next()) {
        (Some(path), None) => path,
        _ => {
            eprintln!("Usage: {} <program.a>", name);
            std::process::exit(2);
        }
    };
    if let Err(error) = run_file(&path) {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
        std::process::exit(1);
    }
}

fn run_file(path: &str) -> Result<(), Error> {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => return Err(error!(InternalError; error.to_string())),
    };
    let program = Program::load(&source);
    if let Some(error) = report_diagnostics(&program) {
        return Err(error);
    }
    let mut runtime = Runtime::new(program);
    let interrupted = runtime.interrupt_flag();
    ctrlc::set_handler(move || {
        interrupted.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    let mut console = TermConsole::new()?;
    runtime.run(&mut console)
}

/// Lexical diagnostics are printed in order; the run must not start when
/// any exist, since the buffer holds unknown tokens the grammar rejects.
fn report_diagnostics(program: &Program) -> Option<Error> {
    if program.errors().is_empty() {
        return None;
    }
    for error in program.errors() {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
    }
    Some(error!(SyntaxError; "PROGRAM NOT RUN"))
}

struct TermConsole {
    interface: Interface<DefaultTerminal>,
}

impl TermConsole {
    fn new() -> Result<TermConsole, Error> {
        match Interface::new("alpha") {
            Ok(interface) => Ok(TermConsole { interface }),
            Err(error) => Err(error!(InternalError; error.to_string())),
        }
    }
}

impl Console for TermConsole {
    fn print(&mut self, text: &str) {
        let _ = self.interface.write_fmt(format_args!("{}", text));
    }

    fn input(&mut self, prompt: &str) -> Option<i64> {
        self.interface.set_prompt(prompt).ok()?;
        match self.interface.read_line().ok()? {
            ReadResult::Input(text) => text.trim().parse().ok(),
            ReadResult::Signal(_) | ReadResult::Eof => None,
        }
    }
}
