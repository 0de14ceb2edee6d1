use alpha::mach::{Console, Program, Runtime};
use std::collections::VecDeque;

/// In-memory console: print output (and input prompts) accumulate in
/// `output`, input values are served from a queue.
pub struct TestConsole {
    pub output: String,
    inputs: VecDeque<i64>,
}

impl TestConsole {
    pub fn new() -> TestConsole {
        TestConsole::with_inputs(&[])
    }

    pub fn with_inputs(inputs: &[i64]) -> TestConsole {
        TestConsole {
            output: String::new(),
            inputs: inputs.iter().cloned().collect(),
        }
    }
}

impl Console for TestConsole {
    fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn input(&mut self, prompt: &str) -> Option<i64> {
        self.output.push_str(prompt);
        self.inputs.pop_front()
    }
}

pub fn run(source: &str) -> String {
    run_with_inputs(source, &[])
}

pub fn run_with_inputs(source: &str, inputs: &[i64]) -> String {
    let mut console = TestConsole::with_inputs(inputs);
    let mut runtime = Runtime::new(Program::load(source));
    match runtime.run(&mut console) {
        Ok(()) => console.output,
        Err(e) => panic!("{} : {:?}", e, e),
    }
}

pub fn run_err(source: &str) -> String {
    let mut console = TestConsole::new();
    let mut runtime = Runtime::new(Program::load(source));
    match runtime.run(&mut console) {
        Ok(()) => panic!("expected an error, got output {:?}", console.output),
        Err(e) => e.to_string(),
    }
}
