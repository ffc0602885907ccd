#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use mcc_lang::{
    commands::{MinecraftRange, ScoreboardOperation},
    error::LowerResult,
    scoreboard::{LiteralComparison, ScoreboardManager, ScoreboardValue},
    CompiledProgram,
};

/// The entity that `@s` refers to outside of `execute as`
pub const EXECUTOR: &str = "@executor";

/// A tiny scoreboard machine that runs the emitted command text
#[derive(Debug, Default)]
pub struct Machine {
    objectives: HashSet<String>,
    scores: HashMap<(String, String), i32>,
    functions: HashMap<String, Vec<String>>,
    executed: usize,
}

impl Machine {
    /// Loads every function of the program and runs its head
    pub fn new(program: &CompiledProgram) -> Self {
        let mut machine = Machine::default();
        for (path, commands) in &program.functions {
            machine.functions.insert(path.to_string(), commands.clone());
        }
        machine.run_all(&program.head);
        machine
    }

    /// Loads the head and the routines of a registry that is still in use
    pub fn from_manager(manager: &ScoreboardManager) -> Self {
        let mut machine = Machine::default();
        machine.sync(manager);
        machine
    }

    /// Picks up routines and head commands that were added since the last call
    pub fn sync(&mut self, manager: &ScoreboardManager) {
        for routine in manager.routines().routines() {
            self.functions
                .insert(routine.path.to_string(), routine.commands);
        }
        let head = manager.head().commands();
        for command in &head[self.executed.min(head.len())..] {
            self.run(command);
        }
        self.executed = head.len();
    }

    /// Runs the result of a lowering, after loading whatever it defined
    pub fn apply(&mut self, manager: &ScoreboardManager, commands: LowerResult<Vec<String>>) {
        self.sync(manager);
        self.run_all(&commands.expect("Lowering failed"));
    }

    pub fn call(&mut self, path: &str) {
        let commands = self
            .functions
            .get(path)
            .unwrap_or_else(|| panic!("Unknown function {path}"))
            .clone();
        self.run_all(&commands);
    }

    pub fn run_all(&mut self, commands: &[String]) {
        for command in commands {
            self.run(command);
        }
    }

    pub fn run(&mut self, command: &str) {
        let tokens: Vec<&str> = command.split_whitespace().collect();
        self.execute(&tokens, EXECUTOR, command);
    }

    fn holder(&self, selector: &str, executor: &str) -> String {
        match selector {
            "@s" => executor.to_string(),
            selector if selector.starts_with('@') => panic!("Unsupported selector {selector}"),
            player => player.to_string(),
        }
    }

    fn key(&self, holder: String, objective: &str) -> (String, String) {
        assert!(
            self.objectives.contains(objective),
            "Objective {objective} does not exist"
        );
        (holder, objective.to_string())
    }

    fn read(&self, key: &(String, String), command: &str) -> i32 {
        *self
            .scores
            .get(key)
            .unwrap_or_else(|| panic!("Score {key:?} is not set, in `{command}`"))
    }

    fn execute(&mut self, tokens: &[&str], executor: &str, command: &str) {
        match tokens {
            ["scoreboard", "objectives", "add", name, "dummy"] => {
                self.objectives.insert(name.trim_matches('"').to_string());
            }
            ["scoreboard", "objectives", "remove", name] => {
                let name = name.trim_matches('"');
                self.objectives.remove(name);
                self.scores.retain(|(_, objective), _| objective != name);
            }
            ["scoreboard", "players", action @ ("set" | "add" | "remove"), selector, objective, value] =>
            {
                let key = self.key(self.holder(selector, executor), objective);
                let value: i32 = value.parse().expect("Invalid score");
                let new = match *action {
                    "set" => value,
                    "add" => self.read(&key, command).wrapping_add(value),
                    _ => self.read(&key, command).wrapping_sub(value),
                };
                self.scores.insert(key, new);
            }
            ["scoreboard", "players", "operation", lhs, lhs_objective, operation, rhs, rhs_objective] => {
                let lhs = self.key(self.holder(lhs, executor), lhs_objective);
                let rhs = self.key(self.holder(rhs, executor), rhs_objective);
                let rhs_value = self.read(&rhs, command);

                match *operation {
                    "=" => {
                        self.scores.insert(lhs, rhs_value);
                    }
                    "><" => {
                        let lhs_value = self.read(&lhs, command);
                        self.scores.insert(lhs, rhs_value);
                        self.scores.insert(rhs, lhs_value);
                    }
                    operation => {
                        let operation = parse_operation(operation);
                        let lhs_value = self.read(&lhs, command);
                        self.scores
                            .insert(lhs, operation.evaluate(lhs_value, rhs_value));
                    }
                }
            }
            ["execute", rest @ ..] => self.execute_chain(rest, executor.to_string(), command),
            ["function", path] => self.call(path),
            _ => panic!("Unsupported command `{command}`"),
        }
    }

    fn execute_chain(&mut self, tokens: &[&str], executor: String, command: &str) {
        match tokens {
            ["as", selector, rest @ ..] => {
                let executor = self.holder(selector, &executor);
                self.execute_chain(rest, executor, command);
            }
            ["if", "score", selector, objective, "matches", range, rest @ ..] => {
                let key = self.key(self.holder(selector, &executor), objective);
                let range: MinecraftRange = range.parse().expect("Invalid range");
                match self.scores.get(&key) {
                    Some(value) if range.contains(*value) => {
                        self.execute_chain(rest, executor, command);
                    }
                    _ => {}
                }
            }
            ["run", rest @ ..] => self.execute(rest, &executor, command),
            _ => panic!("Unsupported execute subcommand in `{command}`"),
        }
    }

    pub fn score(&self, holder: &str, objective: &str) -> Option<i32> {
        self.scores
            .get(&(holder.to_string(), objective.to_string()))
            .copied()
    }

    /// The score of the executing entity
    pub fn local(&self, objective: &str) -> i32 {
        self.score(EXECUTOR, objective)
            .unwrap_or_else(|| panic!("{objective} is not set"))
    }

    /// Both registers of a decimal
    pub fn decimal(&self, value: &ScoreboardValue) -> (i32, i32) {
        let holder = match value.clarifier.current_string() {
            "@s" => EXECUTOR,
            player => player,
        };
        let read = |objective: &str| {
            self.score(holder, objective)
                .unwrap_or_else(|| panic!("{objective} is not set"))
        };
        (read(value.name().as_str()), read(value.fraction_name().as_str()))
    }

    pub fn has_objective(&self, objective: &str) -> bool {
        self.objectives.contains(objective)
    }

    /// Runs the comparison's commands and tests its entries against the executor
    pub fn check(&mut self, comparison: &LiteralComparison) -> bool {
        self.run_all(&comparison.commands);
        comparison
            .entries
            .iter()
            .all(|entry| entry.range.contains(self.local(&entry.objective)))
    }
}

fn parse_operation(operation: &str) -> ScoreboardOperation {
    match operation {
        "+=" => ScoreboardOperation::Plus,
        "-=" => ScoreboardOperation::Minus,
        "*=" => ScoreboardOperation::Times,
        "/=" => ScoreboardOperation::Divide,
        "%=" => ScoreboardOperation::Modulo,
        "<" => ScoreboardOperation::Min,
        ">" => ScoreboardOperation::Max,
        other => panic!("Unknown operation {other}"),
    }
}
