//! Collects lowered scoreboard commands into a program
//!
//! A [`Compilation`] owns the value registry and the functions that are being written.
//! Upstream code lowers its statements through [`Compilation::lower`] and receives
//! a [`CompiledProgram`] from [`Compilation::finish`].

use mcc_common::{Code, CodeId, CompileContext, Config, FxIndexMap, SmolStr, Span};
use mcc_error::{CompileError, LowerResult, Result, WithSpan};
use mcc_scoreboard::{Attribute, ScoreboardManager, ScoreboardValue, Typedef};

pub use mcc_commands as commands;
pub use mcc_common as common;
pub use mcc_error as error;
pub use mcc_scoreboard as scoreboard;

/// The function that receives commands if none was opened
pub const MAIN_FUNCTION: &str = "main";

pub struct Compilation {
    pub compile_context: CompileContext,
    pub scoreboard: ScoreboardManager,
    functions: FxIndexMap<SmolStr, Vec<String>>,
    current: Option<SmolStr>,
}

impl Compilation {
    pub fn new(config: Config) -> Self {
        Compilation {
            scoreboard: ScoreboardManager::new(&config),
            compile_context: CompileContext::new(config),
            functions: FxIndexMap::default(),
            current: None,
        }
    }

    /// Registers source code, so that errors can point into it
    pub fn add_input_file(&mut self, source: &str, path: Option<&str>) -> CodeId {
        self.compile_context.add_input_file(Code {
            source: source.into(),
            path: path.map(ToString::to_string),
        })
    }

    /// Registers a value and adds its objectives to the program head
    ///
    /// Declaring an existing alias again returns the value that is already registered.
    pub fn declare(
        &mut self,
        alias: &str,
        typedef: Typedef,
        attributes: Vec<Attribute>,
    ) -> ScoreboardValue {
        if let Some(existing) = self.scoreboard.get_by_name(alias) {
            return existing.clone();
        }

        let value = self.scoreboard.create(alias, typedef, attributes);
        let head = self.scoreboard.head();
        head.extend(value.commands_define());
        if value.is_global() {
            head.extend(value.commands_init(value.clarifier.current_string()));
        }
        self.scoreboard.add(value.clone());
        value
    }

    /// Makes `name` the function that receives new commands, creating it if needed
    pub fn open_function(&mut self, name: &str) {
        let name = SmolStr::from(name);
        self.functions.entry(name.clone()).or_default();
        self.current = Some(name);
    }

    /// Appends commands to the currently open function
    pub fn append(&mut self, commands: impl IntoIterator<Item = String>) {
        let name = match &self.current {
            Some(name) => name.clone(),
            None => {
                self.open_function(MAIN_FUNCTION);
                SmolStr::new_inline(MAIN_FUNCTION)
            }
        };
        self.functions.entry(name).or_default().extend(commands);
    }

    /// Runs one lowering step for the statement at `span` and appends its commands
    pub fn lower(
        &mut self,
        span: Span,
        lower: impl FnOnce(&ScoreboardManager) -> LowerResult<Vec<String>>,
    ) -> Result<()> {
        let commands = lower(&self.scoreboard).at(span)?;
        self.append(commands);
        Ok(())
    }

    /// Renders an error with the code it points to
    pub fn format_error(&self, error: &CompileError) -> String {
        error.format(&self.compile_context)
    }

    pub fn finish(self) -> CompiledProgram {
        let Compilation {
            compile_context,
            scoreboard,
            mut functions,
            ..
        } = self;

        for routine in scoreboard.routines().routines() {
            functions.insert(SmolStr::from(&*routine.path), routine.commands);
        }

        let program = CompiledProgram {
            head: scoreboard.head().commands(),
            functions,
            uninstall_path: SmolStr::from(format!(
                "{}/uninstall",
                compile_context.config.project_name
            )),
            uninstall: scoreboard.commands_uninstall(),
        };
        tracing::debug!(
            head = program.head.len(),
            functions = program.functions.len(),
            "finished compilation"
        );
        program
    }
}

/// The output of a compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledProgram {
    /// Runs once when the program is loaded
    pub head: Vec<String>,
    /// The opened functions followed by the generated helper routines
    pub functions: FxIndexMap<SmolStr, Vec<String>>,
    pub uninstall_path: SmolStr,
    /// Removes every objective the program created
    pub uninstall: Vec<String>,
}

impl CompiledProgram {
    pub fn function(&self, path: &str) -> Option<&[String]> {
        self.functions.get(path).map(Vec::as_slice)
    }
}
