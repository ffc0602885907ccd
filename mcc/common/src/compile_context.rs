use crate::{Code, CodeId, Config, InputFiles};

/// The Compilation context stores various information about the current compilation
#[derive(Debug, Default)]
pub struct CompileContext {
    /// The current config which specifies how to compile
    pub config: Config,
    /// The code files, used to display errors
    pub input_files: InputFiles,
}

impl CompileContext {
    pub fn new(config: Config) -> Self {
        CompileContext {
            config,
            input_files: Default::default(),
        }
    }

    pub fn add_input_file(&mut self, code: Code) -> CodeId {
        self.input_files.add_input(code)
    }

    pub fn get_input_file(&self, id: CodeId) -> &Code {
        self.input_files.get_input(id)
    }
}
