/// Settings that influence which names the compiler generates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The name of the project, used for the uninstall function
    pub project_name: String,
    /// Prefix of every scoped temporary register
    pub temp_prefix: String,
    /// Prefix of the temporaries handed out by the registry's shared counter
    pub legacy_temp_prefix: String,
    /// The fake player which holds the scores of global values
    pub global_player: String,
    /// The function directory for generated helper routines
    pub routine_namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            project_name: "mcc_project".to_string(),
            temp_prefix: "_tmp".to_string(),
            legacy_temp_prefix: "_temp".to_string(),
            global_player: "_".to_string(),
            routine_namespace: "_mcc".to_string(),
        }
    }
}
