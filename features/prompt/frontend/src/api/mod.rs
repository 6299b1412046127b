/// L2 API: Public types for the oxsh prompt front-end.
///
/// Re-exports the main user-facing types, plus the promptkit core the
/// host needs to talk to the shell surface.
pub use crate::core::settings::{
    is_color_depth, is_completion_mode, is_completions_display_value, to_bool_string,
    to_color_depth, to_completion_mode, to_completions_display_value, try_color_depth,
    try_completion_mode, try_completions_display_value, InvalidSetting, COLOR_DEPTH_ENV,
};
pub use crate::core::shell::{
    should_append_history, PromptSettings, PromptShell, TriggerCompleter, COMMENT_MARKER,
};
pub use crate::core::vars::{all_groups, iter_specs, SettingGroup, VarSpec};
pub use crate::spi::config::PromptFileConfig;
pub use crate::spi::free_cwd::FreeCwdHook;
pub use crate::spi::host::{
    start, start_with_config, stop, PluginHandle, PromptEvent, PromptHost, SharedAbbrevs,
    ShellDefinition, ShellReady, SHELL_ALIASES,
};

// Re-export the promptkit surface the host interacts with.
pub use promptkit::{
    AbbrevEngine, AbbrevStore, EditBuffer, Expansion, ExpansionError, KeyBindings, KeyCombo,
    LineBuffer, EDIT_MARKER,
};
