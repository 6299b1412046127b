use crate::core::settings::{
    is_bool_string, is_color_depth, is_completion_mode, is_completions_display_value,
    is_rows_string, is_seconds_string, is_workers_string, to_bool_string, to_color_depth,
    to_completion_mode, to_completions_display_value, to_rows_string, to_seconds_string,
    to_workers_string, DEFAULT_INVALIDATE_INTERVAL,
};

pub type ValidateFn = fn(&str) -> bool;
pub type NormalizeFn = fn(&str) -> String;
/// Convert a canonical value to the string exported into the process
/// environment; `None` keeps it out of the environment.
pub type DetypeFn = fn(&str) -> Option<String>;

/// Declaration of one configuration variable, registered into the
/// host's environment registry at plugin start.
#[derive(Debug, Clone, Copy)]
pub struct VarSpec {
    pub key: &'static str,
    pub default: &'static str,
    pub doc: &'static str,
    /// Documentation override for the default, when the literal
    /// default string would read poorly.
    pub doc_default: Option<&'static str>,
    pub validate: ValidateFn,
    pub normalize: NormalizeFn,
    pub detype: DetypeFn,
    pub is_configurable: bool,
}

/// A titled group of variable declarations. Nesting is an explicit
/// tree, not an inheritance chain.
#[derive(Debug)]
pub struct SettingGroup {
    pub title: &'static str,
    pub description: &'static str,
    pub vars: Vec<VarSpec>,
    pub children: Vec<SettingGroup>,
}

fn detype_same(x: &str) -> Option<String> {
    Some(x.to_string())
}

fn detype_non_empty(x: &str) -> Option<String> {
    if x.is_empty() {
        None
    } else {
        Some(x.to_string())
    }
}

fn bool_var(key: &'static str, default: &'static str, doc: &'static str) -> VarSpec {
    VarSpec {
        key,
        default,
        doc,
        doc_default: None,
        validate: is_bool_string,
        normalize: to_bool_string,
        detype: detype_same,
        is_configurable: true,
    }
}

/// All setting groups declared by this plugin.
pub fn all_groups() -> Vec<SettingGroup> {
    vec![
        SettingGroup {
            title: "Prompt shell",
            description: "Behavior of the prompt-kit shell front-end. \
                          Only used when the shell type is one of its aliases.",
            vars: vec![
                bool_var(
                    "AUTO_SUGGEST",
                    "true",
                    "Suggest the rest of the command from history while typing; \
                     the right arrow key accepts the suggestion.",
                ),
                bool_var(
                    "AUTO_SUGGEST_IN_COMPLETIONS",
                    "false",
                    "Place the auto-suggest result first in the completions so it \
                     can be tab-completed.",
                ),
                bool_var(
                    "MOUSE_SUPPORT",
                    "false",
                    "Enable mouse support for cursor positioning and completion \
                     selection. Some terminals lose scrollback while this is on.",
                ),
                bool_var("VI_MODE", "false", "Use vi keybindings in the prompt."),
                bool_var(
                    "OXSH_AUTOPAIR",
                    "false",
                    "Auto-insert matching parentheses, brackets, and quotes.",
                ),
                bool_var(
                    "OXSH_COPY_ON_DELETE",
                    "false",
                    "Copy words/lines to the clipboard when they are deleted.",
                ),
                bool_var(
                    "OXSH_CTRL_BKSP_DELETION",
                    "false",
                    "Delete a word on ctrl+backspace (like alt+backspace). Needs a \
                     terminal that distinguishes the two keys.",
                ),
                bool_var(
                    "OXSH_WHOLE_WORD_SHORTCUTS",
                    "false",
                    "Jump/delete across whole (non-whitespace) words with \
                     ctrl+left/right/delete/backspace.",
                ),
                VarSpec {
                    doc_default: Some("false; Windows only"),
                    is_configurable: cfg!(windows),
                    ..bool_var(
                        "OXSH_FREE_CWD",
                        "false",
                        "Release the lock on the current directory whenever the \
                         prompt is shown, so other programs can delete or rename it.",
                    )
                },
                VarSpec {
                    key: "OXSH_COLOR_DEPTH",
                    default: "",
                    doc: "Color depth used by the prompt renderer: one of \
                          MONOCHROME, DEPTH_1_BIT, DEPTH_4_BIT, DEPTH_8_BIT, \
                          DEPTH_24_BIT, TRUE_COLOR or DEFAULT; empty leaves the \
                          depth up to the terminal.",
                    doc_default: Some("unset"),
                    validate: is_color_depth,
                    normalize: to_color_depth,
                    detype: detype_non_empty,
                    is_configurable: true,
                },
            ],
            children: vec![SettingGroup {
                title: "Asynchronous prompt",
                description: "Render slow prompt fields in the background \
                              without blocking the read-eval loop.",
                vars: vec![
                    bool_var(
                        "ENABLE_ASYNC_PROMPT",
                        "false",
                        "Render the prompt using threads; slow prompt fields \
                         update in the background.",
                    ),
                    VarSpec {
                        key: "ASYNC_INVALIDATE_INTERVAL",
                        default: DEFAULT_INVALIDATE_INTERVAL,
                        doc: "Seconds within which redraw requests are grouped \
                              into a single redraw.",
                        doc_default: None,
                        validate: is_seconds_string,
                        normalize: to_seconds_string,
                        detype: detype_same,
                        is_configurable: true,
                    },
                    VarSpec {
                        key: "ASYNC_PROMPT_THREAD_WORKERS",
                        default: "",
                        doc: "Number of workers in the async prompt pool; empty \
                              lets the pool pick.",
                        doc_default: Some("pool default"),
                        validate: is_workers_string,
                        normalize: to_workers_string,
                        detype: detype_non_empty,
                        is_configurable: true,
                    },
                ],
                children: Vec::new(),
            }],
        },
        SettingGroup {
            title: "Tab completion",
            description: "Prompt-kit tab-completion behavior.",
            vars: vec![
                bool_var(
                    "COMPLETIONS_CONFIRM",
                    "true",
                    "While the completions menu is displayed, <Enter> confirms the \
                     completion instead of running the command.",
                ),
                VarSpec {
                    key: "COMPLETIONS_DISPLAY",
                    default: "multi",
                    doc: "How completions are displayed: 'none' hides them, \
                          'single' uses one column, 'multi' uses several. \
                          Takes effect immediately when changed at runtime.",
                    doc_default: None,
                    validate: is_completions_display_value,
                    normalize: to_completions_display_value,
                    detype: detype_same,
                    is_configurable: true,
                },
                VarSpec {
                    key: "COMPLETIONS_MENU_ROWS",
                    default: "5",
                    doc: "Rows reserved for the completions menu when \
                          COMPLETIONS_DISPLAY is 'single' or 'multi'.",
                    doc_default: None,
                    validate: is_rows_string,
                    normalize: to_rows_string,
                    detype: detype_same,
                    is_configurable: true,
                },
                VarSpec {
                    key: "COMPLETION_MODE",
                    default: "default",
                    doc: "'default' inserts the common prefix on the first TAB \
                          then cycles; 'menu-complete' selects whole completions \
                          from the first TAB on.",
                    doc_default: None,
                    validate: is_completion_mode,
                    normalize: to_completion_mode,
                    detype: detype_same,
                    is_configurable: true,
                },
                bool_var(
                    "COMPLETION_IN_THREAD",
                    "false",
                    "Generate completions in a background thread when they are \
                     slow to produce.",
                ),
                bool_var(
                    "UPDATE_COMPLETIONS_ON_KEYPRESS",
                    "false",
                    "Evaluate and display completions on every keypress instead \
                     of waiting for TAB.",
                ),
            ],
            children: Vec::new(),
        },
    ]
}

/// Flatten the group tree into the registration order: a group's own
/// variables first, then its children depth-first.
pub fn iter_specs() -> Vec<VarSpec> {
    fn walk(group: &SettingGroup, out: &mut Vec<VarSpec>) {
        out.extend(group.vars.iter().copied());
        for child in &group.children {
            walk(child, out);
        }
    }
    let mut out = Vec::new();
    for group in all_groups() {
        walk(&group, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let specs = iter_specs();
        let keys: HashSet<_> = specs.iter().map(|s| s.key).collect();
        assert_eq!(keys.len(), specs.len());
    }

    #[test]
    fn test_defaults_are_canonical() {
        for spec in iter_specs() {
            assert!(
                (spec.validate)(spec.default),
                "default {:?} of {} fails its own validator",
                spec.default,
                spec.key
            );
            assert_eq!(
                (spec.normalize)(spec.default),
                spec.default,
                "default of {} is not normalization-stable",
                spec.key
            );
        }
    }

    #[test]
    fn test_expected_vars_present() {
        let specs = iter_specs();
        for key in [
            "AUTO_SUGGEST",
            "MOUSE_SUPPORT",
            "VI_MODE",
            "OXSH_WHOLE_WORD_SHORTCUTS",
            "OXSH_FREE_CWD",
            "OXSH_COLOR_DEPTH",
            "ENABLE_ASYNC_PROMPT",
            "COMPLETIONS_DISPLAY",
            "COMPLETION_MODE",
        ] {
            assert!(specs.iter().any(|s| s.key == key), "missing {key}");
        }
    }

    #[test]
    fn test_async_group_nests_under_prompt_shell() {
        let groups = all_groups();
        let prompt = &groups[0];
        assert_eq!(prompt.title, "Prompt shell");
        assert_eq!(prompt.children.len(), 1);
        assert_eq!(prompt.children[0].title, "Asynchronous prompt");
    }

    #[test]
    fn test_registered_normalizers_are_wired() {
        let specs = iter_specs();
        let mode = specs
            .iter()
            .find(|s| s.key == "COMPLETION_MODE")
            .expect("COMPLETION_MODE declared");
        assert_eq!((mode.normalize)("MEnu_complete"), "menu-complete");
        assert_eq!((mode.normalize)("bogus"), "default");
    }

    #[test]
    fn test_detype_of_unset_color_depth_is_none() {
        let specs = iter_specs();
        let depth = specs
            .iter()
            .find(|s| s.key == "OXSH_COLOR_DEPTH")
            .expect("OXSH_COLOR_DEPTH declared");
        assert_eq!((depth.detype)(""), None);
        assert_eq!((depth.detype)("TRUE_COLOR"), Some("TRUE_COLOR".to_string()));
    }
}
