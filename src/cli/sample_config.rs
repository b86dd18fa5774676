//! Sample config files printed by `zet sample-config`.

use super::ConfigKind;
use super::config::CONFIG_FILE;

const VIM_UNIX: &str = "/usr/bin/vim";
const VIM_WINDOWS: &str = "C:/Program Files/Git/usr/bin/vim.exe";

/// Returns a commented sample config for `kind`.
pub fn sample_config(kind: ConfigKind) -> String {
    let editor = match kind {
        ConfigKind::Unix => VIM_UNIX,
        ConfigKind::Windows => VIM_WINDOWS,
    };
    format!(
        "# Put this file at ~/.config/zet/{CONFIG_FILE}
# (on Windows: %APPDATA%\\zet\\{CONFIG_FILE}).
# Below options use global paths, but feel free
# to use program name directly if it's on your PATH.
repo: ~/zet
editor: {editor}
editor_args: []
"
    )
}
