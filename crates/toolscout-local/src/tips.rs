use toolscout_core::{TipEntry, TipMatch};

/// The built-in tips knowledge table, in matching priority order.
///
/// Insertion order is the tie-break when a user string matches several keys,
/// so more specific keys go before shorter ones that could swallow them.
const BUILTIN_TIPS: &[(&str, &[&str])] = &[
    (
        "vscode",
        &[
            "Cmd/Ctrl+Shift+P opens the command palette; almost everything is reachable from there.",
            "Install the 'GitLens' extension to see inline blame and file history.",
            "Use workspace settings (.vscode/settings.json) to share formatter config with your team.",
        ],
    ),
    (
        "git",
        &[
            "git log --oneline --graph gives a compact picture of branch history.",
            "git stash push -m 'label' keeps your stash list readable.",
            "git rebase --autosquash with fixup! commits cleans up review feedback fast.",
            "Set rerere.enabled=true so resolved merge conflicts are remembered.",
        ],
    ),
    (
        "tmux",
        &[
            "Prefix + z zooms the current pane; press again to restore the layout.",
            "tmux-resurrect restores sessions across restarts.",
            "Rename windows (prefix + ,) so long-lived sessions stay navigable.",
        ],
    ),
    (
        "docker",
        &[
            "docker system prune -af reclaims disk from stopped containers and dangling images.",
            "Multi-stage builds keep runtime images small; compile in one stage, copy artifacts into the next.",
            "Use docker compose watch for live-reload during development.",
        ],
    ),
    (
        "neovim",
        &[
            "Telescope.nvim gives fuzzy finding over files, buffers, and LSP symbols.",
            "Use :checkhealth to diagnose plugin and provider issues.",
        ],
    ),
    (
        "vim",
        &[
            "Ctrl+o and Ctrl+i jump back and forward through your cursor history.",
            ":earlier 2m rewinds the buffer two minutes; :later goes forward.",
        ],
    ),
    (
        "jq",
        &[
            "jq -r strips quotes from string output, handy for shell pipelines.",
            "Use 'del(.field)' to drop keys and '.[] | select(...)' to filter arrays.",
        ],
    ),
    (
        "fzf",
        &[
            "Ctrl+R with fzf installed gives fuzzy shell-history search.",
            "Pipe anything into fzf -m for multi-select with Tab.",
        ],
    ),
    (
        "ripgrep",
        &[
            "rg -t rust 'pattern' scopes a search to one language's files.",
            "rg --files piped into fzf is a fast project-wide file picker.",
        ],
    ),
    (
        "gh",
        &[
            "gh pr checkout <number> fetches a pull request into a local branch.",
            "gh api lets you script any GitHub endpoint with your existing auth.",
        ],
    ),
];

/// Read-only mapping from canonical tool key to usage tips. Built once at
/// startup and shared by reference; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct TipsTable {
    entries: Vec<TipEntry>,
}

impl TipsTable {
    /// The built-in table. Key order in [`BUILTIN_TIPS`] is preserved.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_TIPS
                .iter()
                .map(|(key, tips)| TipEntry {
                    key: (*key).to_string(),
                    tips: tips.iter().map(|s| (*s).to_string()).collect(),
                })
                .collect(),
        }
    }

    pub fn from_entries(entries: Vec<TipEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Match user-supplied tool names against the table.
    ///
    /// A name matches a key when either contains the other,
    /// case-insensitively: "vscode" matches key "vscode", and so does
    /// "I use VSCode daily". Each input yields at most one match (first key in
    /// table order wins); inputs matching nothing are silently omitted.
    pub fn matches(&self, existing_tools: &[String]) -> Vec<TipMatch> {
        let mut out = Vec::new();
        for name in existing_tools {
            let name_lc = name.to_lowercase();
            if name_lc.trim().is_empty() {
                continue;
            }
            // Keys are lower-cased here too; from_entries accepts any casing.
            let hit = self.entries.iter().find(|e| {
                let key_lc = e.key.to_lowercase();
                name_lc.contains(&key_lc) || key_lc.contains(&name_lc)
            });
            if let Some(entry) = hit {
                out.push(TipMatch {
                    tool: name.clone(),
                    tips: entry.tips.clone(),
                });
            }
        }
        out
    }
}
