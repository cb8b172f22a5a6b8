/// Blocking yes/no gate the orchestrator calls before irreversible actions.
/// The CLI supplies a stdin-backed implementation; `--yes` swaps in
/// [`AutoConfirm`].
pub trait Confirmer {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Non-interactive mode: every prompt is accepted.
pub struct AutoConfirm;

impl Confirmer for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
