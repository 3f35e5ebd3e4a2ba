use super::sync_ui::is_interactive;
use alist_core::Chooser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::FuzzySelect;

/// Fuzzy finder over entry labels. Without a terminal there is nobody to
/// ask, which counts as an abort.
pub struct FuzzyChooser;

impl Chooser for FuzzyChooser {
    fn choose(&self, prompt: &str, items: &[String]) -> Option<usize> {
        if items.is_empty() || !is_interactive() {
            return None;
        }
        match FuzzySelect::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
        {
            Ok(choice) => choice,
            Err(e) => {
                tracing::warn!("Interactive selection failed: {}", e);
                None
            }
        }
    }
}

/// Pick one of several strings; a single option is returned without asking.
pub fn choose_string(prompt: &str, options: &[String]) -> Result<String> {
    match options {
        [] => Err(eyre!("no alternative titles")),
        [only] => Ok(only.clone()),
        _ => FuzzyChooser
            .choose(prompt, options)
            .and_then(|i| options.get(i).cloned())
            .ok_or_else(|| eyre!("no title chosen")),
    }
}

/// Read the access token without echoing it.
pub fn prompt_token(prompt: &str) -> Result<String> {
    rpassword::prompt_password(prompt).map_err(|e| eyre!("Failed to read token: {}", e))
}
