use super::prompts::FuzzyChooser;
use super::session::Session;
use super::sync_ui::with_spinner;
use super::ListArgs;
use crate::output::Output;
use alist_core::{parse_number, Mutation, SyncError, Target};
use color_eyre::Result;

/// Field changed by an update command, as typed on the command line.
#[derive(Debug, Clone)]
pub enum UpdateField {
    /// `None` adds one episode
    Episodes(Option<String>),
    Status(String),
    Score(String),
}

impl UpdateField {
    fn into_mutation(self) -> Result<Mutation, SyncError> {
        Ok(match self {
            UpdateField::Episodes(None) => Mutation::Progress(None),
            UpdateField::Episodes(Some(n)) => Mutation::Progress(Some(parse_number(&n, "episode count")?)),
            UpdateField::Status(text) => Mutation::Status(text),
            UpdateField::Score(n) => Mutation::Score(parse_number(&n, "score")?),
        })
    }
}

pub async fn run_update(
    args: &ListArgs,
    field: UpdateField,
    title: Option<String>,
    output: &Output,
) -> Result<()> {
    let session = Session::open()?;
    session.require_anilist_mode()?;

    let is_progress = matches!(field, UpdateField::Episodes(_));
    let mutation = field.into_mutation()?;
    mutation.validate()?;

    let mut cache = session.load_list(args, output).await?;
    let controller = session.controller();

    // Resolve before the spinner starts so the chooser owns the terminal
    let list_id = match title.as_deref() {
        Some(search) => controller
            .resolve_target(&cache, Target::Search(search), &FuzzyChooser)?
            .list_id,
        None => session.selected(&cache)?.list_id,
    };

    let outcome = with_spinner(
        "Saving to AniList...",
        !output.is_quiet(),
        controller.update(&mut cache, Target::Selected(Some(list_id)), mutation, &FuzzyChooser),
    )
    .await?;

    output.success("Updated successfully");
    if is_progress {
        output.entry_progress_change(&outcome.entry, outcome.previous.progress);
    } else {
        output.entry_details(&outcome.entry);
    }
    if outcome.status_changed() && is_progress {
        output.info(format!(
            "Status changed from {} to {}",
            outcome.previous.status, outcome.entry.status
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parsing() {
        assert!(matches!(
            UpdateField::Episodes(None).into_mutation().unwrap(),
            Mutation::Progress(None)
        ));
        assert!(matches!(
            UpdateField::Episodes(Some("7".to_string())).into_mutation().unwrap(),
            Mutation::Progress(Some(7))
        ));
        assert!(matches!(
            UpdateField::Score("x".to_string()).into_mutation(),
            Err(SyncError::Validation(_))
        ));
    }

    #[test]
    fn test_out_of_range_values_fail_validation() {
        let score = UpdateField::Score("11".to_string()).into_mutation().unwrap();
        assert!(score.validate().is_err());
        let eps = UpdateField::Episodes(Some("-2".to_string())).into_mutation().unwrap();
        assert!(eps.validate().is_err());
    }
}
