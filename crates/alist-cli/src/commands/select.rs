use super::prompts::FuzzyChooser;
use super::session::Session;
use super::ListArgs;
use crate::output::Output;
use color_eyre::Result;

pub async fn run_select(args: &ListArgs, words: Vec<String>, output: &Output) -> Result<()> {
    let mut session = Session::open()?;
    session.require_anilist_mode()?;
    let cache = session.load_list(args, output).await?;

    let search = words.join(" ");
    let entry = alist_core::select(&mut session.config.anilist, &cache, &search, &FuzzyChooser)?;
    session.save_config()?;

    output.success("Selected entry:");
    output.entry_details(entry);
    Ok(())
}
