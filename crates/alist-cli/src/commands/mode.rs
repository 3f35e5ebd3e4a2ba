use super::session::Session;
use crate::output::Output;
use alist_config::AppMode;
use clap::ValueEnum;
use color_eyre::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Anilist,
    Mal,
}

impl From<ModeArg> for AppMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Anilist => AppMode::Anilist,
            ModeArg::Mal => AppMode::Mal,
        }
    }
}

pub async fn run_mode(mode: ModeArg, output: &Output) -> Result<()> {
    let mut session = Session::open()?;
    let mode = AppMode::from(mode);
    if session.config.mode == mode {
        output.info(format!("App mode is already {}", mode));
        return Ok(());
    }

    session.config.mode = mode;
    session.save_config()?;
    output.success(format!("App mode switched to {}", mode));
    Ok(())
}
