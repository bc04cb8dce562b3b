use anyhow::Result;

use crate::args::{Cli, Command};

mod check;
mod delete;
mod doctor;
mod eval;
mod list;
mod save;
mod show;

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Check { schema } => check::run(&schema),
        Command::Eval { schema, data, today } => {
            eval::run(&schema, data.as_deref(), today.as_deref())
        }
        Command::Save { schema } => save::run(&cli.store_root, &schema),
        Command::List => list::run(&cli.store_root),
        Command::Show { id } => show::run(&cli.store_root, &id),
        Command::Delete { id } => delete::run(&cli.store_root, &id),
        Command::Doctor => doctor::run(&cli.store_root),
    }
}
