use anyhow::Result;
use clap::Parser;

use wordpack::commands;
use wordpack::config::{Cli, Command};
use wordpack::telemetry::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Pack {
            inputs,
            words_out,
            values_out,
            blank_lines,
            config,
        } => commands::run_pack(inputs, words_out, values_out, blank_lines, config),
        Command::Embed {
            word_list,
            output,
            config,
        } => commands::run_embed(word_list, output, config),
        Command::Nearest {
            word,
            neighbors,
            packed,
        } => commands::run_nearest(word, neighbors, packed),
        Command::Explore { packed } => commands::run_explore(packed),
    }
}
