use crate::settings::EvalSettings;
use clap::{arg, Arg, Command};

pub(crate) fn build_cli() -> Command {
    Command::new("focal")
        .version("0.1")
        .about("Arithmetic and boolean algebra on directed intervals")
        .subcommand_required(true)
        .flatten_help(true) // show help for all subcommands
        .arg_required_else_help(true) // show full help if nothing given
        .arg(arg!(-v --verbose ... "Show more logs (repeat for more)").global(true))
        .subcommand(
            Command::new("eval")
                .about("Apply one operation between two numbers")
                .args(EvalSettings::cli()),
        )
        .subcommand(
            Command::new("run")
                .about("Run all operations described in a JSON scenario")
                .arg(arg!(<FILE> "The scenario file")),
        )
        .subcommand(
            Command::new("operations").about("List all known operations"),
        )
        .subcommand(
            // Use    eval "$(focal completions zsh)"
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .value_name("SHELL")
                        .help("The shell to generate the completions for")
                        .required(true)
                        .value_parser(clap::builder::EnumValueParser::<
                            clap_complete_command::Shell,
                        >::new()),
                ),
        )
}

#[cfg(test)]
mod test {
    use crate::args::build_cli;

    #[test]
    fn test_cli() {
        build_cli().debug_assert();
    }
}
