use crate::error::Result;
use crate::output::Output;
use crate::vcs::Backend;
use crate::vcs::options::short_option_table;

/// Execute the `options` subcommand.
pub(crate) fn run(output: &Output) -> Result<()> {
    let colors = output.colors();

    output.value(&colors.header("git clone (options are passed verbatim)"));
    print_table(Backend::Git, output);
    output.value("");
    output.value(&colors.header("git svn clone (short options are expanded)"));
    print_table(Backend::Svn, output);

    Ok(())
}

fn print_table(backend: Backend, output: &Output) {
    let lines: Vec<String> = short_option_table(backend)
        .iter()
        .map(|entry| {
            let value = if entry.takes_value { " <value>" } else { "" };
            format!("  -{}  {}{value}", entry.short, entry.long_flag())
        })
        .collect();
    output.list(&lines);
}
