use clap::*;
use scanchip::libs::quality::modified_jaccard_index;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("jaccard")
        .about("Modified Jaccard index between two boundary sets")
        .after_help(
            r###"
A boundary b of the first set matches b - 1, b or b + 1 in the second set.
Each boundary of the second set is matched at most once.

index = matched / (n1 + n2 - matched), 0 for two empty sets

Notes:
* Input: integers separated by whitespace, lines starting with # are ignored.
* The first set drives the matching. Swapping the files can change the score,
  and a boundary claiming both neighbors can push the score above 1.

Examples:
1. Compare predicted boundaries with a reference:
   scanchip jaccard predicted.txt reference.txt

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(2)
                .index(1)
                .help("Two boundary files"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infiles: Vec<&String> = args.get_many::<String>("infiles").unwrap().collect();
    let outfile = args.get_one::<String>("outfile").unwrap();

    let boundaries_1 = scanchip::read_boundaries(infiles[0])?;
    let boundaries_2 = scanchip::read_boundaries(infiles[1])?;

    let index = modified_jaccard_index(&boundaries_1, &boundaries_2);

    let mut writer = scanchip::writer(outfile)?;
    writer.write_fmt(format_args!("{}\n", index))?;
    writer.flush()?;

    Ok(())
}
