use clap::*;
use scanchip::libs::quality::measure_of_concordance;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("moc")
        .about("Measure of Concordance between two TAD sets")
        .after_help(
            r###"
MoC = 1 / (n1 * n2 - 1) * sum_ij |Ai & Bj|² / (|Ai| * |Bj| - 1)

Notes:
* Input: one TAD per line, bin indices separated by tabs or spaces.
* Lines starting with # are ignored.
* Fails when n1 * n2 = 1 or when two single-bin TADs meet, both divide by zero.
* Also fails when either file holds no TAD (empty or comments only).

Examples:
1. Compare a prediction with a reference:
   scanchip moc predicted.tsv reference.tsv

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(2)
                .index(1)
                .help("Two TAD files"),
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

    let tads_1 = scanchip::read_tads(infiles[0])?;
    let tads_2 = scanchip::read_tads(infiles[1])?;
    log::info!("{} vs {} TADs", tads_1.len(), tads_2.len());

    let moc = measure_of_concordance(&tads_1, &tads_2)?;

    let mut writer = scanchip::writer(outfile)?;
    writer.write_fmt(format_args!("{}\n", moc))?;
    writer.flush()?;

    Ok(())
}
