use clap::*;
use scanchip::libs::feature::{extract_features, window_length};
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("features")
        .about("Window features along the diagonal of a contact matrix")
        .after_help(
            r###"
Prints the feature sequence, one value per line.

Every diagonal position d contributes window_length² values:
* [d, d + w) fits: the window is read column by column
* otherwise: matrix[d - i, d - j], row by row, reading back from d

Examples:
1. Features with a window of 1/4 of the matrix:
   scanchip features -i matrix.tsv -w 4

"###,
        )
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .required(true)
                .num_args(1)
                .help("Input contact matrix file. [stdin] for standard input"),
        )
        .arg(
            Arg::new("windowproportion")
                .long("windowproportion")
                .short('w')
                .required(true)
                .value_parser(value_parser!(usize))
                .help("Window proportion, the window covers 1/w of the matrix"),
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
    let infile = args.get_one::<String>("input").unwrap();
    let proportion = *args.get_one::<usize>("windowproportion").unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();

    let matrix = scanchip::read_matrix(infile)?;
    let wl = window_length(matrix.nrows(), proportion)?;
    let features = extract_features(&matrix, wl)?;
    log::info!("{} features, window length {}", features.len(), wl);

    let mut writer = scanchip::writer(outfile)?;
    for f in &features {
        writer.write_fmt(format_args!("{}\n", f))?;
    }
    writer.flush()?;

    Ok(())
}
