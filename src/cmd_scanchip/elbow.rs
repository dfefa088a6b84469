use clap::*;
use scanchip::libs::elbow::{estimate_epsilon, TsvCurve, Visualizer};
use scanchip::libs::feature::{extract_features, window_length};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("elbow")
        .about("Distortion curve of the k-distances and its elbow")
        .after_help(
            r###"
Prints the distortion curve as k<TAB>distortion, k starting at 1.
The elbow index, the eps used by `scanchip call`, is logged to stderr.

* k-distances: norm of the first difference of each chunk of 2 * window_length features
* distortion[k] = (kd[k] - kd[k - 1])²
* elbow = first k with the largest distortion

Examples:
1. Inspect the curve:
   scanchip elbow -i matrix.tsv -w 10

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

    let elbow = estimate_epsilon(&features, wl, None)?;
    log::info!("Elbow index: {}", elbow.index);

    // the curve is the output here, so write errors are fatal
    let mut curve = TsvCurve::new(scanchip::writer(outfile)?);
    curve.render(&elbow.distortions)?;

    Ok(())
}
