use clap::*;
use itertools::Itertools;
use scanchip::libs::dbscan::{labels_to_clusters, NOISE};
use scanchip::libs::elbow::{TsvCurve, Visualizer};
use scanchip::libs::scan::{scan, ScanParams};
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("call")
        .about("Cluster the bins of a contact matrix with DBSCAN")
        .after_help(
            r###"
Runs the whole pipeline on one Hi-C contact matrix:

1. Window features along the diagonal, window length = N / windowproportion
2. k-distances of the features and the elbow of their distortion curve
3. DBSCAN over the matrix rows, eps = elbow index, min_points = minsize / binsize

Notes:
* Input: tab-separated matrix, no header, one row per line. .gz is supported.
* The elbow index is a position on the distortion curve and is used as eps
  without any rescaling.
* Output formats:
    * labels  - one line per bin: bin<TAB>label, noise is -1
    * cluster - one line per cluster, member bins tab-separated, noise omitted

Examples:
1. Cluster with a window of 1/10 of the matrix:
   scanchip call -i chr21.tsv -w 10

2. 50 kb bins, 150 kb minimum TAD size, keep the distortion curve:
   scanchip call -i chr21.tsv -w 10 -b 50000 -m 150000 --distortion curve.tsv

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
            Arg::new("minsize")
                .long("minsize")
                .short('m')
                .value_parser(value_parser!(usize))
                .default_value("120000")
                .help("Minimum size of a TAD in bp"),
        )
        .arg(
            Arg::new("binsize")
                .long("binsize")
                .short('b')
                .value_parser(value_parser!(usize))
                .default_value("40000")
                .help("Bin size in bp"),
        )
        .arg(
            Arg::new("distortion")
                .long("distortion")
                .num_args(1)
                .help("Write the distortion curve to this file"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .action(ArgAction::Set)
                .value_parser([
                    builder::PossibleValue::new("labels"),
                    builder::PossibleValue::new("cluster"),
                ])
                .default_value("labels")
                .help("Output format"),
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
    let params = ScanParams {
        window_proportion: *args.get_one::<usize>("windowproportion").unwrap(),
        min_tad_size: *args.get_one::<usize>("minsize").unwrap(),
        bin_size: *args.get_one::<usize>("binsize").unwrap(),
    };
    let opt_distortion = args.get_one::<String>("distortion");
    let opt_format = args.get_one::<String>("format").unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();

    if params.window_proportion == 0 {
        anyhow::bail!("--windowproportion must be greater than 0");
    }
    if params.bin_size == 0 {
        anyhow::bail!("--binsize must be greater than 0");
    }

    log::info!("Contact matrix specified: {}", infile);
    log::info!("Creating window: {}", 1.0 / params.window_proportion as f64);
    log::info!("Binsize: {}", params.bin_size);
    log::info!("Minimum TAD size: {}", params.min_tad_size);

    log::info!("Read data");
    let matrix = scanchip::read_matrix(infile)?;

    let mut curve = match opt_distortion {
        Some(file) => Some(TsvCurve::new(scanchip::writer(file)?)),
        None => None,
    };
    let res = scan(
        &matrix,
        &params,
        curve.as_mut().map(|c| c as &mut dyn Visualizer),
    )?;

    //----------------------------
    // Output
    //----------------------------
    let mut writer = scanchip::writer(outfile)?;

    match opt_format.as_str() {
        "labels" => {
            for (bin, label) in res.labels.iter().enumerate() {
                let label = label.map_or(NOISE, |id| id as i64);
                writer.write_fmt(format_args!("{}\t{}\n", bin, label))?;
            }
        }
        "cluster" => {
            for cluster in labels_to_clusters(&res.labels) {
                writer.write_fmt(format_args!("{}\n", cluster.iter().join("\t")))?;
            }
        }
        _ => unreachable!(),
    }
    writer.flush()?;

    Ok(())
}
