extern crate clap;
use clap::*;

mod cmd_scanchip;

fn main() -> anyhow::Result<()> {
    simple_logger::init_with_level(log::Level::Info)?;

    let app = Command::new("scanchip")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`scanchip` - Scan Hi-C contact matrices for TADs")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_scanchip::call::make_subcommand())
        .subcommand(cmd_scanchip::features::make_subcommand())
        .subcommand(cmd_scanchip::elbow::make_subcommand())
        .subcommand(cmd_scanchip::moc::make_subcommand())
        .subcommand(cmd_scanchip::jaccard::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* TAD calling:
    * call     - Features, elbow and DBSCAN in one run
    * features - Diagonal window features of a contact matrix
    * elbow    - Distortion curve and elbow index

* Quality:
    * moc     - Measure of Concordance between two TAD sets
    * jaccard - Modified Jaccard index between two boundary sets

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("call", sub_matches)) => cmd_scanchip::call::execute(sub_matches),
        Some(("features", sub_matches)) => cmd_scanchip::features::execute(sub_matches),
        Some(("elbow", sub_matches)) => cmd_scanchip::elbow::execute(sub_matches),
        Some(("moc", sub_matches)) => cmd_scanchip::moc::execute(sub_matches),
        Some(("jaccard", sub_matches)) => cmd_scanchip::jaccard::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
