// src/bin/cli.rs
use gatt_scrape::{cli, log};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    log::init();

    let Some(opts) = cli::parse_args(std::env::args().skip(1))? else {
        eprintln!("{}", cli::HELP);
        return Ok(());
    };

    let summary = cli::run(opts).await?;
    for (name, count) in &summary.sections {
        eprintln!("{name}: {count}");
    }
    eprintln!("Wrote {} ({} ids)", summary.out_path.display(), summary.ids);
    Ok(())
}
