/// cvat-segmap entry point
fn main() {
    use clap::Parser;
    use cvat_segmap::cli::Cli;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(summary) => {
            println!("{}", summary);
            println!("Processing completed successfully!");
        }
        Err(e) => eprintln!("Error processing file: {}", e),
    }
}

fn run(cli: &cvat_segmap::cli::Cli) -> Result<cvat_segmap::ConversionSummary, cvat_segmap::ConvertError> {
    use cvat_segmap::convert::load_legend_style;
    use cvat_segmap::{ConvertOptions, Converter};

    let mut options = ConvertOptions::new()
        .output(&cli.output)
        .label_map(&cli.label_map);
    if let Some(path) = &cli.legend_style {
        options = options.legend(load_legend_style(path)?);
    }

    Converter::new(options).convert_file(&cli.xml_path)
}
