use clap::Parser;

use school_db::cli::Args;
use school_db::tracing_setup::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose)?;
    if let Some(output) = args.run()? {
        println!("{}", output);
    }
    Ok(())
}
