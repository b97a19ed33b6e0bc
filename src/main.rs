//! modgen's main application entry point.

use modgen::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    generator::Generator,
    logger::init_logger,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let request = args.request();
    let layout = args.layout();

    let archive = Generator::new(&request, &layout).run()?;

    println!("Project generation completed successfully in {}.", archive.display());
    Ok(())
}
