use argh::FromArgs;
use std::path::PathBuf;

use monofilt::imgproc::filter::Filter;
use monofilt::io::functional as F;

#[derive(FromArgs)]
/// Apply a greyscale filter to an image
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to write the filtered image, the format follows the extension
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// the filter to apply: invert, edges, blur:<n> or sharpen:<n>
    #[argh(option, short = 'f')]
    filter: Filter,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // read the image as greyscale
    let image = F::read_image_gray8(&args.image_path)?;
    log::info!(
        "loaded {} from {}",
        image.size(),
        args.image_path.display()
    );

    let filtered = args.filter.apply(&image)?;
    log::info!("applied {}", args.filter);

    F::write_image_gray8(&args.output_path, &filtered)?;
    log::info!("saved to {}", args.output_path.display());

    Ok(())
}
