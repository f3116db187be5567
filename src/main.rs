// sn-convert
//
// Converters between spaghetti-neurons files and their inputs.
//
// Usage:
//   sn-convert network --input <file.sn> --output <file.json>
//   sn-convert network --input <file.json> --output <file.sn> --to-binary
//   sn-convert archive --images <p> --labels <p> --images-output <p> --labels-output <p> --layout <row-major|transposed>
//   sn-convert raster  --image <p> --label <0-9> --image-output <p> --label-output <p>
//
// Set `RUST_LOG=info` to see what was read and written.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::error;

use sn_convert::convert::{self, ArchiveConfig, NetworkConfig, NetworkDirection, RasterConfig};
use sn_convert::PixelLayout;

#[derive(Parser, Debug)]
#[command(name = "sn-convert")]
#[command(about = "Converters for spaghetti-neurons networks and datasets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Convert a network binary (.sn) to JSON, or back with --to-binary
    Network {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Read JSON and write the .sn binary
        #[arg(long)]
        to_binary: bool,
    },

    /// Convert an image/label archive pair into two dataset binaries
    Archive {
        #[arg(long)]
        images: PathBuf,
        #[arg(long)]
        labels: PathBuf,
        #[arg(long)]
        images_output: PathBuf,
        #[arg(long)]
        labels_output: PathBuf,
        /// How each stored image is flattened
        #[arg(long, value_enum)]
        layout: Layout,
    },

    /// Convert one raster image and its digit label into two dataset binaries
    Raster {
        #[arg(long)]
        image: PathBuf,
        /// Digit depicted by the image (0-9)
        #[arg(long, allow_negative_numbers = true)]
        label: i64,
        #[arg(long)]
        image_output: PathBuf,
        #[arg(long)]
        label_output: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Layout {
    /// Flatten each image as stored
    RowMajor,
    /// Swap rows and columns of each image before flattening
    Transposed,
}

impl From<Layout> for PixelLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::RowMajor => PixelLayout::RowMajor,
            Layout::Transposed => PixelLayout::Transposed,
        }
    }
}

impl Command {
    fn run(self) -> sn_convert::Result<()> {
        match self {
            Command::Network { input, output, to_binary } => {
                let direction = if to_binary {
                    NetworkDirection::JsonToBinary
                } else {
                    NetworkDirection::BinaryToJson
                };
                convert::run_network(&NetworkConfig::new(input, output).with_direction(direction))?;
            }
            Command::Archive { images, labels, images_output, labels_output, layout } => {
                let config = ArchiveConfig::new(images, labels, images_output, labels_output, layout.into());
                convert::run_archive(&config)?;
            }
            Command::Raster { image, label, image_output, label_output } => {
                convert::run_raster(&RasterConfig::new(image, label, image_output, label_output))?;
            }
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("conversion failed: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
