use boardscan::detect;
use boardscan::BoardDetectorParams;
use clap::Parser;
use image::ImageReader;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

/// Locate a chessboard in a photograph and write the rectified board.
#[derive(Parser, Debug)]
#[command(name = "boardscan", version, about)]
struct Args {
    /// Input photograph (any format the `image` crate can read).
    image: PathBuf,

    /// Where to write the rectified board image.
    #[arg(long, default_value = "rectified.png")]
    out: PathBuf,

    /// Also write the 64 cell images into this directory as
    /// `cell_<row>_<col>.png`.
    #[arg(long)]
    cells_dir: Option<PathBuf>,

    /// Side length of the rectified board, in pixels.
    #[arg(long)]
    side: Option<usize>,

    /// Verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let img = ImageReader::open(&args.image)?.decode()?.to_luma8();

    let mut params = BoardDetectorParams::default();
    if let Some(side) = args.side {
        params.board_side = side;
    }

    let detection = detect::find_board(&img, params)?;

    for (label, corner) in ["top-left", "bottom-left", "bottom-right", "top-right"]
        .iter()
        .zip(&detection.corners)
    {
        println!("{label}: ({:.1}, {:.1})", corner.x, corner.y);
    }

    detect::to_image(&detection.rectified).save(&args.out)?;
    println!("rectified board written to {}", args.out.display());

    if let Some(dir) = &args.cells_dir {
        std::fs::create_dir_all(dir)?;
        for cell in &detection.cells {
            let path = dir.join(format!("cell_{}_{}.png", cell.row, cell.col));
            detect::to_image(&cell.image).save(path)?;
        }
        println!("64 cells written to {}", dir.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = boardscan::core::init_with_level(level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
